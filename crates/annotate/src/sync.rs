//! Debounced orchestration of annotation passes.
//!
//! [`Synchronizer`] owns the displayed annotation set for one editing context
//! and tracks:
//! - Two debounce slots, one for edits and one for view changes
//! - The pass exclusion flag and the coalesced follow-up flag
//! - A context epoch so output from a stale context is never shown
//!
//! # Pass phases
//!
//! A pass clears, measures, computes and emits, yielding to the scheduler
//! between phases. The state only ever receives the complete new set, and
//! the state lock is never held while the host or sink is called.

use std::sync::{Arc, Weak};
use std::time::Duration;

use arc_swap::ArcSwap;
use cadence_worker::{DelayedSlot, ScheduleOutcome, Spawner, TaskClass, join_error_panic_message};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error, trace, warn};

use crate::config::SyncConfig;
use crate::error::ConfigError;
use crate::host::{AnnotationSink, EditorHost};
use crate::pass::compute_annotations;
use crate::state::{Claim, PassStats, SynchronizerState};
use crate::types::{Annotation, Placement, TriggerReason, TriggerSource};
use crate::watch::{HostFingerprint, PollWatcher};

/// Delay before the follow-up pass owed to triggers that arrived mid-pass.
pub const RERUN_DELAY: Duration = Duration::from_millis(50);

struct Inner<H, S> {
	host: H,
	sink: S,
	spawner: Spawner,
	config: ArcSwap<SyncConfig>,
	state: Mutex<SynchronizerState>,
	edit_slot: DelayedSlot,
	view_slot: DelayedSlot,
	rerun_slot: DelayedSlot,
	watcher: Mutex<Option<PollWatcher>>,
	progress: watch::Sender<PassStats>,
}

/// Annotation synchronizer for one editing context.
///
/// Cloning yields another handle to the same context.
pub struct Synchronizer<H, S> {
	inner: Arc<Inner<H, S>>,
}

impl<H, S> Clone for Synchronizer<H, S> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<H, S> std::fmt::Debug for Synchronizer<H, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.inner.state.lock();
		f.debug_struct("Synchronizer")
			.field("annotations", &state.annotations().len())
			.field("is_processing", &state.is_processing())
			.field("pending_update", &state.pending_update())
			.finish()
	}
}

impl<H: EditorHost, S: AnnotationSink> Synchronizer<H, S> {
	/// Starts tracking a newly active editing context.
	///
	/// Work is spawned on the runtime behind `spawner`; the synchronizer's
	/// methods may be called from any thread.
	pub fn new(spawner: Spawner, host: H, sink: S, config: SyncConfig) -> Self {
		debug!(
			max_lines = config.max_lines_to_process,
			debounce_ms = config.debounce_interval_ms,
			only_visible = config.only_visible_range,
			"annotate.sync.init"
		);
		Self {
			inner: Arc::new(Inner {
				host,
				sink,
				edit_slot: DelayedSlot::new("annotate.edit", TaskClass::Deferred, spawner.clone()),
				view_slot: DelayedSlot::new("annotate.view", TaskClass::Deferred, spawner.clone()),
				rerun_slot: DelayedSlot::new("annotate.rerun", TaskClass::Deferred, spawner.clone()),
				spawner,
				config: ArcSwap::from_pointee(config),
				state: Mutex::new(SynchronizerState::new()),
				watcher: Mutex::new(None),
				progress: watch::Sender::new(PassStats::default()),
			}),
		}
	}

	/// Replaces the configuration used by passes that start after this call.
	///
	/// Values outside their documented ranges are accepted and logged.
	pub fn configure(&self, config: SyncConfig) -> Result<(), ConfigError> {
		for warning in config.validate()? {
			warn!(%warning, "annotate.config.out_of_range");
		}
		debug!(?config, "annotate.config.update");
		self.inner.config.store(Arc::new(config));
		Ok(())
	}

	/// The configuration the next pass will use.
	pub fn config(&self) -> Arc<SyncConfig> {
		self.inner.config.load_full()
	}

	/// Schedules a debounced pass for `reason`.
	pub fn on_trigger(&self, reason: TriggerReason) {
		Inner::on_trigger(&self.inner, reason);
	}

	/// Runs a pass as soon as possible, or folds into the one already running.
	pub fn request_pass(&self) {
		Inner::request_pass(&self.inner);
	}

	/// Drops all annotations and owed work after the editing context went away.
	///
	/// A pass already running finishes its computation but its output is
	/// discarded.
	pub fn on_context_lost(&self) {
		let inner = &self.inner;
		inner.edit_slot.cancel();
		inner.view_slot.cancel();
		inner.rerun_slot.cancel();
		inner.state.lock().reset();
		inner.sink.clear_annotations();
		debug!("annotate.sync.context_lost");
	}

	/// Clears annotations, stops observation and cancels scheduled work.
	///
	/// Later triggers are ignored. Calling this more than once is harmless.
	pub fn shutdown(&self) {
		let inner = &self.inner;
		if inner.state.lock().is_closed() {
			return;
		}
		inner.edit_slot.close();
		inner.view_slot.close();
		inner.rerun_slot.close();
		if let Some(watcher) = inner.watcher.lock().take() {
			watcher.stop();
		}
		inner.state.lock().close();
		inner.sink.clear_annotations();
		debug!("annotate.sync.shutdown");
	}

	/// Polls the host every `interval` and triggers on observed changes.
	///
	/// Replaces any observer started earlier. Ignored after shutdown.
	pub fn observe(&self, interval: Duration) {
		if self.inner.state.lock().is_closed() {
			return;
		}
		let probe = {
			let weak = Arc::downgrade(&self.inner);
			move || weak.upgrade().map(|inner| HostFingerprint::capture(&inner.host))
		};
		let notify = {
			let weak = Arc::downgrade(&self.inner);
			move |reason| match weak.upgrade() {
				Some(inner) => {
					Inner::on_trigger(&inner, reason);
					true
				}
				None => false,
			}
		};
		let watcher = PollWatcher::spawn(&self.inner.spawner, interval, probe, notify);
		if let Some(previous) = self.inner.watcher.lock().replace(watcher) {
			previous.stop();
		}
	}

	/// The annotations currently on display.
	pub fn annotations(&self) -> Vec<Annotation> {
		self.inner.state.lock().annotations().to_vec()
	}

	/// Pass counters so far.
	pub fn stats(&self) -> PassStats {
		self.inner.state.lock().stats()
	}

	/// Receives the counters each time a pass releases the exclusion flag.
	pub fn subscribe(&self) -> watch::Receiver<PassStats> {
		self.inner.progress.subscribe()
	}

	/// Returns true while a pass is claimed and not yet finished.
	pub fn is_processing(&self) -> bool {
		self.inner.state.lock().is_processing()
	}
}

impl<H: EditorHost, S: AnnotationSink> Inner<H, S> {
	fn on_trigger(this: &Arc<Self>, reason: TriggerReason) {
		let delay = this.config.load().debounce_interval();
		let slot = match reason.source() {
			TriggerSource::Edit => &this.edit_slot,
			TriggerSource::View => &this.view_slot,
		};

		let weak = Arc::downgrade(this);
		let outcome = slot.schedule(delay, async move {
			if let Some(inner) = weak.upgrade() {
				Inner::request_pass(&inner);
			}
		});
		trace!(reason = reason.as_str(), slot = slot.name(), ?outcome, "annotate.sync.trigger");
	}

	fn request_pass(this: &Arc<Self>) {
		let claim = this.state.lock().try_claim();
		let epoch = match claim {
			Claim::Started { epoch } => epoch,
			Claim::Coalesced => {
				trace!("annotate.pass.coalesced");
				return;
			}
			Claim::Closed => return,
		};
		// The pass is in flight from here on; later `configure` calls apply
		// to the next one.
		let config = this.config.load_full();

		let guard = PassGuard {
			inner: Arc::clone(this),
		};
		let handle = this.spawner.spawn(TaskClass::Interactive, async move {
			guard.inner.run_pass(epoch, &config).await;
			drop(guard);
		});

		this.spawner.spawn(TaskClass::Background, async move {
			if let Err(err) = handle.await
				&& let Some(message) = join_error_panic_message(err)
			{
				error!(panic = %message, "annotate.pass.panicked");
			}
		});
	}

	async fn run_pass(&self, epoch: u64, config: &SyncConfig) {
		self.sink.clear_annotations();
		self.state.lock().clear_annotations();
		tokio::task::yield_now().await;

		let Some(text) = self.host.document_text() else {
			return self.abort("document");
		};
		let Some(elements) = self.host.line_elements() else {
			return self.abort("line_elements");
		};
		let viewport = if config.only_visible_range {
			self.host.viewport_bounds()
		} else {
			None
		};
		tokio::task::yield_now().await;

		let annotations = compute_annotations(&text, &elements, viewport, config);
		tokio::task::yield_now().await;

		self.emit(epoch, annotations, config);
	}

	fn abort(&self, missing: &'static str) {
		debug!(missing, "annotate.pass.no_context");
		self.state.lock().record_abort();
		self.sink.clear_annotations();
	}

	fn emit(&self, epoch: u64, annotations: Vec<Annotation>, config: &SyncConfig) {
		let current = self.state.lock().is_current(epoch);
		if !current {
			self.state.lock().record_discard();
			debug!(epoch, "annotate.pass.stale");
			return;
		}

		let placements: Vec<Placement> = annotations.iter().map(|a| a.placement(config.verbosity)).collect();
		if let Err(err) = self.sink.render_annotations(&placements) {
			warn!(error = %err, annotations = placements.len(), "annotate.render.failed");
			self.state.lock().record_render_failure();
			self.sink.clear_annotations();
			return;
		}

		let count = annotations.len();
		if self.state.lock().publish(epoch, annotations) {
			debug!(epoch, annotations = count, "annotate.pass.done");
		} else {
			// Context went away while the sink was drawing.
			self.sink.clear_annotations();
			debug!(epoch, "annotate.pass.stale");
		}
	}
}

/// Releases the exclusion flag when a pass ends, schedules the follow-up
/// pass if one is owed and publishes the counters.
///
/// Created before the pass task is spawned, so a task dropped unpolled or
/// unwound by a panic still releases the flag.
struct PassGuard<H: EditorHost, S: AnnotationSink> {
	inner: Arc<Inner<H, S>>,
}

impl<H: EditorHost, S: AnnotationSink> Drop for PassGuard<H, S> {
	fn drop(&mut self) {
		let (rerun, stats) = {
			let mut state = self.inner.state.lock();
			(state.finish(), state.stats())
		};
		self.inner.progress.send_replace(stats);
		if !rerun {
			return;
		}
		let weak: Weak<Inner<H, S>> = Arc::downgrade(&self.inner);
		let outcome = self.inner.rerun_slot.schedule(RERUN_DELAY, async move {
			if let Some(inner) = weak.upgrade() {
				Inner::request_pass(&inner);
			}
		});
		if outcome != ScheduleOutcome::Closed {
			trace!(delay_ms = RERUN_DELAY.as_millis() as u64, "annotate.pass.rerun");
		}
	}
}
