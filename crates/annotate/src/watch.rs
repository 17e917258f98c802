//! Poll-and-diff change observation for hosts without change notifications.

use std::hash::BuildHasher;
use std::time::Duration;

use cadence_worker::{Spawner, TaskClass};
use rustc_hash::FxBuildHasher;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::host::EditorHost;
use crate::types::TriggerReason;

/// Cheap summary of what the host is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostFingerprint {
	/// Hash of the document text; `None` without an editing context.
	pub text: Option<u64>,
	/// Hash of the viewport bounds and the rendered line layout.
	pub view: Option<u64>,
}

impl HostFingerprint {
	pub fn capture<H: EditorHost>(host: &H) -> Self {
		let hasher = FxBuildHasher;
		let text = host.document_text().map(|text| hasher.hash_one(&text));

		let viewport = host.viewport_bounds().map(|vp| (vp.top.to_bits(), vp.bottom.to_bits()));
		let layout = host.line_elements().map(|elements| {
			let first = elements.first().map(|el| el.vertical_offset.to_bits());
			let last = elements.last().map(|el| el.vertical_offset.to_bits());
			(elements.len(), first, last)
		});
		let view = (viewport.is_some() || layout.is_some()).then(|| hasher.hash_one((viewport, layout)));

		Self { text, view }
	}

	/// The trigger implied by moving from `self` to `next`, if any.
	pub fn diff(&self, next: &Self) -> Option<TriggerReason> {
		if self.text.is_some() != next.text.is_some() {
			Some(TriggerReason::ContextChanged)
		} else if self.text != next.text {
			Some(TriggerReason::DocumentChanged)
		} else if self.view != next.view {
			Some(TriggerReason::Scrolled)
		} else {
			None
		}
	}
}

/// Background task that fingerprints the host on an interval and reports
/// changes. Stops when cancelled, when dropped, or when `notify` returns
/// `false`.
#[derive(Debug)]
pub struct PollWatcher {
	cancel: CancellationToken,
	handle: JoinHandle<()>,
}

impl PollWatcher {
	/// Starts polling. The first probe only establishes a baseline.
	///
	/// `probe` returning `None` ends the watcher, as does `notify` returning
	/// `false`.
	pub fn spawn<P, N>(spawner: &Spawner, interval: Duration, probe: P, notify: N) -> Self
	where
		P: Fn() -> Option<HostFingerprint> + Send + 'static,
		N: Fn(TriggerReason) -> bool + Send + 'static,
	{
		let cancel = CancellationToken::new();
		let token = cancel.clone();
		let interval = interval.max(Duration::from_millis(1));

		let handle = spawner.spawn(TaskClass::Background, async move {
			let mut ticker = tokio::time::interval(interval);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			let mut last: Option<HostFingerprint> = None;

			loop {
				tokio::select! {
					biased;
					_ = token.cancelled() => break,
					_ = ticker.tick() => {}
				}

				let Some(next) = probe() else {
					break;
				};
				let Some(prev) = last.replace(next) else {
					continue;
				};
				if let Some(reason) = prev.diff(&next) {
					trace!(reason = reason.as_str(), "annotate.watch.change");
					if !notify(reason) {
						break;
					}
				}
			}
			debug!("annotate.watch.stopped");
		});

		Self { cancel, handle }
	}

	pub fn stop(&self) {
		self.cancel.cancel();
	}

	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}
}

impl Drop for PollWatcher {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}
