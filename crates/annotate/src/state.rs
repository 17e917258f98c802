//! Pass bookkeeping for one editing context.
//!
//! [`SynchronizerState`] is the exclusion flag, the coalesced pending flag and
//! the displayed annotation set. The synchronizer keeps it behind a mutex and
//! never holds that lock across host or sink calls.

use crate::types::Annotation;

/// Counters describing pass activity since the context was created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
	/// Passes that claimed the exclusion flag.
	pub started: u64,
	/// Requests folded into `pending_update` because a pass was running.
	pub coalesced: u64,
	/// Passes that published an annotation set.
	pub completed: u64,
	/// Passes that found no active editing context.
	pub aborted: u64,
	/// Passes whose output was dropped because the context changed mid-pass.
	pub discarded: u64,
	/// Passes whose output the sink refused.
	pub render_failures: u64,
}

impl PassStats {
	/// Passes that have reached an outcome, whatever it was.
	pub const fn settled(&self) -> u64 {
		self.completed + self.aborted + self.discarded + self.render_failures
	}
}

/// Outcome of [`SynchronizerState::try_claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
	/// The caller owns the pass for the given context epoch.
	Started { epoch: u64 },
	/// Another pass is running; a follow-up has been recorded.
	Coalesced,
	/// The synchronizer has been shut down.
	Closed,
}

#[derive(Debug, Default)]
pub struct SynchronizerState {
	is_processing: bool,
	pending_update: bool,
	current: Vec<Annotation>,
	epoch: u64,
	closed: bool,
	stats: PassStats,
}

impl SynchronizerState {
	/// Idle state for a fresh context at epoch 0.
	pub fn new() -> Self {
		Self::default()
	}

	/// Takes the exclusion flag, or records a follow-up if it is held.
	pub fn try_claim(&mut self) -> Claim {
		if self.closed {
			return Claim::Closed;
		}
		if self.is_processing {
			self.pending_update = true;
			self.stats.coalesced += 1;
			return Claim::Coalesced;
		}
		self.is_processing = true;
		self.stats.started += 1;
		Claim::Started { epoch: self.epoch }
	}

	/// Releases the exclusion flag. Returns whether a follow-up pass is owed.
	pub fn finish(&mut self) -> bool {
		self.is_processing = false;
		std::mem::take(&mut self.pending_update) && !self.closed
	}

	/// Whether output computed under `epoch` may still be shown.
	pub fn is_current(&self, epoch: u64) -> bool {
		!self.closed && self.epoch == epoch
	}

	/// Replaces the displayed set. Returns `false` if the context moved on.
	pub fn publish(&mut self, epoch: u64, annotations: Vec<Annotation>) -> bool {
		if !self.is_current(epoch) {
			self.record_discard();
			return false;
		}
		self.current = annotations;
		self.stats.completed += 1;
		true
	}

	/// Forgets the displayed set without touching the epoch.
	pub fn clear_annotations(&mut self) {
		self.current.clear();
	}

	pub fn record_discard(&mut self) {
		self.stats.discarded += 1;
	}

	pub fn record_abort(&mut self) {
		self.current.clear();
		self.stats.aborted += 1;
	}

	pub fn record_render_failure(&mut self) {
		self.current.clear();
		self.stats.render_failures += 1;
	}

	/// Forgets the displayed set and any owed follow-up, and starts a new
	/// context epoch. A running pass keeps the exclusion flag until it ends.
	pub fn reset(&mut self) {
		self.current.clear();
		self.pending_update = false;
		self.epoch = self.epoch.wrapping_add(1);
	}

	/// Marks the state shut down; later claims return [`Claim::Closed`].
	pub fn close(&mut self) {
		self.reset();
		self.closed = true;
	}

	pub fn annotations(&self) -> &[Annotation] {
		&self.current
	}

	/// Returns true while a pass holds the exclusion flag.
	pub fn is_processing(&self) -> bool {
		self.is_processing
	}

	/// Returns true if a follow-up pass is owed.
	pub fn pending_update(&self) -> bool {
		self.pending_update
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn stats(&self) -> PassStats {
		self.stats
	}
}
