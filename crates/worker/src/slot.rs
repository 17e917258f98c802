//! Single-slot delayed task queue.
//!
//! A [`DelayedSlot`] holds at most one pending task. Scheduling while a task
//! is still waiting out its delay cancels that task and restarts the delay
//! with the new one, so a burst of schedules collapses into a single run that
//! fires `delay` after the last schedule.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::token::{GenerationClock, GenerationToken};
use crate::{Spawner, TaskClass};

/// Result of [`DelayedSlot::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
	/// Slot was empty; the task is now pending.
	Scheduled,
	/// A pending task was cancelled and replaced.
	Replaced,
	/// Slot is closed; the task was dropped.
	Closed,
}

#[derive(Debug, Default)]
struct SlotState {
	pending: Option<GenerationToken>,
	closed: bool,
}

/// Single-slot delayed task queue.
#[derive(Debug)]
pub struct DelayedSlot {
	name: &'static str,
	class: TaskClass,
	spawner: Spawner,
	clock: GenerationClock,
	state: Arc<Mutex<SlotState>>,
}

impl DelayedSlot {
	pub fn new(name: &'static str, class: TaskClass, spawner: Spawner) -> Self {
		Self {
			name,
			class,
			spawner,
			clock: GenerationClock::new(),
			state: Arc::new(Mutex::new(SlotState::default())),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Runs `task` after `delay` unless it is replaced or cancelled first.
	pub fn schedule<F>(&self, delay: Duration, task: F) -> ScheduleOutcome
	where
		F: Future<Output = ()> + Send + 'static,
	{
		let token = GenerationToken::new(self.clock.next(), CancellationToken::new());
		let outcome = {
			let mut state = self.state.lock();
			if state.closed {
				trace!(slot = self.name, "worker.slot.closed");
				return ScheduleOutcome::Closed;
			}
			match state.pending.replace(token.clone()) {
				Some(prev) => {
					prev.cancel();
					ScheduleOutcome::Replaced
				}
				None => ScheduleOutcome::Scheduled,
			}
		};

		trace!(
			slot = self.name,
			generation = token.generation(),
			delay_ms = delay.as_millis() as u64,
			?outcome,
			"worker.slot.schedule"
		);

		let state = Arc::clone(&self.state);
		let name = self.name;
		self.spawner.spawn(self.class, async move {
			tokio::select! {
				biased;
				_ = token.cancelled() => {
					trace!(slot = name, generation = token.generation(), "worker.slot.cancelled");
					return;
				}
				_ = tokio::time::sleep(delay) => {}
			}

			{
				let mut state = state.lock();
				let current = state.pending.as_ref().is_some_and(|t| t.generation() == token.generation());
				if !current {
					return;
				}
				state.pending = None;
			}

			trace!(slot = name, generation = token.generation(), "worker.slot.fire");
			task.await;
		});

		outcome
	}

	/// Cancels the pending task, if any. The slot stays usable.
	pub fn cancel(&self) -> bool {
		let prev = self.state.lock().pending.take();
		match prev {
			Some(token) => {
				token.cancel();
				trace!(slot = self.name, generation = token.generation(), "worker.slot.cancel");
				true
			}
			None => false,
		}
	}

	/// Cancels the pending task and refuses all further schedules.
	pub fn close(&self) {
		let prev = {
			let mut state = self.state.lock();
			state.closed = true;
			state.pending.take()
		};
		if let Some(token) = prev {
			token.cancel();
		}
		trace!(slot = self.name, "worker.slot.close");
	}

	pub fn is_pending(&self) -> bool {
		self.state.lock().pending.is_some()
	}

	pub fn is_closed(&self) -> bool {
		self.state.lock().closed
	}
}

impl Drop for DelayedSlot {
	fn drop(&mut self) {
		if let Some(token) = self.state.lock().pending.take() {
			token.cancel();
		}
	}
}

#[cfg(test)]
mod tests;
