use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Hands out increasing generation numbers, starting at 1.
#[derive(Debug, Default)]
pub struct GenerationClock {
	last: AtomicU64,
}

impl GenerationClock {
	/// Creates a clock whose first generation is 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation number.
	pub fn next(&self) -> u64 {
		self.last.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Cancellation handle tagged with the generation it was issued for.
///
/// Clones share cancellation state; comparing generations tells a task
/// whether it is still the most recent one scheduled.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	/// Creates a token for `generation` backed by `cancel`.
	pub fn new(generation: u64, cancel: CancellationToken) -> Self {
		Self { generation, cancel }
	}

	/// Returns generation ID.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true if cancellation was requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation for this token and all clones.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Completes once cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}
