use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::TaskClass;

/// Runtime handle captured at construction time.
///
/// Spawning through a stored handle lets callers on foreign threads (an
/// editor's UI thread, for instance) schedule work without entering the
/// runtime themselves.
#[derive(Debug, Clone)]
pub struct Spawner {
	handle: Handle,
}

impl Spawner {
	/// Captures the runtime the caller is currently running inside, if any.
	pub fn current() -> Option<Self> {
		Handle::try_current().ok().map(Self::from_handle)
	}

	/// Spawns onto the runtime behind `handle`.
	pub fn from_handle(handle: Handle) -> Self {
		Self { handle }
	}

	/// Spawns an async task with shared worker classification metadata.
	pub fn spawn<F>(&self, class: TaskClass, fut: F) -> JoinHandle<F::Output>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		tracing::trace!(worker_class = class.as_str(), "worker.spawn");
		self.handle.spawn(fut)
	}
}
