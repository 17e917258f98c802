/// Execution classes used for spawn tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Work whose result the user is waiting to see (annotation passes).
	Interactive,
	/// Timer-gated work waiting on a debounce or rerun delay.
	Deferred,
	/// Long-lived observers that poll the host.
	Background,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Deferred => "deferred",
			Self::Background => "background",
		}
	}
}
