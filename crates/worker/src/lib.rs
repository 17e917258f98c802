//! Worker primitives shared by the annotation engine.
//!
//! * [`Spawner`] routes task spawns through a captured runtime handle so hosts
//!   can drive the engine from threads that are not inside a runtime.
//! * [`DelayedSlot`] is a single-slot delayed-task queue: scheduling while a
//!   task is pending replaces it and restarts the delay.
//! * [`GenerationToken`] scopes cancellation to one scheduled generation.

mod class;
mod panic;
mod slot;
mod spawn;
mod token;

pub use class::TaskClass;
pub use panic::join_error_panic_message;
pub use slot::{DelayedSlot, ScheduleOutcome};
pub use spawn::Spawner;
pub use token::{GenerationClock, GenerationToken};
