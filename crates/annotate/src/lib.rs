//! Per-line syllable annotations kept in sync with an editor view.
//!
//! The [`Synchronizer`] owns the displayed annotation set for one editing
//! context. Hosts feed it triggers ([`TriggerReason`]) and expose document
//! text and line geometry through [`EditorHost`]; finished annotation sets are
//! pushed to an [`AnnotationSink`] in a single batch per pass.
//!
//! Passes are debounced per trigger source, never overlap, and collapse any
//! triggers that arrive mid-pass into one follow-up pass.

pub mod config;
pub mod error;
pub mod host;
pub mod pass;
pub mod range;
pub mod state;
mod sync;
pub mod types;
pub mod watch;

pub use config::{SyncConfig, Verbosity};
pub use error::{ConfigError, ConfigWarning, RenderError};
pub use host::{AnnotationSink, EditorHost};
pub use range::LineSpan;
pub use state::PassStats;
pub use sync::{RERUN_DELAY, Synchronizer};
pub use types::{Annotation, LineElement, Placement, Rect, TriggerReason, TriggerSource, ViewportBounds};
pub use watch::{HostFingerprint, PollWatcher};
