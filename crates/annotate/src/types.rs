//! Geometry, trigger and annotation types exchanged with the host.

use crate::config::Verbosity;

/// Vertical extent of a rendered element, in host layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
	pub top: f64,
	pub bottom: f64,
}

/// One rendered line as reported by the host.
///
/// Hosts report elements in line order; the element at position `i` of the
/// sequence renders document line `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineElement {
	/// Host-side line number.
	pub index: usize,
	/// Offset at which an annotation for this line should be drawn.
	pub vertical_offset: f64,
	pub rect: Rect,
}

/// Visible portion of the scroll area, in the same units as [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
	pub top: f64,
	pub bottom: f64,
}

/// A computed annotation, owned by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
	pub line_index: usize,
	pub count: usize,
	pub vertical_offset: f64,
}

impl Annotation {
	/// Render instruction for this annotation under `verbosity`.
	pub fn placement(&self, verbosity: Verbosity) -> Placement {
		Placement {
			line_index: self.line_index,
			display_text: verbosity.display_text(self.count),
			vertical_offset: self.vertical_offset,
		}
	}
}

/// Render instruction handed to an [`AnnotationSink`](crate::AnnotationSink).
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
	pub line_index: usize,
	pub display_text: String,
	pub vertical_offset: f64,
}

/// Why the host is asking for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerReason {
	DocumentChanged,
	ContextChanged,
	Scrolled,
	DomMutated,
}

/// Debounce channel a trigger is coalesced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSource {
	/// Content edits and editing-context switches.
	Edit,
	/// Scrolling and renderer mutations.
	View,
}

impl TriggerReason {
	/// Debounce slot this trigger is coalesced on.
	pub const fn source(self) -> TriggerSource {
		match self {
			Self::DocumentChanged | Self::ContextChanged => TriggerSource::Edit,
			Self::Scrolled | Self::DomMutated => TriggerSource::View,
		}
	}

	/// Stable name used in log events.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::DocumentChanged => "document_changed",
			Self::ContextChanged => "context_changed",
			Self::Scrolled => "scrolled",
			Self::DomMutated => "dom_mutated",
		}
	}
}
