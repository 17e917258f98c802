//! Seams to the host editor.

use std::sync::Arc;

use crate::error::RenderError;
use crate::types::{LineElement, Placement, ViewportBounds};

/// Read access to the active editing context.
///
/// Every method returns `None` when there is no active context; the
/// synchronizer treats that as a normal state, not a failure.
pub trait EditorHost: Send + Sync + 'static {
	fn document_text(&self) -> Option<String>;

	/// Rendered line elements in line order.
	fn line_elements(&self) -> Option<Vec<LineElement>>;

	fn viewport_bounds(&self) -> Option<ViewportBounds>;
}

/// Write side of the renderer. Receives complete annotation sets only.
pub trait AnnotationSink: Send + Sync + 'static {
	fn render_annotations(&self, placements: &[Placement]) -> Result<(), RenderError>;

	fn clear_annotations(&self);
}

impl<T: EditorHost> EditorHost for Arc<T> {
	fn document_text(&self) -> Option<String> {
		(**self).document_text()
	}

	fn line_elements(&self) -> Option<Vec<LineElement>> {
		(**self).line_elements()
	}

	fn viewport_bounds(&self) -> Option<ViewportBounds> {
		(**self).viewport_bounds()
	}
}

impl<T: AnnotationSink> AnnotationSink for Arc<T> {
	fn render_annotations(&self, placements: &[Placement]) -> Result<(), RenderError> {
		(**self).render_annotations(placements)
	}

	fn clear_annotations(&self) {
		(**self).clear_annotations()
	}
}
