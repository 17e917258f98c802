//! Candidate line range selection for a pass.

use std::ops::RangeInclusive;

use tracing::trace;

use crate::config::SyncConfig;
use crate::types::{LineElement, ViewportBounds};

/// Elements this close to a viewport edge still count as visible.
pub const VISIBILITY_TOLERANCE: f64 = 100.0;

/// Lines added on each side of the visible span.
pub const VISIBLE_PADDING_LINES: usize = 10;

/// Inclusive span of line indices. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
	pub start: usize,
	pub end: usize,
}

impl LineSpan {
	/// Number of lines covered.
	pub fn len(&self) -> usize {
		self.end - self.start + 1
	}

	/// Whether `line` lies inside the span.
	pub fn contains(&self, line: usize) -> bool {
		(self.start..=self.end).contains(&line)
	}

	/// The covered line numbers.
	pub fn lines(&self) -> RangeInclusive<usize> {
		self.start..=self.end
	}
}

/// `[0, min(total_lines, max_lines) - 1]`, or `None` when either bound is zero.
pub fn default_span(total_lines: usize, max_lines: usize) -> Option<LineSpan> {
	let len = total_lines.min(max_lines);
	(len > 0).then(|| LineSpan { start: 0, end: len - 1 })
}

/// Positions of the first and last elements overlapping the tolerance-widened
/// viewport. `None` when nothing is visible.
pub fn visible_span(elements: &[LineElement], viewport: ViewportBounds) -> Option<LineSpan> {
	let top = viewport.top - VISIBILITY_TOLERANCE;
	let bottom = viewport.bottom + VISIBILITY_TOLERANCE;

	let mut visible = elements
		.iter()
		.enumerate()
		.filter(|(_, el)| el.rect.bottom >= top && el.rect.top <= bottom)
		.map(|(pos, _)| pos);

	let start = visible.next()?;
	let end = visible.last().unwrap_or(start);
	Some(LineSpan { start, end })
}

/// Chooses the lines a pass evaluates.
///
/// With `only_visible_range` the visible span is padded, clamped to the
/// document and cut to `max_lines_to_process`. When visibility cannot be
/// determined the default span from the top of the document is used.
pub fn candidate_span(
	total_lines: usize,
	elements: &[LineElement],
	viewport: Option<ViewportBounds>,
	config: &SyncConfig,
) -> Option<LineSpan> {
	let fallback = || default_span(total_lines, config.max_lines_to_process);

	if total_lines == 0 || config.max_lines_to_process == 0 {
		return None;
	}
	if !config.only_visible_range {
		return fallback();
	}

	let Some(visible) = viewport.and_then(|vp| visible_span(elements, vp)) else {
		trace!(total_lines, elements = elements.len(), "annotate.range.no_geometry");
		return fallback();
	};

	let last = total_lines - 1;
	let start = visible.start.saturating_sub(VISIBLE_PADDING_LINES);
	if start > last {
		trace!(start, total_lines, "annotate.range.geometry_past_text");
		return fallback();
	}
	let mut end = visible.end.saturating_add(VISIBLE_PADDING_LINES).min(last);

	let max = config.max_lines_to_process;
	if end - start + 1 > max {
		end = start + max - 1;
	}

	Some(LineSpan { start, end })
}
