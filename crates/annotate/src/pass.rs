//! The compute phase of a pass: text and geometry in, annotations out.

use cadence_syllable::estimate;
use tracing::trace;

use crate::config::SyncConfig;
use crate::range::candidate_span;
use crate::types::{Annotation, LineElement, ViewportBounds};

/// Splits document text into lines on `\n`.
///
/// An empty document is one empty line, matching how editors number lines.
pub fn document_lines(text: &str) -> Vec<&str> {
	text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect()
}

/// Builds the annotation set for one snapshot of the document and view.
///
/// Lines missing from either the text or the rendered elements are skipped;
/// the two can disagree briefly while an edit is being laid out.
pub fn compute_annotations(
	text: &str,
	elements: &[LineElement],
	viewport: Option<ViewportBounds>,
	config: &SyncConfig,
) -> Vec<Annotation> {
	let lines = document_lines(text);
	let Some(span) = candidate_span(lines.len(), elements, viewport, config) else {
		return Vec::new();
	};

	let mut annotations = Vec::new();
	for line_index in span.lines() {
		let (Some(line), Some(element)) = (lines.get(line_index), elements.get(line_index)) else {
			continue;
		};
		let count = estimate(line);
		if config.displays(count) {
			annotations.push(Annotation {
				line_index,
				count,
				vertical_offset: element.vertical_offset,
			});
		}
	}

	trace!(
		total_lines = lines.len(),
		span_start = span.start,
		span_end = span.end,
		annotations = annotations.len(),
		"annotate.pass.computed"
	);
	annotations
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::config::Verbosity;
	use crate::types::Rect;

	fn layout(lines: usize) -> Vec<LineElement> {
		(0..lines)
			.map(|index| LineElement {
				index,
				vertical_offset: index as f64 * 10.0,
				rect: Rect {
					top: index as f64 * 10.0,
					bottom: index as f64 * 10.0 + 10.0,
				},
			})
			.collect()
	}

	fn full_range() -> SyncConfig {
		SyncConfig {
			only_visible_range: false,
			..SyncConfig::default()
		}
	}

	#[test]
	fn document_lines_splits_on_newline() {
		assert_eq!(document_lines(""), vec![""]);
		assert_eq!(document_lines("a\nb\n"), vec!["a", "b", ""]);
		assert_eq!(document_lines("a\r\nb"), vec!["a", "b"]);
	}

	#[test]
	fn zero_lines_are_skipped_by_default() {
		let text = "hello there\n\n1234\nbanana";
		let got = compute_annotations(text, &layout(4), None, &full_range());
		assert_eq!(
			got,
			vec![
				Annotation {
					line_index: 0,
					count: 3,
					vertical_offset: 0.0,
				},
				Annotation {
					line_index: 3,
					count: 3,
					vertical_offset: 30.0,
				},
			]
		);
	}

	#[test]
	fn zero_lines_shown_when_enabled() {
		let config = SyncConfig {
			show_zero_syllables: true,
			verbosity: Verbosity::Terse,
			..full_range()
		};
		let got = compute_annotations("cat\n\n", &layout(3), None, &config);
		let texts: Vec<String> = got.iter().map(|a| a.placement(config.verbosity).display_text).collect();
		assert_eq!(texts, vec!["1", "0", "0"]);
	}

	#[test]
	fn skips_lines_without_elements() {
		let got = compute_annotations("a\nb\nc\nd\ne", &layout(3), None, &full_range());
		assert_eq!(got.iter().map(|a| a.line_index).collect::<Vec<_>>(), vec![0, 1, 2]);
	}

	#[test]
	fn skips_elements_without_text() {
		let got = compute_annotations("a\nb", &layout(10), None, &full_range());
		assert_eq!(got.len(), 2);
	}

	#[test]
	fn budget_limits_full_range() {
		let text = vec!["la"; 1000].join("\n");
		let config = SyncConfig {
			max_lines_to_process: 500,
			..full_range()
		};
		let got = compute_annotations(&text, &layout(1000), None, &config);
		assert_eq!(got.len(), 500);
		assert_eq!(got.first().map(|a| a.line_index), Some(0));
		assert_eq!(got.last().map(|a| a.line_index), Some(499));
	}

	#[test]
	fn visible_range_uses_geometry() {
		let text = vec!["la"; 1000].join("\n");
		let config = SyncConfig {
			only_visible_range: true,
			..SyncConfig::default()
		};
		// Lines are 10 units tall: 3000..3200 covers lines 300..=320 before tolerance.
		let viewport = ViewportBounds { top: 3000.0, bottom: 3200.0 };
		let got = compute_annotations(&text, &layout(1000), Some(viewport), &config);
		let first = got.first().map(|a| a.line_index);
		let last = got.last().map(|a| a.line_index);
		assert_eq!(first, Some(279));
		assert_eq!(last, Some(340));
	}

	#[test]
	fn empty_document_yields_nothing() {
		assert!(compute_annotations("", &layout(1), None, &full_range()).is_empty());
	}

	#[test]
	fn identical_inputs_give_identical_sets() {
		let text = "one line\nanother line here";
		let a = compute_annotations(text, &layout(2), None, &full_range());
		let b = compute_annotations(text, &layout(2), None, &full_range());
		assert_eq!(a, b);
	}
}
