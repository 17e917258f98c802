//! `cadence count`: plain per-line syllable report.

use std::fmt::Write as _;

use cadence_annotate::pass::document_lines;
use cadence_syllable::{estimate, word_syllables, words};

/// Lines of a file as a reader counts them: a final newline ends the last
/// line instead of starting an empty one.
fn file_lines(text: &str) -> Vec<&str> {
	let mut lines = document_lines(text);
	if text.ends_with('\n') {
		lines.pop();
	}
	lines
}

/// Formats the per-line report. Line numbers start at 1.
pub fn report(text: &str, with_words: bool) -> String {
	let mut out = String::new();
	for (number, line) in file_lines(text).into_iter().enumerate() {
		let _ = write!(out, "{}\t{}", number + 1, estimate(line));
		if with_words {
			let breakdown: Vec<String> = words(line).map(|w| format!("{}:{}", w, word_syllables(&w))).collect();
			if !breakdown.is_empty() {
				let _ = write!(out, "\t{}", breakdown.join(" "));
			}
		}
		out.push('\n');
	}
	out
}

/// Sum of the per-line estimates.
pub fn total(text: &str) -> usize {
	file_lines(text).into_iter().map(estimate).sum()
}
