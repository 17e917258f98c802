//! File-backed editor host and a writer-backed annotation sink.

use std::io::Write;
use std::path::PathBuf;

use cadence_annotate::pass::document_lines;
use cadence_annotate::{AnnotationSink, EditorHost, LineElement, Placement, Rect, RenderError, ViewportBounds};
use parking_lot::Mutex;
use tracing::debug;

/// Serves a file as the active document with a fixed-height line layout.
///
/// The file is re-read on every query so edits made by other programs show
/// up on the next pass. A missing or unreadable file means "no context".
#[derive(Debug, Clone)]
pub struct FileHost {
	path: PathBuf,
	line_height: f64,
	top_line: usize,
	visible_lines: usize,
}

impl FileHost {
	pub fn new(path: PathBuf, line_height: f64, top_line: usize, visible_lines: usize) -> Self {
		Self {
			path,
			line_height,
			top_line,
			visible_lines,
		}
	}

	fn read(&self) -> Option<String> {
		match std::fs::read_to_string(&self.path) {
			Ok(text) => Some(text),
			Err(error) => {
				debug!(path = %self.path.display(), %error, "cli.host.read_failed");
				None
			}
		}
	}
}

impl EditorHost for FileHost {
	fn document_text(&self) -> Option<String> {
		self.read()
	}

	fn line_elements(&self) -> Option<Vec<LineElement>> {
		let text = self.read()?;
		let elements = (0..document_lines(&text).len())
			.map(|index| {
				let top = index as f64 * self.line_height;
				LineElement {
					index,
					vertical_offset: top,
					rect: Rect {
						top,
						bottom: top + self.line_height,
					},
				}
			})
			.collect();
		Some(elements)
	}

	fn viewport_bounds(&self) -> Option<ViewportBounds> {
		let top = self.top_line as f64 * self.line_height;
		Some(ViewportBounds {
			top,
			bottom: top + self.visible_lines as f64 * self.line_height,
		})
	}
}

/// Writes each annotation batch as `line<TAB>text` rows, one batch per pass.
pub struct WriterSink<W> {
	out: Mutex<W>,
	batches: Mutex<u64>,
}

impl<W: Write + Send + 'static> WriterSink<W> {
	pub fn new(out: W) -> Self {
		Self {
			out: Mutex::new(out),
			batches: Mutex::new(0),
		}
	}

	pub fn batches(&self) -> u64 {
		*self.batches.lock()
	}

	pub fn into_inner(self) -> W {
		self.out.into_inner()
	}
}

impl<W: Write + Send + 'static> AnnotationSink for WriterSink<W> {
	fn render_annotations(&self, placements: &[Placement]) -> Result<(), RenderError> {
		let mut out = self.out.lock();
		let mut write = || -> std::io::Result<()> {
			for placement in placements {
				writeln!(out, "{}\t{}", placement.line_index + 1, placement.display_text)?;
			}
			writeln!(out)?;
			out.flush()
		};
		write().map_err(|err| RenderError::Rejected(err.to_string()))?;
		*self.batches.lock() += 1;
		Ok(())
	}

	fn clear_annotations(&self) {}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn lays_out_fixed_height_lines() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("poem.txt");
		std::fs::write(&path, "one\ntwo\nthree").unwrap();

		let host = FileHost::new(path, 10.0, 5, 20);
		let elements = host.line_elements().unwrap();
		assert_eq!(elements.len(), 3);
		assert_eq!(elements[2].vertical_offset, 20.0);
		assert_eq!(elements[2].rect, Rect { top: 20.0, bottom: 30.0 });
		assert_eq!(host.viewport_bounds(), Some(ViewportBounds { top: 50.0, bottom: 250.0 }));
	}

	#[test]
	fn missing_file_is_no_context() {
		let dir = tempfile::tempdir().unwrap();
		let host = FileHost::new(dir.path().join("gone.txt"), 10.0, 0, 20);
		assert_eq!(host.document_text(), None);
		assert_eq!(host.line_elements(), None);
	}

	#[test]
	fn sink_writes_one_based_rows() {
		let sink = WriterSink::new(Vec::new());
		sink.render_annotations(&[
			Placement {
				line_index: 0,
				display_text: "1 syllable".to_string(),
				vertical_offset: 0.0,
			},
			Placement {
				line_index: 3,
				display_text: "4 syllables".to_string(),
				vertical_offset: 60.0,
			},
		])
		.unwrap();
		assert_eq!(sink.batches(), 1);
		assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "1\t1 syllable\n4\t4 syllables\n\n");
	}

	struct BrokenPipe;

	impl Write for BrokenPipe {
		fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
			Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn sink_reports_write_failures() {
		let sink = WriterSink::new(BrokenPipe);
		let placement = Placement {
			line_index: 0,
			display_text: "1".to_string(),
			vertical_offset: 0.0,
		};
		assert!(matches!(sink.render_annotations(&[placement]), Err(RenderError::Rejected(_))));
		assert_eq!(sink.batches(), 0);
	}
}
