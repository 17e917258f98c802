use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use cadence_annotate::{
	AnnotationSink, EditorHost, LineElement, Placement, Rect, RenderError, SyncConfig, Synchronizer, ViewportBounds,
};
use cadence_worker::Spawner;
use tokio::time::sleep;

/// Host whose text read panics while `explode` is set.
#[derive(Default)]
struct FlakyHost {
	explode: AtomicBool,
}

impl EditorHost for FlakyHost {
	fn document_text(&self) -> Option<String> {
		if self.explode.load(Ordering::SeqCst) {
			panic!("host exploded");
		}
		Some("rhythm and rhyme".to_string())
	}

	fn line_elements(&self) -> Option<Vec<LineElement>> {
		Some(vec![LineElement {
			index: 0,
			vertical_offset: 4.0,
			rect: Rect { top: 0.0, bottom: 18.0 },
		}])
	}

	fn viewport_bounds(&self) -> Option<ViewportBounds> {
		None
	}
}

#[derive(Default)]
struct CountingSink {
	renders: AtomicUsize,
}

impl AnnotationSink for CountingSink {
	fn render_annotations(&self, placements: &[Placement]) -> Result<(), RenderError> {
		assert_eq!(placements.len(), 1);
		self.renders.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	fn clear_annotations(&self) {}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn panicking_host_releases_the_pass() {
	let host = Arc::new(FlakyHost::default());
	let sink = Arc::new(CountingSink::default());
	let sync = Synchronizer::new(
		Spawner::current().unwrap(),
		Arc::clone(&host),
		Arc::clone(&sink),
		SyncConfig {
			debounce_interval_ms: 0,
			..SyncConfig::default()
		},
	);

	host.explode.store(true, Ordering::SeqCst);
	sync.request_pass();
	sleep(Duration::from_secs(1)).await;
	assert!(!sync.is_processing(), "exclusion flag released after panic");
	assert!(sync.annotations().is_empty());

	host.explode.store(false, Ordering::SeqCst);
	sync.request_pass();
	sleep(Duration::from_secs(1)).await;

	assert_eq!(sink.renders.load(Ordering::SeqCst), 1);
	let annotations = sync.annotations();
	assert_eq!(annotations.len(), 1);
	assert_eq!(annotations[0].count, 3);
	assert_eq!(annotations[0].vertical_offset, 4.0);
}
