use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::time::sleep;

use super::*;

fn slot(name: &'static str) -> DelayedSlot {
	DelayedSlot::new(name, TaskClass::Deferred, Spawner::current().expect("inside runtime"))
}

fn counting_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
	let counter = Arc::clone(counter);
	async move {
		counter.fetch_add(1, Ordering::SeqCst);
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn fires_once_after_delay() {
	let slot = slot("single");
	let runs = Arc::new(AtomicUsize::new(0));

	assert_eq!(slot.schedule(Duration::from_millis(100), counting_task(&runs)), ScheduleOutcome::Scheduled);
	assert!(slot.is_pending());

	sleep(Duration::from_millis(99)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 0);

	sleep(Duration::from_millis(2)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 1);
	assert!(!slot.is_pending());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_collapses_into_one_run() {
	let slot = slot("burst");
	let runs = Arc::new(AtomicUsize::new(0));

	assert_eq!(slot.schedule(Duration::from_millis(100), counting_task(&runs)), ScheduleOutcome::Scheduled);
	for _ in 0..5 {
		sleep(Duration::from_millis(40)).await;
		assert_eq!(slot.schedule(Duration::from_millis(100), counting_task(&runs)), ScheduleOutcome::Replaced);
	}

	sleep(Duration::from_millis(99)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 0, "delay restarts on every schedule");

	sleep(Duration::from_millis(10)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_drops_pending_task() {
	let slot = slot("cancel");
	let runs = Arc::new(AtomicUsize::new(0));

	slot.schedule(Duration::from_millis(100), counting_task(&runs));
	assert!(slot.cancel());
	assert!(!slot.cancel());

	sleep(Duration::from_millis(500)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 0);

	slot.schedule(Duration::from_millis(100), counting_task(&runs));
	sleep(Duration::from_millis(150)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 1, "slot stays usable after cancel");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn closed_slot_refuses_work() {
	let slot = slot("closed");
	let runs = Arc::new(AtomicUsize::new(0));

	slot.schedule(Duration::from_millis(100), counting_task(&runs));
	slot.close();
	assert!(slot.is_closed());
	assert_eq!(slot.schedule(Duration::from_millis(100), counting_task(&runs)), ScheduleOutcome::Closed);

	sleep(Duration::from_millis(500)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn zero_delay_runs_on_next_turn() {
	let slot = slot("zero");
	let runs = Arc::new(AtomicUsize::new(0));

	slot.schedule(Duration::ZERO, counting_task(&runs));
	assert_eq!(runs.load(Ordering::SeqCst), 0);

	sleep(Duration::from_millis(1)).await;
	assert_eq!(runs.load(Ordering::SeqCst), 1);
}
