//! Deterministic test doubles for the notification stack.

use notify::{
    Clock, EntityId, Progress, ProgressHub, ProgressHubBuilder, ProgressNotifier,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One recorded notifier call, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotifyEvent {
    Progress(EntityId, Progress),
    Paused(EntityId),
    Interrupted(EntityId, bool),
    Succeeded(EntityId),
    Failed(EntityId),
    Canceled(EntityId),
}

/// Notifier that records every call for later assertion.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingNotifier {
    pub fn new_handle() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drains and returns everything recorded so far.
    pub fn take_events(&self) -> Vec<NotifyEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl ProgressNotifier for RecordingNotifier {
    fn notify_progress(&self, id: &EntityId, progress: Progress) {
        self.events
            .lock()
            .push(NotifyEvent::Progress(id.clone(), progress));
    }

    fn notify_paused(&self, id: &EntityId) {
        self.events.lock().push(NotifyEvent::Paused(id.clone()));
    }

    fn notify_interrupted(&self, id: &EntityId, resumable: bool) {
        self.events
            .lock()
            .push(NotifyEvent::Interrupted(id.clone(), resumable));
    }

    fn notify_succeeded(&self, id: &EntityId) {
        self.events.lock().push(NotifyEvent::Succeeded(id.clone()));
    }

    fn notify_failed(&self, id: &EntityId) {
        self.events.lock().push(NotifyEvent::Failed(id.clone()));
    }

    fn notify_canceled(&self, id: &EntityId) {
        self.events.lock().push(NotifyEvent::Canceled(id.clone()));
    }
}

/// Hand-cranked clock for deterministic coalescer tests.
#[derive(Default)]
pub struct ManualClock {
    ms: AtomicU64,
}

impl ManualClock {
    pub fn new_handle() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

pub const TEST_UPDATE_DELAY_MS: u64 = 500;

/// Builds a hub wired to a recording notifier and a manual clock, using the
/// standard test delay.
pub fn make_hub() -> (Arc<ProgressHub>, Arc<RecordingNotifier>, Arc<ManualClock>) {
    make_hub_with_delay(TEST_UPDATE_DELAY_MS)
}

/// Same as [`make_hub`] with an explicit minimum delay.
pub fn make_hub_with_delay(
    min_delay_ms: u64,
) -> (Arc<ProgressHub>, Arc<RecordingNotifier>, Arc<ManualClock>) {
    let notifier = RecordingNotifier::new_handle();
    let clock = ManualClock::new_handle();
    let hub = ProgressHubBuilder::new()
        .notifier(Arc::clone(&notifier) as Arc<dyn ProgressNotifier>)
        .clock(Arc::clone(&clock) as Arc<dyn Clock>)
        .min_delay_ms(min_delay_ms)
        .build()
        .expect("mock hub build");
    (hub, notifier, clock)
}
