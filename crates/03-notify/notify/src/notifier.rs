use crate::types::{EntityId, Progress};

/// Emission seam for per-entity state notifications.
///
/// Implementations render to whatever surface the shell uses (system tray,
/// in-app banner, test recorder). Calls arrive synchronously on the thread
/// that triggered the emission and must not block for long.
pub trait ProgressNotifier: Send + Sync {
    fn notify_progress(&self, id: &EntityId, progress: Progress);
    fn notify_paused(&self, id: &EntityId);
    fn notify_interrupted(&self, id: &EntityId, resumable: bool);
    fn notify_succeeded(&self, id: &EntityId);
    fn notify_failed(&self, id: &EntityId);
    fn notify_canceled(&self, id: &EntityId);
}
