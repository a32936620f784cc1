//! Rate-limited progress notifications.
//!
//! High-frequency progress signals for an entity (one download, one fetch)
//! are coalesced so at most one notification is emitted per minimum delay
//! window, while terminal events bypass the limiter and are never dropped.
//! Emission goes through the [`ProgressNotifier`] seam; time comes from the
//! [`Clock`] seam so the whole machine is deterministic under test.

mod clock;
mod hub;
mod lane;
mod notifier;
mod pump;
mod types;

pub use clock::{Clock, SystemClock};
pub use hub::{ProgressHub, ProgressHubBuilder, DEFAULT_UPDATE_DELAY_MS};
pub use notifier::ProgressNotifier;
pub use pump::{spawn_pump, PumpHandle};
pub use types::{EntityId, NotifyError, NotifyResult, Progress, SubmitOutcome};
