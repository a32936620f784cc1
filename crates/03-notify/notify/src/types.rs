use thiserror::Error;

/// Identifies one tracked entity across its lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A point-in-time progress reading. `max` is `None` for indeterminate
/// transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub value: u64,
    pub max: Option<u64>,
}

impl Progress {
    pub fn new(value: u64, max: Option<u64>) -> Self {
        Self { value, max }
    }

    pub fn percent(value: u64) -> Self {
        Self {
            value,
            max: Some(100),
        }
    }

    pub fn indeterminate() -> Self {
        Self {
            value: 0,
            max: None,
        }
    }
}

/// What happened to a submitted progress update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Emitted to the notifier immediately.
    Emitted,
    /// Buffered; the pending deadline will emit it.
    Deferred,
    /// Replaced an update that was already buffered.
    Coalesced,
    /// The entity already reached a terminal state.
    Rejected,
}

pub type NotifyResult<T> = Result<T, NotifyError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("entity {0:?} already reached a terminal state")]
    AlreadyFinished(EntityId),
}
