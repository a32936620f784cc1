use parking_lot::Mutex;
use std::num::NonZeroU64;
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("bridge counterpart already destroyed")]
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HandleState {
    Live(NonZeroU64),
    Destroyed,
}

/// Lifecycle-tracked handle to a foreign counterpart object.
///
/// The owning bridge is the only holder. Every use goes through [`with`],
/// which fails once [`destroy`] has run, so a late callback can never reach a
/// dead counterpart.
///
/// [`with`]: ForeignHandle::with
/// [`destroy`]: ForeignHandle::destroy
pub struct ForeignHandle {
    state: Mutex<HandleState>,
}

impl ForeignHandle {
    pub fn new(raw: NonZeroU64) -> Self {
        Self {
            state: Mutex::new(HandleState::Live(raw)),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(*self.state.lock(), HandleState::Live(_))
    }

    /// Runs `f` with the raw handle while it is still live.
    pub fn with<R>(&self, f: impl FnOnce(u64) -> R) -> BridgeResult<R> {
        match *self.state.lock() {
            HandleState::Live(raw) => Ok(f(raw.get())),
            HandleState::Destroyed => Err(BridgeError::Destroyed),
        }
    }

    /// Tears the handle down. Idempotent; returns the raw value on the first
    /// call so the caller can release the counterpart.
    pub fn destroy(&self) -> Option<u64> {
        let mut state = self.state.lock();
        match *state {
            HandleState::Live(raw) => {
                *state = HandleState::Destroyed;
                Some(raw.get())
            }
            HandleState::Destroyed => None,
        }
    }
}
