use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a deferred action owned by the calling process.
///
/// The token itself carries no behavior; it is routed back to the caller
/// through an [`ActionDispatcher`] when the user triggers the associated UI
/// element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionToken(pub u64);

pub type DispatchResult = Result<(), DispatchError>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("action {0:?} was canceled by its owner")]
    Canceled(ActionToken),

    #[error("no route back to the owner of action {0:?}")]
    Unroutable(ActionToken),
}

/// Delivery seam for caller-owned actions.
///
/// Implementations forward the token (plus an optional URL payload) to the
/// originating process. Delivery may fail at any time; the policy for
/// surfacing that failure belongs to the call site.
pub trait ActionDispatcher: Send + Sync {
    fn send(&self, action: ActionToken, url: Option<&str>) -> DispatchResult;
}
