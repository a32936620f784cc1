//! Untyped key-value payloads exchanged with external caller processes.
//!
//! An [`ExtrasBag`] is the heterogeneous bag of values a third-party caller
//! attaches to a launch request. Callers are untrusted, so every accessor is
//! total: a missing key or a value of the wrong shape yields the supplied
//! default instead of an error.

mod action;
mod bag;
mod value;

pub use action::{ActionDispatcher, ActionToken, DispatchError, DispatchResult};
pub use bag::ExtrasBag;
pub use value::{ExtraValue, ImageData};
