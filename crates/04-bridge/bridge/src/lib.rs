//! Glue objects that front a foreign (out-of-process or native) counterpart.
//!
//! A bridge owns an opaque handle to its counterpart and refuses every call
//! after teardown instead of dereferencing a dead handle. Observer
//! registration is a single slot replaced wholesale, matching the one-listener
//! shape of the delegating surfaces.

mod handle;
mod observer;
mod top_sites;

pub use handle::{BridgeError, BridgeResult, ForeignHandle};
pub use observer::ObserverSlot;
pub use top_sites::{SiteSuggestion, TopSitesBridge, TopSitesDelegate, TopSitesObserver};
