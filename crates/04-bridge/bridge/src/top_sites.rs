use crate::handle::{BridgeResult, ForeignHandle};
use crate::observer::ObserverSlot;
use log::debug;
use serde::Serialize;
use std::num::NonZeroU64;
use std::sync::Arc;

/// One ranked site produced by the foreign ranking engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteSuggestion {
    pub title: String,
    pub url: String,
}

/// The foreign counterpart: ranking and usage recording live on the other
/// side of the boundary, keyed by the raw handle.
pub trait TopSitesDelegate: Send + Sync {
    fn query_sites(&self, raw: u64, limit: usize) -> Vec<SiteSuggestion>;
    fn record_opened(&self, raw: u64, url: &str);
}

/// Receiver for ranked-site refreshes.
pub trait TopSitesObserver: Send + Sync {
    fn on_sites_changed(&self, sites: &[SiteSuggestion]);
}

/// Shell-side front for the most-visited-sites engine.
///
/// Holds the only reference to the foreign counterpart; once destroyed,
/// every operation reports [`crate::BridgeError::Destroyed`] instead of
/// touching the dead handle.
pub struct TopSitesBridge {
    handle: ForeignHandle,
    delegate: Arc<dyn TopSitesDelegate>,
    observer: ObserverSlot<dyn TopSitesObserver>,
}

impl TopSitesBridge {
    pub fn new(raw: NonZeroU64, delegate: Arc<dyn TopSitesDelegate>) -> Self {
        Self {
            handle: ForeignHandle::new(raw),
            delegate,
            observer: ObserverSlot::empty(),
        }
    }

    /// Installs the observer, replacing any previous registration.
    pub fn set_observer(&self, observer: Box<dyn TopSitesObserver>) {
        if self.observer.replace(observer) {
            debug!("top-sites observer replaced");
        }
    }

    pub fn clear_observer(&self) {
        self.observer.clear();
    }

    /// Re-queries the ranking engine and fans the result to the observer.
    pub fn refresh(&self, limit: usize) -> BridgeResult<Vec<SiteSuggestion>> {
        let sites = self
            .handle
            .with(|raw| self.delegate.query_sites(raw, limit))?;
        self.observer.with(|observer| observer.on_sites_changed(&sites));
        Ok(sites)
    }

    /// Records that the user opened `url` from the suggestions surface.
    pub fn record_opened(&self, url: &str) -> BridgeResult<()> {
        self.handle.with(|raw| self.delegate.record_opened(raw, url))
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_live()
    }

    /// Tears down the foreign counterpart and drops the observer.
    pub fn destroy(&self) {
        if self.handle.destroy().is_some() {
            self.observer.clear();
        }
    }
}
