use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Single-observer registration slot.
///
/// The surfaces this crate fronts only ever have one listener; registering a
/// new one replaces the old wholesale. Reads are lock-free so emission paths
/// never contend with re-registration.
pub struct ObserverSlot<T: ?Sized> {
    current: ArcSwapOption<Box<T>>,
}

impl<T: ?Sized> ObserverSlot<T> {
    pub fn empty() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Installs `observer`, returning true when a previous observer was
    /// displaced.
    pub fn replace(&self, observer: Box<T>) -> bool {
        self.current.swap(Some(Arc::new(observer))).is_some()
    }

    pub fn clear(&self) {
        self.current.store(None);
    }

    pub fn is_registered(&self) -> bool {
        self.current.load().is_some()
    }

    /// Invokes `f` with the current observer, if one is registered.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.current.load().as_ref().map(|observer| f(observer))
    }
}

impl<T: ?Sized> Default for ObserverSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
