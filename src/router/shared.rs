//! Hot-swappable router handle.
//!
//! Readers take a snapshot with [`SharedRouter::load`]; a reload stores a
//! freshly built router. In-flight lookups keep using the snapshot they
//! loaded, so a swap never blocks or tears a lookup.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::router::Router;

/// A [`Router`] that can be replaced while other threads are routing.
#[derive(Debug)]
pub struct SharedRouter<T> {
    current: ArcSwap<Router<T>>,
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Snapshot of the router in effect now.
    pub fn load(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    /// Install `router` for all subsequent lookups.
    pub fn store(&self, router: Router<T>) {
        self.current.store(Arc::new(router));
    }

    /// Install `router` and return the one it replaced.
    pub fn replace(&self, router: Router<T>) -> Arc<Router<T>> {
        self.current.swap(Arc::new(router))
    }
}

impl<T> From<Router<T>> for SharedRouter<T> {
    fn from(router: Router<T>) -> Self {
        Self::new(router)
    }
}
