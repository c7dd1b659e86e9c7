//! Mount guards for async work whose result targets a view that may
//! disappear before the work completes.
//!
//! The network call is not aborted. Its result is simply dropped when the
//! owning view is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owned by the view. Dropping it (or calling [`Mount::unmount`]) marks every
/// handle as stale.
#[derive(Debug)]
pub struct Mount {
    alive: Arc<AtomicBool>,
}

/// Captured by async handlers at setup time.
#[derive(Debug, Clone)]
pub struct MountHandle {
    alive: Arc<AtomicBool>,
}

impl Mount {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn handle(&self) -> MountHandle {
        MountHandle {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn unmount(self) {}
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl MountHandle {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
