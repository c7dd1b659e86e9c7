//! Single-flight async memoization.
//!
//! While an operation is in progress every new caller joins the pending
//! result instead of starting another one. The slot is emptied by the
//! operation itself the moment it settles, so the next caller after that
//! starts a fresh run.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

type InFlight<T> = Shared<BoxFuture<'static, T>>;

pub struct SingleFlight<T: Clone + Send + Sync + 'static> {
    slot: Arc<Mutex<Option<InFlight<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> Clone for SingleFlight<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> std::fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight").finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs `start()` unless a run is already pending, in which case the
    /// pending result is awaited instead. `start` is not called at all when
    /// joining.
    pub async fn run<F, Fut>(&self, start: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let pending = {
            let mut slot = self.slot.lock().await;
            match slot.as_ref() {
                Some(pending) => {
                    log::debug!("Joining in-flight operation");
                    pending.clone()
                }
                None => {
                    let operation = start();
                    let slot_handle = Arc::clone(&self.slot);
                    let pending = async move {
                        let output = operation.await;
                        // Settled: the next caller must start over.
                        slot_handle.lock().await.take();
                        output
                    }
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    pub async fn is_in_flight(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
