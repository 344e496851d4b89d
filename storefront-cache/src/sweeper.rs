//! Background sweep task removing expired entries.

use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span};

use crate::cache::TtlCache;

/// Handle to a running sweep task.
///
/// The task runs until [`shutdown`](SweeperHandle::shutdown) is called.
/// Dropping the handle without shutting down leaves the task running for
/// the lifetime of the runtime, like a detached `JoinHandle`.
#[derive(Debug)]
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Returns `true` once the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the sweep task.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl TtlCache {
    /// Starts the background sweeper on the current tokio runtime.
    ///
    /// The task removes expired entries on the configured interval. Each
    /// call spawns an independent task; callers are expected to start one
    /// sweeper per cache and shut it down on teardown.
    pub fn start_sweeper(&self) -> SweeperHandle {
        let cache = self.clone();
        let interval = cache.inner.config.sweep_interval;
        let span = info_span!("cache_sweeper", interval_ms = interval.as_millis() as u64);

        let handle = tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                // The first tick fires immediately; skip it so a freshly
                // started sweeper does not race test writes.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    let removed = cache.remove_expired();
                    if removed > 0 {
                        debug!(removed, "swept expired cache entries");
                    }
                }
            }
            .instrument(span),
        );

        SweeperHandle { handle }
    }
}
