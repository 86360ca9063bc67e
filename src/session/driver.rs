//! Background timer driver.
//!
//! Polls a `MatchStore` at a fixed tick and fires every due timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use super::store::MatchStore;

/// Handle to the polling thread. Stops the thread when dropped.
#[derive(Debug)]
pub struct TimeoutDriver {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TimeoutDriver {
    /// Spawn the polling thread.
    pub fn spawn(store: Arc<MatchStore>, tick: Duration) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("triad-timeouts".into())
            .spawn(move || {
                info!(?tick, "timeout driver started");
                while !flag.load(Ordering::Acquire) {
                    for (match_id, outcome) in store.poll_timeouts() {
                        debug!(%match_id, ?outcome, "timer fired");
                    }
                    thread::sleep(tick);
                }
                info!("timeout driver stopped");
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            // A panicked driver has nothing left to clean up.
            let _ = handle.join();
        }
    }
}

impl Drop for TimeoutDriver {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
