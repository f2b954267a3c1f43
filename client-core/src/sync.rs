//! Bridge between service callbacks and threads waiting for loads.
//!
//! The service announces progress through one coarse `metadata_updated`
//! callback that never says which object changed. [`LoadNotifier`] turns
//! that into a broadcast: every waiter wakes on every signal and re-checks
//! its own predicate. Wasteful wakes are accepted; missed wakes are not.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};

/// Shared wake-up point for load waits on one session.
#[derive(Default)]
pub struct LoadNotifier {
    // Generation counter, only so the mutex guards *something*; waiters
    // never compare generations, they re-check their own predicate.
    generation: Mutex<u64>,
    cond: Condvar,
}

impl LoadNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wakes every waiter. Called from the service callback thread.
    pub fn notify_all(&self) {
        let mut generation = self.generation.lock();
        *generation = generation.wrapping_add(1);
        self.cond.notify_all();
    }

    /// Blocks until `loaded()` holds or `timeout` elapses.
    ///
    /// The predicate is evaluated under the notifier lock, so a signal
    /// arriving between the check and the wait cannot be lost. `None`
    /// waits indefinitely. The deadline is computed once up front;
    /// spurious and unrelated wakes do not extend it. On timeout the
    /// predicate gets one final check before the fault is reported.
    pub fn wait_until(
        &self,
        timeout: Option<Duration>,
        mut loaded: impl FnMut() -> bool,
    ) -> Result<()> {
        let deadline = timeout.map(|budget| (budget, Instant::now() + budget));
        let mut generation = self.generation.lock();
        loop {
            if loaded() {
                return Ok(());
            }
            match deadline {
                Some((budget, at)) => {
                    if self.cond.wait_until(&mut generation, at).timed_out() {
                        return if loaded() {
                            Ok(())
                        } else {
                            Err(Error::LoadTimeout { waited: budget })
                        };
                    }
                }
                None => self.cond.wait(&mut generation),
            }
        }
    }
}
