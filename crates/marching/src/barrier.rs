//! Reusable phase barrier for a fixed worker pool.
//!
//! Behaves like [`std::sync::Barrier`] but can be aborted. A worker that
//! fails or panics, or a pool that cannot start all of its threads, aborts the
//! barrier so the remaining workers return an error instead of waiting
//! forever for a party that will never arrive.

use std::sync::{Condvar, Mutex, MutexGuard};

use contour_common::{ContourError, ContourResult};

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

/// A barrier for `parties` threads that can be reused across phases.
#[derive(Debug)]
pub struct PhaseBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl PhaseBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
                aborted: false,
            }),
            released: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BarrierState> {
        // The state is plain counters; a poisoned lock still holds valid data
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Block until all parties have called `wait` for the current phase.
    ///
    /// Returns `Ok(true)` for exactly one party per phase (the last to
    /// arrive) and `Ok(false)` for the others.
    pub fn wait(&self) -> ContourResult<bool> {
        let mut state = self.lock();
        if state.aborted {
            return Err(ContourError::BarrierAborted);
        }

        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return Ok(true);
        }

        let generation = state.generation;
        while state.generation == generation && !state.aborted {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }

        if state.generation == generation {
            Err(ContourError::BarrierAborted)
        } else {
            Ok(false)
        }
    }

    /// Release every current and future waiter with `BarrierAborted`.
    pub fn abort(&self) {
        let mut state = self.lock();
        if !state.aborted {
            state.aborted = true;
            tracing::warn!(
                arrived = state.arrived,
                parties = self.parties,
                "phase barrier aborted"
            );
        }
        self.released.notify_all();
    }

    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    /// Guard that aborts the barrier when dropped, unless disarmed first.
    ///
    /// A worker holds it across its phases and disarms it after its last
    /// wait, so an early return or a panic releases the other parties.
    pub fn abort_guard(&self) -> AbortGuard<'_> {
        AbortGuard {
            barrier: self,
            armed: true,
        }
    }
}

/// Returned by [`PhaseBarrier::abort_guard`].
pub struct AbortGuard<'a> {
    barrier: &'a PhaseBarrier,
    armed: bool,
}

impl AbortGuard<'_> {
    /// Drop the guard without aborting.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.barrier.abort();
        }
    }
}
