use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::error::{TrailError, TrailResult};
use crate::history::ring::FrameHistory;

/// Cloneable handle for a [`FrameHistory`] shared between a capture thread and a display thread.
///
/// Every call holds one lock for its whole duration, so readers never observe a half-finished
/// write (for example a new frame installed before the write cursor advances).
pub struct SharedFrameHistory<F> {
    inner: Arc<Mutex<FrameHistory<F>>>,
}

impl<F> Clone for SharedFrameHistory<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> SharedFrameHistory<F> {
    /// Wrap an existing history.
    pub fn new(history: FrameHistory<F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    /// Run `f` with exclusive access to the history.
    pub fn with<R>(&self, f: impl FnOnce(&mut FrameHistory<F>) -> R) -> TrailResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Sliding-window push under the lock. Returns the evicted frame, if any.
    pub fn push(&self, frame: F) -> TrailResult<Option<F>> {
        self.with(|h| h.push(frame))
    }

    /// Run `f` on the `(base, blend)` pair read under one lock.
    ///
    /// Returns `Ok(None)` when either frame is not available yet.
    pub fn blend_pair<R>(&self, f: impl FnOnce(&F, &F) -> R) -> TrailResult<Option<R>> {
        let guard = self.lock()?;
        Ok(match (guard.base_frame(), guard.calc_blend_frame()) {
            (Some(base), Some(blend)) => Some(f(base, blend)),
            _ => None,
        })
    }

    /// See [`FrameHistory::inc_blend_offset`].
    pub fn inc_blend_offset(&self) -> TrailResult<usize> {
        self.with(|h| h.inc_blend_offset())
    }

    /// See [`FrameHistory::dec_blend_offset`].
    pub fn dec_blend_offset(&self) -> TrailResult<usize> {
        self.with(|h| h.dec_blend_offset())
    }

    fn lock(&self) -> TrailResult<MutexGuard<'_, FrameHistory<F>>> {
        self.inner
            .lock()
            .map_err(|_| TrailError::Other(anyhow::anyhow!("frame history lock poisoned")))
    }
}

impl<F: Clone> SharedFrameHistory<F> {
    /// See [`FrameHistory::toggle_freeze`].
    pub fn toggle_freeze(&self) -> TrailResult<bool> {
        self.with(|h| h.toggle_freeze())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/shared.rs"]
mod tests;
