use std::time::Duration;

use tracing::warn;

use crate::capture::source::CaptureSource;
use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::Frame;

/// Bounded retry with exponential backoff for frame reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay after the first failure; doubled on every further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff applied after failed attempt number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Read one frame, retrying transient failures.
    ///
    /// Returns `Ok(None)` at end of stream and [`TrailError::Capture`] once every attempt
    /// failed.
    pub fn fetch(&self, source: &mut dyn CaptureSource) -> TrailResult<Option<Frame>> {
        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            match source.read_frame() {
                Ok(frame) => return Ok(frame.filter(|f| !f.is_empty())),
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        ?delay,
                        error = %err,
                        "frame read failed"
                    );
                    last_err = Some(err);
                    if attempt < self.max_retries && !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }

        let reason = last_err.map(|e| e.to_string()).unwrap_or_default();
        Err(TrailError::capture(format!(
            "failed to read from {} after {} attempts: {reason}",
            source.describe(),
            u64::from(self.max_retries) + 1
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/retry.rs"]
mod tests;
