use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use crate::capture::retry::RetryPolicy;
use crate::effects::trail::EffectParams;
use crate::foundation::core::OffsetRange;
use crate::foundation::error::{TrailError, TrailResult};
use crate::history::ring::FrameHistory;

/// Slots in the frame history.
pub const DEFAULT_CAPACITY: usize = 110;
/// Initial delay in frames.
pub const DEFAULT_BLEND_OFFSET: usize = 3;
/// Smallest delay the user can select.
pub const MIN_BLEND_OFFSET: usize = 1;
/// Largest delay the user can select.
pub const MAX_BLEND_OFFSET: usize = DEFAULT_CAPACITY - 1;

/// Pipeline configuration, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrailConfig {
    /// Frame history capacity.
    pub capacity: usize,
    /// Initial blend offset.
    pub blend_offset: usize,
    /// Lower offset bound.
    pub min_offset: usize,
    /// Upper offset bound; must be below `capacity`.
    pub max_offset: usize,
    /// Lock the delay to this value; offset commands are ignored.
    pub fixed_offset: Option<usize>,
    /// Frame read retries after the first attempt.
    pub max_retries: u32,
    /// First retry backoff in milliseconds, doubled per retry.
    pub retry_base_delay_ms: u64,
    /// Pause between pipeline cycles in milliseconds.
    pub frame_interval_ms: u64,
    /// Stop after this many captured frames.
    pub max_frames: Option<u64>,
    /// Filter constants.
    pub effect: EffectParams,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            blend_offset: DEFAULT_BLEND_OFFSET,
            min_offset: MIN_BLEND_OFFSET,
            max_offset: MAX_BLEND_OFFSET,
            fixed_offset: None,
            max_retries: 5,
            retry_base_delay_ms: 1,
            frame_interval_ms: 30,
            max_frames: None,
            effect: EffectParams::default(),
        }
    }
}

impl TrailConfig {
    /// Parse a configuration from any JSON reader.
    pub fn from_reader(r: impl Read) -> TrailResult<Self> {
        serde_json::from_reader(r).map_err(|e| TrailError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TrailResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TrailError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field for consistency.
    pub fn validate(&self) -> TrailResult<()> {
        let range = self.offset_range()?;
        if self.capacity == 0 {
            return Err(TrailError::validation("capacity must be >= 1"));
        }
        if range.max >= self.capacity {
            return Err(TrailError::validation(format!(
                "max_offset {} must be < capacity {}",
                range.max, self.capacity
            )));
        }
        if let Some(fixed) = self.fixed_offset
            && !range.contains(fixed)
        {
            return Err(TrailError::validation(format!(
                "fixed_offset {fixed} must be within [{}, {}]",
                range.min, range.max
            )));
        }
        self.effect.validate()
    }

    /// Offset bounds as a validated range.
    pub fn offset_range(&self) -> TrailResult<OffsetRange> {
        OffsetRange::new(self.min_offset, self.max_offset)
    }

    /// Retry policy for frame reads.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
        }
    }

    /// Pause between pipeline cycles.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Build an empty history with this configuration's capacity and offsets.
    pub fn build_history<F>(&self) -> TrailResult<FrameHistory<F>> {
        let initial = self.fixed_offset.unwrap_or(self.blend_offset);
        FrameHistory::new(self.capacity, initial, self.offset_range()?)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
