use crate::capture::source::CaptureSource;
use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::Frame;

const BACKGROUND: [u8; 4] = [24, 24, 32, 255];
const FOREGROUND: [u8; 4] = [240, 220, 80, 255];

/// Deterministic test pattern: a bright square sliding left to right over a dark background.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    square: u32,
    speed: u32,
    produced: u64,
    limit: Option<u64>,
}

impl SyntheticSource {
    /// Create a pattern of `width x height`, optionally ending after `limit` frames.
    pub fn new(width: u32, height: u32, limit: Option<u64>) -> TrailResult<Self> {
        if width == 0 || height == 0 {
            return Err(TrailError::validation(
                "synthetic source dimensions must be non-zero",
            ));
        }
        Ok(Self {
            width,
            height,
            square: (width.min(height) / 4).max(1),
            speed: (width / 32).max(1),
            produced: 0,
            limit,
        })
    }

    /// Left edge of the square in frame `n`.
    pub fn square_x(&self, n: u64) -> u32 {
        let span = u64::from(self.width);
        ((n * u64::from(self.speed)) % span) as u32
    }

    /// Render frame `n` of the pattern.
    pub fn frame_at(&self, n: u64) -> TrailResult<Frame> {
        let mut frame = Frame::filled(self.width, self.height, BACKGROUND)?;
        let x0 = self.square_x(n);
        let y0 = (self.height - self.square.min(self.height)) / 2;
        let w = self.width as usize;
        for y in y0..(y0 + self.square).min(self.height) {
            for x in x0..(x0 + self.square).min(self.width) {
                let idx = (y as usize * w + x as usize) * 4;
                frame.data[idx..idx + 4].copy_from_slice(&FOREGROUND);
            }
        }
        Ok(frame)
    }
}

impl CaptureSource for SyntheticSource {
    fn read_frame(&mut self) -> TrailResult<Option<Frame>> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return Ok(None);
        }
        let frame = self.frame_at(self.produced)?;
        self.produced += 1;
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/synthetic.rs"]
mod tests;
