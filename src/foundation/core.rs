use crate::foundation::error::{TrailError, TrailResult};

/// Inclusive blend-offset bounds `[min, max]`, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OffsetRange {
    /// Smallest allowed offset.
    pub min: usize,
    /// Largest allowed offset.
    pub max: usize,
}

impl OffsetRange {
    /// Create a validated range with `min <= max`.
    pub fn new(min: usize, max: usize) -> TrailResult<Self> {
        if min > max {
            return Err(TrailError::validation("OffsetRange min must be <= max"));
        }
        Ok(Self { min, max })
    }

    /// Return `true` when `offset` is inside `[min, max]`.
    pub fn contains(self, offset: usize) -> bool {
        self.min <= offset && offset <= self.max
    }

    /// Clamp an offset into this range.
    pub fn clamp(self, offset: usize) -> usize {
        offset.clamp(self.min, self.max)
    }
}

/// Straight (non-premultiplied) RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand to an opaque RGBA8 pixel.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
