use anyhow::Context as _;

use crate::foundation::error::{TrailError, TrailResult};

/// A captured or rendered video frame as RGBA8 pixels.
///
/// Pixels are straight alpha, tightly packed, row-major. Cloning deep-copies the pixel buffer,
/// and dropping a frame releases it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a frame, checking that `data` holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> TrailResult<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(TrailError::validation(format!(
                "frame data is {} bytes, expected {expected} for {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The zero-sized frame. Capture sources return it to signal end of stream.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> TrailResult<Self> {
        let len = rgba_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    /// Return `true` when the frame holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Read one pixel, or `None` when `(x, y)` is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Return `true` when both frames have the same dimensions.
    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Convert a decoded image buffer into a frame without copying.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Decode any image format supported by the `image` crate.
    pub fn decode(bytes: &[u8]) -> TrailResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
        Ok(Self::from_rgba_image(dyn_img.to_rgba8()))
    }

    /// Borrow the pixels as an `image` buffer (copies the bytes).
    pub fn to_rgba_image(&self) -> TrailResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            TrailError::validation(format!(
                "frame buffer does not match {}x{} rgba8",
                self.width, self.height
            ))
        })
    }
}

pub(crate) fn rgba_len(width: u32, height: u32) -> TrailResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TrailError::validation("frame buffer size overflow"))
}

#[cfg(test)]
#[path = "../tests/unit/frame/frame.rs"]
mod tests;
