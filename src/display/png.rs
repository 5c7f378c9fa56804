use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::{debug, info};

use crate::display::sink::{DisplaySink, HudStatus};
use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::Frame;

/// Writes every displayed frame as `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Create the output directory if needed.
    pub fn create(dir: impl AsRef<Path>) -> TrailResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        info!(dir = %dir.display(), "writing frames as png");
        Ok(Self { dir, written: 0 })
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Path of the `n`-th output frame.
    pub fn frame_path(&self, n: u64) -> PathBuf {
        self.dir.join(format!("frame_{n:06}.png"))
    }
}

impl DisplaySink for PngSequenceSink {
    fn show(&mut self, frame: &Frame, hud: &HudStatus) -> TrailResult<()> {
        if frame.is_empty() {
            return Err(TrailError::display("refusing to write an empty frame"));
        }
        let path = self.frame_path(self.written);
        frame
            .to_rgba_image()?
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;

        debug!(path = %path.display(), color = ?hud.color.to_rgba(), "{hud}");
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/png.rs"]
mod tests;
