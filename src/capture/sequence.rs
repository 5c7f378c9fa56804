use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::debug;

use crate::capture::source::CaptureSource;
use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::Frame;

const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Replays image files from a directory, in file-name order.
#[derive(Debug)]
pub struct ImageSequenceSource {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    next: usize,
    looped: bool,
}

impl ImageSequenceSource {
    /// Index the image files in `dir`. Files are decoded lazily on read.
    pub fn open(dir: impl AsRef<Path>) -> TrailResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("read frame directory '{}'", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("list frame directory '{}'", dir.display()))?
                .path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if is_image && path.is_file() {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(TrailError::validation(format!(
                "no image frames found in '{}'",
                dir.display()
            )));
        }
        paths.sort();
        debug!(dir = %dir.display(), frames = paths.len(), "indexed image sequence");

        Ok(Self {
            dir,
            paths,
            next: 0,
            looped: false,
        })
    }

    /// Restart from the first file instead of ending the stream.
    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Number of indexed frames.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false`: opening fails on an empty directory.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl CaptureSource for ImageSequenceSource {
    fn read_frame(&mut self) -> TrailResult<Option<Frame>> {
        if self.next >= self.paths.len() {
            if !self.looped {
                return Ok(None);
            }
            self.next = 0;
        }

        let path = &self.paths[self.next];
        let bytes =
            std::fs::read(path).with_context(|| format!("read frame '{}'", path.display()))?;
        let frame = Frame::decode(&bytes)?;
        self.next += 1;
        Ok(Some(frame))
    }

    fn describe(&self) -> String {
        format!("image sequence '{}'", self.dir.display())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequence.rs"]
mod tests;
