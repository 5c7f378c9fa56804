use std::fmt;

use crate::foundation::core::Rgb8;
use crate::foundation::error::TrailResult;
use crate::frame::Frame;

/// Status line shown next to each output frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudStatus {
    /// Measured output rate.
    pub fps: f64,
    /// Current blend offset in frames.
    pub delay: usize,
    /// Whether the blend source is frozen.
    pub frozen: bool,
    /// Text color for the status line.
    pub color: Rgb8,
}

impl fmt::Display for HudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FPS: {:.2}, Delay: {} (A/D keys to inc/dec), Freeze: {}",
            self.fps, self.delay, self.frozen
        )
    }
}

/// Consumer of rendered output frames, called once per displayed cycle.
pub trait DisplaySink {
    /// Present one frame with its status line.
    fn show(&mut self, frame: &Frame, hud: &HudStatus) -> TrailResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(Frame, HudStatus)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames in display order.
    pub fn frames(&self) -> &[(Frame, HudStatus)] {
        &self.frames
    }
}

impl DisplaySink for InMemorySink {
    fn show(&mut self, frame: &Frame, hud: &HudStatus) -> TrailResult<()> {
        self.frames.push((frame.clone(), *hud));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/sink.rs"]
mod tests;
