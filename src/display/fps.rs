use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frame-rate estimate refreshed once per second of wall time.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frames: u32,
    window_start: Instant,
    fps: f64,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsMeter {
    /// Start measuring now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start measuring from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            frames: 0,
            window_start: start,
            fps: 0.0,
        }
    }

    /// Count one frame and return the current estimate.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Count one frame observed at `now`.
    ///
    /// The estimate stays at its previous value until more than one second has elapsed since the
    /// window started.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed > WINDOW {
            self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    /// Last computed estimate.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/fps.rs"]
mod tests;
