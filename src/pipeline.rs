use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::capture::retry::RetryPolicy;
use crate::capture::source::CaptureSource;
use crate::config::TrailConfig;
use crate::display::fps::FpsMeter;
use crate::display::sink::{DisplaySink, HudStatus};
use crate::effects::trail::MotionTrail;
use crate::foundation::error::TrailResult;
use crate::frame::Frame;
use crate::history::ring::FrameHistory;
use crate::input::command::{Command, InputSource};

/// Result of one pipeline cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep going.
    Continue,
    /// The capture source has no more frames.
    EndOfStream,
    /// The user asked to stop.
    Quit,
}

/// Counters accumulated over a pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames pulled from the capture source.
    pub frames_captured: u64,
    /// Frames handed to the display sink.
    pub frames_shown: u64,
    /// Cycles with no usable blend source yet (or mismatched frame sizes).
    pub frames_skipped: u64,
    /// Offset and freeze commands that changed the history state.
    pub commands_applied: u64,
}

/// Capture -> history -> motion trail -> display loop.
///
/// The pipeline owns the frame history; capture, display and input are borrowed per call so
/// callers keep ownership of their devices.
pub struct EffectPipeline {
    history: FrameHistory<Frame>,
    trail: MotionTrail,
    fps: FpsMeter,
    retry: RetryPolicy,
    frame_interval: Duration,
    max_frames: Option<u64>,
    offset_locked: bool,
    stats: PipelineStats,
}

impl EffectPipeline {
    /// Build a pipeline from a validated configuration.
    pub fn new(cfg: &TrailConfig) -> TrailResult<Self> {
        cfg.validate()?;
        Ok(Self {
            history: cfg.build_history()?,
            trail: MotionTrail::new(cfg.effect.clone())?,
            fps: FpsMeter::new(),
            retry: cfg.retry_policy(),
            frame_interval: cfg.frame_interval(),
            max_frames: cfg.max_frames,
            offset_locked: cfg.fixed_offset.is_some(),
            stats: PipelineStats::default(),
        })
    }

    /// Borrow the frame history.
    pub fn history(&self) -> &FrameHistory<Frame> {
        &self.history
    }

    /// Counters so far.
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Apply a user command to the history. Returns `true` when the command changed the
    /// blend offset or the freeze state.
    ///
    /// Offset commands already at their clamp and a freeze on an empty history are no-ops.
    /// [`Command::Quit`] is handled by [`EffectPipeline::step`] and never applies here.
    pub fn apply(&mut self, cmd: Command) -> bool {
        let before = (self.history.blend_offset(), self.history.is_frozen());
        match cmd {
            Command::None | Command::Quit => return false,
            Command::DecreaseOffset | Command::IncreaseOffset if self.offset_locked => {
                debug!(?cmd, "offset is fixed, command ignored");
                return false;
            }
            Command::DecreaseOffset => {
                self.history.dec_blend_offset();
            }
            Command::IncreaseOffset => {
                self.history.inc_blend_offset();
            }
            Command::ToggleFreeze => {
                self.history.toggle_freeze();
            }
        }

        let changed = before != (self.history.blend_offset(), self.history.is_frozen());
        if changed {
            self.stats.commands_applied += 1;
        } else {
            trace!(?cmd, offset = before.0, "command had no effect");
        }
        changed
    }

    /// Run one cycle: fetch, push, blend, show, poll input.
    pub fn step(
        &mut self,
        capture: &mut dyn CaptureSource,
        display: &mut dyn DisplaySink,
        input: &mut dyn InputSource,
    ) -> TrailResult<StepOutcome> {
        let Some(frame) = self.retry.fetch(capture)? else {
            return Ok(StepOutcome::EndOfStream);
        };
        self.stats.frames_captured += 1;
        self.history.push(frame);

        self.present(display)?;

        match input.poll_command() {
            Command::Quit => Ok(StepOutcome::Quit),
            cmd => {
                self.apply(cmd);
                Ok(StepOutcome::Continue)
            }
        }
    }

    /// Loop until end of stream, quit, or the configured frame limit.
    #[tracing::instrument(skip_all, fields(source = %capture.describe()))]
    pub fn run(
        &mut self,
        capture: &mut dyn CaptureSource,
        display: &mut dyn DisplaySink,
        input: &mut dyn InputSource,
    ) -> TrailResult<PipelineStats> {
        info!(
            capacity = self.history.capacity(),
            offset = self.history.blend_offset(),
            "pipeline started"
        );

        loop {
            if let Some(max) = self.max_frames
                && self.stats.frames_captured >= max
            {
                info!(max, "frame limit reached");
                break;
            }

            match self.step(capture, display, input)? {
                StepOutcome::Continue => {}
                StepOutcome::EndOfStream => {
                    info!("end of stream");
                    break;
                }
                StepOutcome::Quit => {
                    info!("quit requested");
                    break;
                }
            }

            if !self.frame_interval.is_zero() {
                std::thread::sleep(self.frame_interval);
            }
        }

        info!(
            captured = self.stats.frames_captured,
            shown = self.stats.frames_shown,
            skipped = self.stats.frames_skipped,
            "pipeline stopped"
        );
        Ok(self.stats)
    }

    fn present(&mut self, display: &mut dyn DisplaySink) -> TrailResult<()> {
        let (Some(base), Some(delayed)) =
            (self.history.base_frame(), self.history.calc_blend_frame())
        else {
            trace!(retained = self.history.len(), "blend source not available yet");
            self.stats.frames_skipped += 1;
            return Ok(());
        };

        if !base.same_size(delayed) {
            warn!(
                base = ?(base.width, base.height),
                delayed = ?(delayed.width, delayed.height),
                "frame size changed, skipping blend"
            );
            self.stats.frames_skipped += 1;
            return Ok(());
        }

        let out = self.trail.render(base, delayed)?;
        let hud = HudStatus {
            fps: self.fps.tick(),
            delay: self.history.blend_offset(),
            frozen: self.history.is_frozen(),
            color: self.trail.params().hud_color,
        };
        display.show(&out, &hud)?;
        self.stats.frames_shown += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
