//! echotrail is a real-time motion-trail video effect.
//!
//! Frames pulled from a capture source are kept in a fixed-capacity history ring. Each cycle the
//! newest frame is blended with an inverted copy of a delayed one, which leaves moving edges
//! visible and cancels out the static background.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: a [`CaptureSource`] yields a [`Frame`], retried per [`RetryPolicy`]
//! 2. **Retain**: the frame is pushed into the [`FrameHistory`] (oldest evicted when full)
//! 3. **Blend**: [`FrameHistory::base_frame`] and [`FrameHistory::calc_blend_frame`] feed
//!    [`MotionTrail`]
//! 4. **Display**: the result goes to a [`DisplaySink`] together with a [`HudStatus`]
//! 5. **Input**: an [`InputSource`] may adjust the delay or freeze the blend source
//!
//! [`EffectPipeline`] runs this loop; [`FrameHistory`] is usable on its own for any frame type.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod capture;
mod config;
mod display;
mod effects;
mod foundation;
mod frame;
mod history;
mod input;
mod pipeline;

pub use capture::retry::RetryPolicy;
pub use capture::sequence::ImageSequenceSource;
pub use capture::source::CaptureSource;
pub use capture::synthetic::SyntheticSource;
pub use config::{
    DEFAULT_BLEND_OFFSET, DEFAULT_CAPACITY, MAX_BLEND_OFFSET, MIN_BLEND_OFFSET, TrailConfig,
};
pub use display::fps::FpsMeter;
pub use display::png::PngSequenceSink;
pub use display::sink::{DisplaySink, HudStatus, InMemorySink};
pub use effects::filters::{EMBOSS_KERNEL, add_weighted, blend, emboss, invert};
pub use effects::trail::{EffectParams, MotionTrail};
pub use foundation::core::{OffsetRange, Rgb8};
pub use foundation::error::{CapacityExceeded, TrailError, TrailResult};
pub use frame::Frame;
pub use history::ring::FrameHistory;
pub use history::shared::SharedFrameHistory;
pub use input::command::{Command, InputSource, NoInput};
pub use input::scripted::ScriptedInput;
pub use pipeline::{EffectPipeline, PipelineStats, StepOutcome};
