use crate::effects::filters::{add_weighted, blend, emboss, invert};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::Frame;

/// Immutable filter constants for the motion-trail effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Weight applied to the inverted delayed frame.
    pub invert_weight: f32,
    /// Weight of the current frame in the final blend; the inverted layer gets the rest.
    pub trail_alpha: f32,
    /// Run the emboss filter over the blended output.
    pub emboss: bool,
    /// Color used for the status overlay.
    pub hud_color: Rgb8,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            invert_weight: 0.5,
            trail_alpha: 0.4,
            emboss: false,
            hud_color: Rgb8::new(0, 255, 0),
        }
    }
}

impl EffectParams {
    /// Check that both weights are finite and inside `[0, 1]`.
    pub fn validate(&self) -> TrailResult<()> {
        for (name, v) in [
            ("invert_weight", self.invert_weight),
            ("trail_alpha", self.trail_alpha),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(TrailError::validation(format!(
                    "effect {name} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Motion extraction by blending the current frame with an inverted, delayed copy.
///
/// Static regions cancel out towards flat gray while anything that moved between the two frames
/// keeps its edges.
#[derive(Clone, Debug)]
pub struct MotionTrail {
    params: EffectParams,
}

impl MotionTrail {
    /// Build the effect from validated parameters.
    pub fn new(params: EffectParams) -> TrailResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Borrow the parameters.
    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    /// Blend `base` (current) with `delayed` (history blend source).
    pub fn render(&self, base: &Frame, delayed: &Frame) -> TrailResult<Frame> {
        let inverted = invert(delayed)?;
        let faded = add_weighted(&inverted, self.params.invert_weight, base, 0.0, 0.0)?;
        let out = blend(base, &faded, self.params.trail_alpha)?;
        if self.params.emboss {
            emboss(&out)
        } else {
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/trail.rs"]
mod tests;
