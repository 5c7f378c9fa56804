//! Stateless per-pixel filters over RGBA8 [`Frame`]s.
//!
//! Filters touch the RGB channels only; alpha is carried over from the first input. Rows are
//! processed in parallel on the global rayon pool.

use rayon::prelude::*;

use crate::foundation::error::{TrailError, TrailResult};
use crate::frame::{Frame, rgba_len};

/// 3x3 emboss kernel, row-major.
pub const EMBOSS_KERNEL: [[i32; 3]; 3] = [[-2, -1, 0], [-1, 1, 1], [0, 1, 2]];

/// Invert the RGB channels.
pub fn invert(src: &Frame) -> TrailResult<Frame> {
    check_buffer(src, "invert")?;
    let mut data = src.data.clone();
    data.par_chunks_exact_mut(4).for_each(|px| {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    });
    Ok(Frame {
        width: src.width,
        height: src.height,
        data,
    })
}

/// Saturating `a * alpha + b * beta + gamma` per RGB channel.
pub fn add_weighted(a: &Frame, alpha: f32, b: &Frame, beta: f32, gamma: f32) -> TrailResult<Frame> {
    check_buffer(a, "add_weighted")?;
    check_buffer(b, "add_weighted")?;
    if !a.same_size(b) {
        return Err(TrailError::validation(format!(
            "add_weighted expects equal sizes, got {}x{} and {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    if !(alpha.is_finite() && beta.is_finite() && gamma.is_finite()) {
        return Err(TrailError::validation("add_weighted weights must be finite"));
    }

    let mut data = vec![0u8; a.data.len()];
    data.par_chunks_exact_mut(4)
        .zip(a.data.par_chunks_exact(4))
        .zip(b.data.par_chunks_exact(4))
        .for_each(|((d, pa), pb)| {
            for c in 0..3 {
                d[c] = saturate_u8(f32::from(pa[c]) * alpha + f32::from(pb[c]) * beta + gamma);
            }
            d[3] = pa[3];
        });

    Ok(Frame {
        width: a.width,
        height: a.height,
        data,
    })
}

/// Linear blend: `a * alpha + b * (1 - alpha)`.
pub fn blend(a: &Frame, b: &Frame, alpha: f32) -> TrailResult<Frame> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(TrailError::validation("blend alpha must be in [0, 1]"));
    }
    add_weighted(a, alpha, b, 1.0 - alpha, 0.0)
}

/// Apply [`EMBOSS_KERNEL`] with a reflected border (`cba|abc`).
pub fn emboss(src: &Frame) -> TrailResult<Frame> {
    check_buffer(src, "emboss")?;
    if src.is_empty() {
        return Ok(src.clone());
    }

    let w = src.width as usize;
    let h = src.height as usize;
    let mut data = vec![0u8; src.data.len()];
    data.par_chunks_exact_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let mut acc = [0i32; 3];
                for (ky, krow) in EMBOSS_KERNEL.iter().enumerate() {
                    let sy = reflect(y as isize + ky as isize - 1, h);
                    for (kx, &kw) in krow.iter().enumerate() {
                        let sx = reflect(x as isize + kx as isize - 1, w);
                        let idx = (sy * w + sx) * 4;
                        for c in 0..3 {
                            acc[c] += kw * i32::from(src.data[idx + c]);
                        }
                    }
                }
                let out = x * 4;
                for c in 0..3 {
                    row[out + c] = acc[c].clamp(0, 255) as u8;
                }
                row[out + 3] = src.data[(y * w + x) * 4 + 3];
            }
        });

    Ok(Frame {
        width: src.width,
        height: src.height,
        data,
    })
}

fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let r = if i < 0 {
        -i - 1
    } else if i >= n {
        2 * n - i - 1
    } else {
        i
    };
    r.clamp(0, n - 1) as usize
}

fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn check_buffer(f: &Frame, op: &str) -> TrailResult<()> {
    if f.data.len() != rgba_len(f.width, f.height)? {
        return Err(TrailError::validation(format!(
            "{op} expects a {}x{} rgba8 buffer",
            f.width, f.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;
