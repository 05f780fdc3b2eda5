//! Zone weighting — how strongly a zone applies at a given luminance.
//!
//! # Formula
//! With `f = max(falloff, ε)`:
//! ```text
//! Low:   stop >= edge        → 0
//!        stop <= edge − f    → 1
//!        otherwise           → 1 − smoothstep((stop − (edge − f)) / f)
//!
//! High:  stop <= edge        → 0
//!        stop >= edge + f    → 1
//!        otherwise           → smoothstep((stop − edge) / f)
//!
//! smoothstep(t) = t² (3 − 2t)
//! ```
//!
//! The cubic has zero slope at both ends of the band, so the weight is C¹
//! across both breakpoints. Weights are evaluated independently per curve
//! sample and per pixel; a kink here shows up as banding in the image.

use crate::zones::{Direction, Zone};

/// Smallest transition width, in stops. A zero falloff becomes a near-hard edge.
pub const FALLOFF_EPSILON: f32 = 0.01;

/// Cubic Hermite ease on `[0, 1]`: `t² (3 − 2t)`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Weight in `[0, 1]` of a one-sided band with cutoff `edge`.
#[inline]
pub fn falloff_weight(stop: f32, edge: f32, falloff: f32, direction: Direction) -> f32 {
    let f = falloff.max(FALLOFF_EPSILON);

    match direction {
        Direction::Low => {
            if stop >= edge {
                return 0.0;
            }
            if stop <= edge - f {
                return 1.0;
            }
            let t = (stop - (edge - f)) / f;
            1.0 - smoothstep(t.clamp(0.0, 1.0))
        }
        Direction::High => {
            if stop <= edge {
                return 0.0;
            }
            if stop >= edge + f {
                return 1.0;
            }
            let t = (stop - edge) / f;
            smoothstep(t.clamp(0.0, 1.0))
        }
    }
}

/// Influence of `zone` on a pixel whose luminance sits at `stop`.
///
/// Disabled zones return 0 unconditionally.
#[inline]
pub fn zone_weight(stop: f32, zone: &Zone) -> f32 {
    if !zone.enabled {
        return 0.0;
    }
    falloff_weight(stop, zone.range_end, zone.falloff, zone.direction)
}
