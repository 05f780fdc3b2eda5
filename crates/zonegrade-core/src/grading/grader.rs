//! Per-pixel zone grading of 8-bit RGB(A) buffers.
//!
//! # Pipeline
//! For every pixel, independently:
//! ```text
//!   decode ──→ luminance ──→ stops ──→ Σ zone weights
//!      │                                    │
//!      └──→ × 2^exposure ──→ saturation about post-exposure luma ──→ encode
//! ```
//! Exposure is a linear multiplier on all three channels, which keeps
//! channel ratios (hue) intact. Saturation is then applied against the
//! luminance of the exposed pixel:
//! ```text
//! c' = y_out + (c − y_out) × saturation
//! ```
//! Encoding clamps to `[0, 255]`; alpha is copied through.

use serde::{Deserialize, Serialize};

use crate::color_management::exposure::{linear_to_stop, luminance_rgb};
use crate::color_management::transfer::{encode_u8, DecodeTable, Transfer};
use crate::grading::weight::zone_weight;
use crate::image::PixelBuffer;
use crate::parallel;
use crate::zones::Zone;

/// Largest exposure magnitude, in stops, applied to a pixel. Beyond this the
/// gain is far outside the 8-bit range anyway, and `2^exposure` stays finite
/// in `f32`.
pub const MAX_EXPOSURE_STOPS: f32 = 64.0;

/// Knobs for a grading pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeOptions {
    /// Curve used to decode and re-encode 8-bit samples.
    pub transfer: Transfer,
    /// Spread large buffers across the rayon pool.
    pub parallel: bool,
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            transfer: Transfer::Gamma22,
            parallel: true,
        }
    }
}

/// Summed zone adjustment at one luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneAdjustment {
    /// Stop offset; the pixel is multiplied by `2^exposure`.
    pub exposure: f32,
    /// Saturation factor, never negative. 1.0 = unchanged.
    pub saturation: f32,
}

impl ZoneAdjustment {
    pub const IDENTITY: Self = Self {
        exposure: 0.0,
        saturation: 1.0,
    };
}

/// A prepared grading pass over a zone snapshot.
///
/// Holds only the zones that can change a pixel, plus a decode table for the
/// chosen transfer curve. Build once per parameter change, then grade any
/// number of buffers.
#[derive(Debug, Clone)]
pub struct Grader {
    active: Vec<Zone>,
    transfer: Transfer,
    decode: DecodeTable,
    parallel: bool,
}

impl Grader {
    pub fn new(zones: &[Zone]) -> Self {
        Self::with_options(zones, GradeOptions::default())
    }

    pub fn with_options(zones: &[Zone], options: GradeOptions) -> Self {
        let active: Vec<Zone> = zones.iter().filter(|z| z.is_active()).copied().collect();
        Self {
            active,
            transfer: options.transfer,
            decode: DecodeTable::new(&options.transfer),
            parallel: options.parallel,
        }
    }

    /// Zones that survived the enabled/non-neutral filter.
    pub fn active_zones(&self) -> &[Zone] {
        &self.active
    }

    /// True if grading leaves every buffer unchanged.
    pub fn is_identity(&self) -> bool {
        self.active.is_empty()
    }

    /// Sum the active zones' contributions at `stop`.
    ///
    /// Saturation contributions are summed as `(s − 1) × w` and the total is
    /// floored at 0; overlapping boosts may exceed 2.
    pub fn adjustment_at(&self, stop: f32) -> ZoneAdjustment {
        let mut exposure = 0.0_f32;
        let mut saturation = 1.0_f32;

        for zone in &self.active {
            let w = zone_weight(stop, zone);
            if w > 0.0 {
                exposure += zone.exposure * w;
                saturation += (zone.saturation - 1.0) * w;
            }
        }

        ZoneAdjustment {
            exposure,
            saturation: saturation.max(0.0),
        }
    }

    /// Grade one linear-light RGB triplet. Output is unclamped linear.
    ///
    /// Exposure is limited to ±[`MAX_EXPOSURE_STOPS`] so the result stays
    /// finite for any finite zone values.
    pub fn grade_linear(&self, rgb: [f32; 3]) -> [f32; 3] {
        let ev = linear_to_stop(luminance_rgb(rgb));
        let adj = self.adjustment_at(ev);

        let stops = if adj.exposure.is_nan() {
            0.0
        } else {
            adj.exposure.clamp(-MAX_EXPOSURE_STOPS, MAX_EXPOSURE_STOPS)
        };
        let gain = stops.exp2();
        let mut out = [rgb[0] * gain, rgb[1] * gain, rgb[2] * gain];

        if adj.saturation != 1.0 {
            let y_out = luminance_rgb(out);
            for c in &mut out {
                *c = y_out + (*c - y_out) * adj.saturation;
            }
        }
        out
    }

    /// Grade one gamma-encoded 8-bit RGB pixel.
    pub fn grade_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let lin = [
            self.decode.decode(rgb[0]),
            self.decode.decode(rgb[1]),
            self.decode.decode(rgb[2]),
        ];
        let out = self.grade_linear(lin);
        [
            encode_u8(&self.transfer, out[0]),
            encode_u8(&self.transfer, out[1]),
            encode_u8(&self.transfer, out[2]),
        ]
    }

    /// Grade a copy of `buffer`, leaving the original untouched.
    pub fn grade(&self, buffer: &PixelBuffer) -> PixelBuffer {
        let mut out = buffer.clone();
        self.grade_in_place(&mut out);
        out
    }

    /// Grade `buffer` in place. Alpha samples are not touched.
    pub fn grade_in_place(&self, buffer: &mut PixelBuffer) {
        if self.is_identity() {
            tracing::debug!(
                "identity grade: no active zones, {}x{} buffer unchanged",
                buffer.width(),
                buffer.height()
            );
            return;
        }

        tracing::debug!(
            "grading {}x{} {} buffer with {} active zones",
            buffer.width(),
            buffer.height(),
            buffer.channels(),
            self.active.len()
        );

        let n = buffer.channels().count();
        let data = buffer.as_bytes_mut();
        debug_assert_eq!(data.len() % n, 0, "buffer length is not a multiple of {n}");

        parallel::for_each_chunk_mut(data, n, self.parallel, |px| {
            let [r, g, b] = self.grade_pixel([px[0], px[1], px[2]]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        });
    }
}

/// Grade a copy of `buffer` with default options.
///
/// With no enabled, non-neutral zone the copy is bit-identical to the input.
pub fn grade(buffer: &PixelBuffer, zones: &[Zone]) -> PixelBuffer {
    Grader::new(zones).grade(buffer)
}

/// Grade `buffer` in place with default options.
pub fn grade_in_place(buffer: &mut PixelBuffer, zones: &[Zone]) {
    Grader::new(zones).grade_in_place(buffer);
}
