//! Luminance and stop (EV) conversions relative to middle gray.

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Linear reflectance of middle gray; 0 EV.
pub const MIDDLE_GRAY: f32 = 0.18;

/// Stop value assigned to luminance at or below [`BLACK_THRESHOLD`].
pub const STOP_FLOOR: f32 = -10.0;

/// Luminance treated as black when converting to stops.
pub const BLACK_THRESHOLD: f32 = 1e-6;

/// Rec. 709 luminance of a linear RGB triplet.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_REC709[0] * r + LUMA_REC709[1] * g + LUMA_REC709[2] * b
}

/// [`luminance`] over an `[r, g, b]` array.
#[inline]
pub fn luminance_rgb(rgb: [f32; 3]) -> f32 {
    luminance(rgb[0], rgb[1], rgb[2])
}

/// Linear luminance to stops: `log2(y / 0.18)`, floored at −10 for black.
#[inline]
pub fn linear_to_stop(y: f32) -> f32 {
    if y <= BLACK_THRESHOLD {
        return STOP_FLOOR;
    }
    (y / MIDDLE_GRAY).log2()
}

/// Stops to linear luminance: `0.18 × 2^ev`.
#[inline]
pub fn stop_to_linear(ev: f32) -> f32 {
    MIDDLE_GRAY * ev.exp2()
}
