//! Transfer functions between gamma-encoded 8-bit samples and linear light.
//!
//! The grading model works on a simple 2.2 power curve. The piecewise sRGB
//! curve (IEC 61966-2-1) is available for callers that need exact sRGB
//! decoding.

use serde::{Deserialize, Serialize};

/// Display gamma of the default transfer curve.
pub const GAMMA: f32 = 2.2;

/// A transfer function that converts between linear and non-linear encodings.
///
/// Both directions operate on normalized values (`1.0` = full scale).
pub trait TransferFunction: Send + Sync {
    /// Convert from non-linear (encoded) to linear light.
    fn to_linear(&self, encoded: f32) -> f32;

    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f32) -> f32;
}

// ---------------------------------------------------------------------------
// Pure power gamma 2.2
// ---------------------------------------------------------------------------

/// Pure power-law transfer.
///
/// ```text
/// to_linear:  V ^ 2.2
/// to_encoded: L ^ (1/2.2)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Gamma22Transfer;

impl TransferFunction for Gamma22Transfer {
    #[inline]
    fn to_linear(&self, encoded: f32) -> f32 {
        encoded.powf(GAMMA)
    }

    #[inline]
    fn to_encoded(&self, linear: f32) -> f32 {
        // powf of a negative base is NaN; treat negatives as black.
        linear.max(0.0).powf(1.0 / GAMMA)
    }
}

// ---------------------------------------------------------------------------
// sRGB (IEC 61966-2-1)
// ---------------------------------------------------------------------------

/// sRGB transfer function per IEC 61966-2-1.
///
/// ```text
/// to_linear:   V <= 0.04045 → V / 12.92
///              V >  0.04045 → ((V + 0.055) / 1.055) ^ 2.4
///
/// from_linear: L <= 0.0031308 → L × 12.92
///              L >  0.0031308 → 1.055 × L^(1/2.4) − 0.055
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SrgbTransfer;

impl TransferFunction for SrgbTransfer {
    #[inline]
    fn to_linear(&self, encoded: f32) -> f32 {
        if encoded <= 0.04045 {
            encoded / 12.92
        } else {
            ((encoded + 0.055) / 1.055).powf(2.4)
        }
    }

    #[inline]
    fn to_encoded(&self, linear: f32) -> f32 {
        if linear <= 0.0031308 {
            linear * 12.92
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Transfer curve used to decode and re-encode 8-bit pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    /// Pure 2.2 power curve.
    #[default]
    Gamma22,
    /// Piecewise sRGB curve.
    Srgb,
}

impl TransferFunction for Transfer {
    #[inline]
    fn to_linear(&self, encoded: f32) -> f32 {
        match self {
            Self::Gamma22 => Gamma22Transfer.to_linear(encoded),
            Self::Srgb => SrgbTransfer.to_linear(encoded),
        }
    }

    #[inline]
    fn to_encoded(&self, linear: f32) -> f32 {
        match self {
            Self::Gamma22 => Gamma22Transfer.to_encoded(linear),
            Self::Srgb => SrgbTransfer.to_encoded(linear),
        }
    }
}

// ---------------------------------------------------------------------------
// 8-bit helpers
// ---------------------------------------------------------------------------

/// Decode an 8-bit gamma-encoded channel to linear: `(c / 255) ^ 2.2`.
#[inline]
pub fn gamma_to_linear(channel: u8) -> f32 {
    Gamma22Transfer.to_linear(channel as f32 / 255.0)
}

/// Encode a linear value to an 8-bit channel: `clamp(v ^ (1/2.2) × 255, 0, 255)`.
///
/// Out-of-range input saturates; NaN maps to 0.
#[inline]
pub fn linear_to_gamma(value: f32) -> u8 {
    encode_u8(&Gamma22Transfer, value)
}

/// Encode a linear value to an 8-bit channel with the given transfer curve.
#[inline]
pub fn encode_u8<T: TransferFunction + ?Sized>(transfer: &T, value: f32) -> u8 {
    // `as u8` saturates and sends NaN to 0.
    (transfer.to_encoded(value) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Linear value for every possible 8-bit code.
///
/// Decoding an 8-bit image only ever needs 256 distinct results, so a grading
/// pass builds this once instead of calling `powf` per channel.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    table: [f32; 256],
}

impl DecodeTable {
    pub fn new<T: TransferFunction + ?Sized>(transfer: &T) -> Self {
        let mut table = [0.0_f32; 256];
        for (code, slot) in table.iter_mut().enumerate() {
            *slot = transfer.to_linear(code as f32 / 255.0);
        }
        Self { table }
    }

    #[inline]
    pub fn decode(&self, channel: u8) -> f32 {
        self.table[channel as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::{LinSrgb, Srgb};

    const EPSILON: f32 = 1e-5;

    fn assert_roundtrip(tf: &dyn TransferFunction, values: &[f32]) {
        for &v in values {
            let encoded = tf.to_encoded(v);
            let back = tf.to_linear(encoded);
            assert!(
                (v - back).abs() < EPSILON,
                "roundtrip failed for {v}: encoded={encoded}, back={back}, diff={}",
                (v - back).abs()
            );
        }
    }

    #[test]
    fn test_gamma22_roundtrip_preserves_values() {
        assert_roundtrip(&Gamma22Transfer, &[0.0, 0.001, 0.01, 0.18, 0.5, 0.9, 1.0]);
    }

    #[test]
    fn test_srgb_roundtrip_preserves_values() {
        assert_roundtrip(&SrgbTransfer, &[0.0, 0.001, 0.01, 0.1, 0.5, 0.9, 1.0]);
    }

    #[test]
    fn test_srgb_matches_palette() {
        for code in [0u8, 10, 64, 118, 200, 255] {
            let v = code as f32 / 255.0;
            let reference: LinSrgb = Srgb::new(v, v, v).into_linear();
            assert!(
                (SrgbTransfer.to_linear(v) - reference.red).abs() < EPSILON,
                "code {code}: {} vs {}",
                SrgbTransfer.to_linear(v),
                reference.red
            );
        }
    }

    #[test]
    fn test_gamma_to_linear_known_values() {
        assert_eq!(gamma_to_linear(0), 0.0);
        assert!((gamma_to_linear(255) - 1.0).abs() < EPSILON);
        // 118 is the 8-bit code closest to middle gray under gamma 2.2.
        assert!((gamma_to_linear(118) - 0.18).abs() < 0.005);
    }

    #[test]
    fn test_every_code_survives_roundtrip() {
        for code in 0..=255u8 {
            assert_eq!(linear_to_gamma(gamma_to_linear(code)), code);
            assert_eq!(encode_u8(&Transfer::Srgb, Transfer::Srgb.to_linear(code as f32 / 255.0)), code);
        }
    }

    #[test]
    fn test_linear_to_gamma_clamps() {
        assert_eq!(linear_to_gamma(-0.5), 0);
        assert_eq!(linear_to_gamma(4.0), 255);
        assert_eq!(linear_to_gamma(f32::INFINITY), 255);
        assert_eq!(linear_to_gamma(f32::NAN), 0);
    }

    #[test]
    fn test_decode_table_matches_direct_decode() {
        let table = DecodeTable::new(&Transfer::Gamma22);
        for code in 0..=255u8 {
            assert_eq!(table.decode(code), gamma_to_linear(code));
        }
    }

    #[test]
    fn test_transfer_default_is_gamma22() {
        assert_eq!(Transfer::default(), Transfer::Gamma22);
        let json = serde_json::to_string(&Transfer::Srgb).unwrap();
        assert_eq!(json, "\"srgb\"");
    }
}
