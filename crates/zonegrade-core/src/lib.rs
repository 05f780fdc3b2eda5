//! Zonegrade Core — zone-based tone and saturation grading.
//!
//! Six overlapping luminance zones, each with a smooth falloff in stop space,
//! contribute weighted exposure and saturation offsets. The same weighting
//! drives both the preview tone curve and the per-pixel image grade, so the
//! two never disagree. No UI, file I/O, or GPU dependencies.

pub mod color_management;
pub mod error;
pub mod grading;
pub mod image;
pub mod parallel;
pub mod zones;

// Re-exports for convenience.
pub use error::{Result, ZoneError};
pub use grading::{generate_curve, grade, grade_in_place, zone_weight, CurvePoint, GradeOptions, Grader};
pub use crate::image::{Channels, PixelBuffer, PREVIEW_MAX_WIDTH};
pub use zones::{Direction, Zone, ZoneId, ZoneSet};
