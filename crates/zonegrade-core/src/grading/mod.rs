//! Zone grading — weighting, tone-curve sampling, and image grading.

pub mod curve;
pub mod grader;
pub mod weight;

pub use curve::{generate_curve, generate_curve_with, CurvePoint, ZoneWeights, DEFAULT_STEPS, MAX_STOP, MIN_STOP};
pub use grader::{grade, grade_in_place, GradeOptions, Grader, ZoneAdjustment, MAX_EXPOSURE_STOPS};
pub use weight::{zone_weight, FALLOFF_EPSILON};
