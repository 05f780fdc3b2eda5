//! Tone-curve sampling for visualization.
//!
//! Samples the combined zone response across the display domain. Output is
//! additive in stop space:
//! ```text
//! output = input + Σ exposure(z) × weight(input, z)
//! ```
//! which is the same as multiplying linear light by `2^Σ…`, the way the
//! image grader applies it.
//!
//! # Complexity
//! O(steps × zones)

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::grading::weight::zone_weight;
use crate::parallel;
use crate::zones::{Zone, ZoneId};

/// Left edge of the visualization domain, in stops.
pub const MIN_STOP: f32 = -8.0;
/// Right edge of the visualization domain, in stops.
pub const MAX_STOP: f32 = 8.0;
/// Sample intervals used by the chart views.
pub const DEFAULT_STEPS: usize = 200;

/// Per-zone weight at one curve sample, indexed by [`ZoneId`].
///
/// Zones missing from the sampled slice read 0. Serializes as a map from
/// zone label to weight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneWeights([f32; ZoneId::COUNT]);

impl ZoneWeights {
    pub fn get(&self, id: ZoneId) -> f32 {
        self.0[id.index()]
    }

    fn set(&mut self, id: ZoneId, weight: f32) {
        self.0[id.index()] = weight;
    }

    /// `(zone, weight)` pairs in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, f32)> + '_ {
        ZoneId::ALL.iter().map(|&id| (id, self.get(id)))
    }
}

impl Index<ZoneId> for ZoneWeights {
    type Output = f32;

    fn index(&self, id: ZoneId) -> &f32 {
        &self.0[id.index()]
    }
}

impl Serialize for ZoneWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ZoneId::COUNT))?;
        for (id, weight) in self.iter() {
            map.serialize_entry(id.label(), &weight)?;
        }
        map.end()
    }
}

/// One sample of the tone curve.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    /// Input luminance in stops.
    pub input_stop: f32,
    /// Graded luminance in stops.
    pub output_stop: f32,
    /// Each zone's weight at `input_stop`.
    pub weights: ZoneWeights,
}

/// Sample the combined zone response at `steps + 1` evenly spaced stops
/// across `[MIN_STOP, MAX_STOP]`.
///
/// `steps = 0` yields a single sample at `MIN_STOP`. Very fine curves are
/// sampled on the rayon pool; see [`generate_curve_with`].
pub fn generate_curve(zones: &[Zone], steps: usize) -> Vec<CurvePoint> {
    generate_curve_with(zones, steps, true)
}

/// [`generate_curve`] with explicit control over parallel sampling.
///
/// Samples go through rayon only when `parallel` is set and `steps` reaches
/// [`parallel::PARALLEL_THRESHOLD`]; results are identical either way.
pub fn generate_curve_with(zones: &[Zone], steps: usize, parallel: bool) -> Vec<CurvePoint> {
    let step_size = if steps == 0 {
        0.0
    } else {
        (MAX_STOP - MIN_STOP) / steps as f32
    };

    tracing::trace!("sampling tone curve: {} zones, {} steps", zones.len(), steps);

    parallel::map_range(steps, parallel, |i| {
        let input_stop = MIN_STOP + i as f32 * step_size;
        let mut output_stop = input_stop;
        let mut weights = ZoneWeights::default();

        for zone in zones {
            let w = zone_weight(input_stop, zone);
            weights.set(zone.id, w);
            output_stop += zone.exposure * w;
        }

        CurvePoint {
            input_stop,
            output_stop,
            weights,
        }
    })
}

/// A gray stop of the output gradient strip.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RampStop {
    /// Horizontal position in `[0, 1]` across the input domain.
    pub position: f32,
    /// Gray level of the graded output at that position.
    pub level: u8,
}

/// Reduce a curve to the gradient stops of an output preview strip.
///
/// Keeps every `every`-th sample and maps its output stop linearly from
/// `[MIN_STOP, MAX_STOP]` to a gray level in `[0, 255]`.
pub fn preview_ramp(points: &[CurvePoint], every: usize) -> Vec<RampStop> {
    let span = MAX_STOP - MIN_STOP;
    points
        .iter()
        .step_by(every.max(1))
        .map(|p| {
            let norm = ((p.output_stop - MIN_STOP) / span).clamp(0.0, 1.0);
            RampStop {
                position: (p.input_stop - MIN_STOP) / span,
                level: (norm * 255.0).floor() as u8,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{Direction, ZoneSet};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_curve_spans_domain() {
        let curve = generate_curve(&ZoneSet::default(), DEFAULT_STEPS);
        assert_eq!(curve.len(), DEFAULT_STEPS + 1);
        assert_eq!(curve[0].input_stop, MIN_STOP);
        assert!((curve[DEFAULT_STEPS].input_stop - MAX_STOP).abs() < EPSILON);
        for pair in curve.windows(2) {
            assert!(pair[1].input_stop > pair[0].input_stop);
        }
    }

    #[test]
    fn test_neutral_zones_give_identity_curve() {
        for point in generate_curve(&ZoneSet::default(), 64) {
            assert_eq!(point.output_stop, point.input_stop);
        }
        for point in generate_curve(&[], 64) {
            assert_eq!(point.output_stop, point.input_stop);
            assert_eq!(point.weights, ZoneWeights::default());
        }
    }

    #[test]
    fn test_zero_steps_single_sample() {
        let curve = generate_curve(&[], 0);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].input_stop, MIN_STOP);
    }

    #[test]
    fn test_weights_recorded_per_zone() {
        let zones = [
            Zone::new(ZoneId::Black, Direction::Low, -4.0, 0.1).with_exposure(1.0),
            Zone::new(ZoneId::Specular, Direction::High, 4.0, 0.1),
        ];
        let curve = generate_curve(&zones, 16);
        // Sample 0 sits at -8 stops: fully Black, no Specular.
        assert_eq!(curve[0].weights[ZoneId::Black], 1.0);
        assert_eq!(curve[0].weights[ZoneId::Specular], 0.0);
        assert_eq!(curve[0].weights[ZoneId::Dark], 0.0);
        assert!((curve[0].output_stop - (-7.0)).abs() < EPSILON);
        // Last sample at +8 stops: fully Specular.
        assert_eq!(curve[16].weights[ZoneId::Specular], 1.0);
        assert_eq!(curve[16].weights[ZoneId::Black], 0.0);
    }

    #[test]
    fn test_weights_serialize_by_label() {
        let zones = [Zone::new(ZoneId::Dark, Direction::Low, 0.0, 1.0)];
        let curve = generate_curve(&zones, 2);
        let json = serde_json::to_value(curve[0]).unwrap();
        assert_eq!(json["weights"]["Dark"], 1.0);
        assert_eq!(json["weights"]["Specular"], 0.0);
        assert!(json.get("inputStop").is_some());
    }

    #[test]
    fn test_preview_ramp_levels() {
        let curve = generate_curve(&[], 200);
        let ramp = preview_ramp(&curve, 5);
        assert_eq!(ramp.len(), 41);
        assert_eq!(ramp[0].level, 0);
        assert_eq!(ramp[0].position, 0.0);
        assert_eq!(ramp[40].level, 255);
        assert!((ramp[20].position - 0.5).abs() < EPSILON);
        assert!(ramp.windows(2).all(|p| p[1].level >= p[0].level));
    }

    #[test]
    fn test_preview_ramp_clamps_out_of_domain() {
        let zones = [Zone::new(ZoneId::Light, Direction::High, -9.0, 0.1).with_exposure(3.0)];
        let ramp = preview_ramp(&generate_curve(&zones, 10), 1);
        assert_eq!(ramp.last().map(|r| r.level), Some(255));
    }

    #[test]
    fn test_parallel_and_sequential_sampling_agree() {
        let zones = [
            Zone::new(ZoneId::Shadow, Direction::Low, -1.0, 2.0).with_exposure(0.7),
            Zone::new(ZoneId::Highlight, Direction::High, 2.0, 1.5).with_exposure(-1.2),
        ];
        let steps = crate::parallel::PARALLEL_THRESHOLD;
        let sequential = generate_curve_with(&zones, steps, false);
        let parallel = generate_curve_with(&zones, steps, true);
        assert_eq!(sequential.len(), steps + 1);
        assert_eq!(sequential, parallel);
        assert_eq!(generate_curve_with(&zones, 16, false), generate_curve(&zones, 16));
    }
}
