//! Zone definitions — the six luminance bands and their grading parameters.
//!
//! A zone is a one-sided band in stop space: a low-pass zone covers
//! everything darker than its cutoff, a high-pass zone everything brighter.
//! The transition band of width `falloff` sits on the inside of the cutoff:
//!
//! ```text
//!   Low:   1 ──────────╮              High:            ╭────────── 1
//!                      ╰── 0                      0 ──╯
//!          range_end-f ↑ range_end                 range_end ↑ range_end+f
//! ```

pub mod set;

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

pub use set::ZoneSet;

/// Identity of one of the six grading zones, ordered dark to bright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneId {
    Black,
    Dark,
    Shadow,
    Light,
    Highlight,
    Specular,
}

impl ZoneId {
    /// Number of zones. Every zone table in the crate is this long.
    pub const COUNT: usize = 6;

    /// All zones in table order.
    pub const ALL: [ZoneId; Self::COUNT] = [
        ZoneId::Black,
        ZoneId::Dark,
        ZoneId::Shadow,
        ZoneId::Light,
        ZoneId::Highlight,
        ZoneId::Specular,
    ];

    /// Position of this zone in `[_; ZoneId::COUNT]` tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Black => 0,
            Self::Dark => 1,
            Self::Shadow => 2,
            Self::Light => 3,
            Self::Highlight => 4,
            Self::Specular => 5,
        }
    }

    /// Human-readable label for UI menus and chart legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Dark => "Dark",
            Self::Shadow => "Shadow",
            Self::Light => "Light",
            Self::Highlight => "Highlight",
            Self::Specular => "Specular",
        }
    }

    /// Swatch color used when plotting this zone's weight curve.
    pub fn color(self) -> Srgb<u8> {
        match self {
            Self::Black => Srgb::new(0xef, 0x44, 0x44),
            Self::Dark => Srgb::new(0xf9, 0x73, 0x16),
            Self::Shadow => Srgb::new(0xea, 0xb3, 0x08),
            Self::Light => Srgb::new(0x22, 0xc5, 0x5e),
            Self::Highlight => Srgb::new(0x3b, 0x82, 0xf6),
            Self::Specular => Srgb::new(0xa8, 0x55, 0xf7),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of `range_end` a zone covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Full weight below the cutoff, fading to zero at `range_end`.
    Low,
    /// Zero weight at `range_end`, rising to full weight above it.
    High,
}

impl Direction {
    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// A single grading zone.
///
/// Serialized field names match the preset JSON format
/// (`rangeEnd`, `isEnabled`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Which of the six zones this is.
    pub id: ZoneId,
    /// Cutoff in stops relative to middle gray.
    pub range_end: f32,
    /// Width of the transition band in stops. Values below
    /// [`FALLOFF_EPSILON`](crate::grading::weight::FALLOFF_EPSILON) act as
    /// the epsilon.
    pub falloff: f32,
    /// Low-pass or high-pass.
    pub direction: Direction,
    /// Stop offset applied where the zone has full weight. 0.0 = neutral.
    pub exposure: f32,
    /// Saturation multiplier at full weight. 1.0 = neutral.
    pub saturation: f32,
    /// A disabled zone has zero weight everywhere.
    #[serde(rename = "isEnabled")]
    pub enabled: bool,
    /// Lowest `range_end` the zone accepts while its range is locked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_range: Option<f32>,
    /// Highest `range_end` the zone accepts while its range is locked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_range: Option<f32>,
    /// Widens the accepted range to the global slider limits.
    #[serde(default, rename = "isRangeUnlocked")]
    pub range_unlocked: bool,
}

impl Zone {
    /// A neutral, enabled zone with no range limits.
    pub fn new(id: ZoneId, direction: Direction, range_end: f32, falloff: f32) -> Self {
        Self {
            id,
            range_end,
            falloff,
            direction,
            exposure: 0.0,
            saturation: 1.0,
            enabled: true,
            min_range: None,
            max_range: None,
            range_unlocked: false,
        }
    }

    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_limits(mut self, min_range: f32, max_range: f32) -> Self {
        self.min_range = Some(min_range);
        self.max_range = Some(max_range);
        self
    }

    /// True if the zone leaves every pixel unchanged regardless of weight.
    pub fn is_neutral(&self) -> bool {
        self.exposure == 0.0 && self.saturation == 1.0
    }

    /// True if the zone can change any pixel at all.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.is_neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, id) in ZoneId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_neutral_zone_is_inactive() {
        let zone = Zone::new(ZoneId::Dark, Direction::Low, -1.5, 0.2);
        assert!(zone.is_neutral());
        assert!(!zone.is_active());
        assert!(zone.with_exposure(0.5).is_active());
        assert!(zone.with_saturation(0.0).is_active());
        assert!(!zone.with_exposure(0.5).with_enabled(false).is_active());
    }

    #[test]
    fn test_zone_json_field_names() {
        let zone = Zone::new(ZoneId::Light, Direction::High, -1.0, 0.22).with_limits(-6.0, 1.5);
        let json = serde_json::to_value(zone).unwrap();
        assert_eq!(json["id"], "Light");
        assert_eq!(json["direction"], "high");
        assert_eq!(json["isEnabled"], true);
        assert_eq!(json["isRangeUnlocked"], false);
        assert!(json.get("rangeEnd").is_some());
        assert!(json.get("minRange").is_some());
    }

    #[test]
    fn test_zone_json_optional_fields_default() {
        let json = r#"{
            "id": "Black",
            "rangeEnd": -4.0,
            "falloff": 0.1,
            "direction": "low",
            "exposure": 0.5,
            "saturation": 1.2,
            "isEnabled": false
        }"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.id, ZoneId::Black);
        assert_eq!(zone.direction, Direction::Low);
        assert!(!zone.enabled);
        assert_eq!(zone.min_range, None);
        assert!(!zone.range_unlocked);
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Low.flipped(), Direction::High);
        assert_eq!(Direction::High.flipped().flipped(), Direction::High);
    }
}
