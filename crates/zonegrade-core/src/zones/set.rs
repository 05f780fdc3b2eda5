//! The full six-zone configuration and its preset format.

use std::io::{Read, Write};
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};
use crate::zones::{Direction, Zone, ZoneId};

/// Lowest cutoff an unlocked zone accepts.
pub const SLIDER_MIN: f32 = -6.0;
/// Highest cutoff an unlocked zone accepts.
pub const SLIDER_MAX: f32 = 6.0;

/// Exactly one [`Zone`] per [`ZoneId`], stored in `ZoneId::index` order.
///
/// Serializes as a JSON array of six zone records. Deserialization rejects
/// lists with missing or repeated zones. Derefs to `&[Zone]` so it can be
/// passed straight to the curve generator and the grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Zone>", into = "Vec<Zone>")]
pub struct ZoneSet {
    zones: [Zone; ZoneId::COUNT],
}

impl Default for ZoneSet {
    /// Factory layout: three low-pass zones, three high-pass zones, all neutral.
    fn default() -> Self {
        Self {
            zones: ZoneId::ALL.map(factory_zone),
        }
    }
}

/// Factory settings for a single zone.
pub fn factory_zone(id: ZoneId) -> Zone {
    let (direction, range_end, falloff, min, max) = match id {
        ZoneId::Black => (Direction::Low, -4.0, 0.1, -6.0, -1.5),
        ZoneId::Dark => (Direction::Low, -1.5, 0.2, -4.0, 1.0),
        ZoneId::Shadow => (Direction::Low, 1.0, 0.22, -1.5, 6.0),
        ZoneId::Light => (Direction::High, -1.0, 0.22, -6.0, 1.5),
        ZoneId::Highlight => (Direction::High, 1.5, 0.2, -1.0, 4.0),
        ZoneId::Specular => (Direction::High, 4.0, 0.1, 1.5, 6.0),
    };
    Zone::new(id, direction, range_end, falloff).with_limits(min, max)
}

impl ZoneSet {
    pub fn get(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    pub fn get_mut(&mut self, id: ZoneId) -> &mut Zone {
        &mut self.zones[id.index()]
    }

    pub fn as_slice(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    /// True if no zone changes any pixel.
    pub fn is_identity(&self) -> bool {
        !self.zones.iter().any(Zone::is_active)
    }

    /// Allowed `range_end` interval for a zone, honoring its lock state.
    pub fn range_limits(&self, id: ZoneId) -> (f32, f32) {
        let zone = self.get(id);
        if zone.range_unlocked {
            return (SLIDER_MIN, SLIDER_MAX);
        }
        (
            zone.min_range.unwrap_or(SLIDER_MIN),
            zone.max_range.unwrap_or(SLIDER_MAX),
        )
    }

    /// Move a zone's cutoff, clamped to its allowed interval.
    ///
    /// Returns the value actually stored.
    pub fn set_range_end(&mut self, id: ZoneId, range_end: f32) -> f32 {
        let (lo, hi) = self.range_limits(id);
        let clamped = range_end.clamp(lo, hi);
        if clamped != range_end {
            tracing::warn!("{id}: range end {range_end} clamped to {clamped}");
        }
        self.get_mut(id).range_end = clamped;
        clamped
    }

    /// Lock or unlock a zone's range limits.
    ///
    /// Re-locking pulls an out-of-range cutoff back inside the zone's limits.
    pub fn set_range_unlocked(&mut self, id: ZoneId, unlocked: bool) {
        self.get_mut(id).range_unlocked = unlocked;
        if !unlocked {
            let current = self.get(id).range_end;
            self.set_range_end(id, current);
        }
    }

    /// Flip a zone between low-pass and high-pass.
    pub fn toggle_direction(&mut self, id: ZoneId) {
        let zone = self.get_mut(id);
        zone.direction = zone.direction.flipped();
    }

    /// Restore a zone's factory range, falloff, direction and grade.
    ///
    /// The zone ends up enabled with its range locked.
    pub fn reset(&mut self, id: ZoneId) {
        self.zones[id.index()] = factory_zone(id);
    }

    /// Restore every zone to factory settings.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Parse a preset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a preset from a reader yielding JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the preset as pretty-printed JSON.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

impl Index<ZoneId> for ZoneSet {
    type Output = Zone;

    fn index(&self, id: ZoneId) -> &Zone {
        self.get(id)
    }
}

impl std::ops::Deref for ZoneSet {
    type Target = [Zone];

    fn deref(&self) -> &[Zone] {
        &self.zones
    }
}

impl<'a> IntoIterator for &'a ZoneSet {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

impl TryFrom<Vec<Zone>> for ZoneSet {
    type Error = ZoneError;

    /// Accepts the six zones in any order.
    fn try_from(list: Vec<Zone>) -> Result<Self> {
        if list.len() != ZoneId::COUNT {
            return Err(ZoneError::ZoneCount(list.len()));
        }

        let mut slots: [Option<Zone>; ZoneId::COUNT] = [None; ZoneId::COUNT];
        for zone in list {
            let slot = &mut slots[zone.id.index()];
            if slot.is_some() {
                return Err(ZoneError::DuplicateZone(zone.id));
            }
            *slot = Some(zone);
        }

        // Six zones, no duplicates: every slot is filled.
        let zones = ZoneId::ALL.map(|id| slots[id.index()].unwrap_or_else(|| factory_zone(id)));
        Ok(Self { zones })
    }
}

impl From<ZoneSet> for Vec<Zone> {
    fn from(set: ZoneSet) -> Self {
        set.zones.to_vec()
    }
}
