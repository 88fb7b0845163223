//! Typed tile metadata records.
//!
//! Tiled stores tile metadata as loosely-typed `property` lists. These types are
//! the validated form: once a [`TileRecord`] exists, every field is in range and
//! no consumer needs to look at raw key/value pairs again.
//!
//! `Direction` and `Parity` are deliberately opaque. Which integer means which
//! compass heading or colour phase is decided by the game, not by the tileset.

use std::fmt;

use serde::{Serialize, Serializer};

/// Category tag carried by the `name` property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileKind {
    Diamond,
    Boost,
    Player,
    Exit,
    Receptor,
    Portal,
    /// A category this crate doesn't know about yet. Kept verbatim.
    Other(String),
}

impl TileKind {
    /// Map a `name` property value to a kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "diamond" => TileKind::Diamond,
            "boost" => TileKind::Boost,
            "player" => TileKind::Player,
            "exit" => TileKind::Exit,
            "receptor" => TileKind::Receptor,
            "portal" => TileKind::Portal,
            other => TileKind::Other(other.to_string()),
        }
    }

    /// The `name` property value for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            TileKind::Diamond => "diamond",
            TileKind::Boost => "boost",
            TileKind::Player => "player",
            TileKind::Exit => "exit",
            TileKind::Receptor => "receptor",
            TileKind::Portal => "portal",
            TileKind::Other(name) => name,
        }
    }

    /// Whether tiles of this kind may carry a `direction`.
    #[inline]
    pub fn accepts_direction(&self) -> bool {
        matches!(self, TileKind::Boost | TileKind::Player)
    }

    /// Whether tiles of this kind may carry a `power`.
    #[inline]
    pub fn accepts_power(&self) -> bool {
        matches!(self, TileKind::Boost)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TileKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Facing of a `boost` or `player` tile, one of 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Direction(u8);

impl Direction {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Returns `None` when `value` is outside 1..=4.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

/// One of the two alternating phases of a logical entity, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Parity(u8);

impl Parity {
    pub const FIRST: Parity = Parity(1);
    pub const SECOND: Parity = Parity(2);

    /// Returns `None` when `value` is not 1 or 2.
    pub fn new(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::FIRST),
            2 => Some(Self::SECOND),
            _ => None,
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The other phase.
    #[inline]
    pub fn opposite(self) -> Self {
        if self == Self::FIRST {
            Self::SECOND
        } else {
            Self::FIRST
        }
    }
}

/// Gameplay metadata for one tile of the entity tileset.
///
/// Serializes to the same shape the tileset uses, e.g.
/// `{"name":"player","direction":1}`. The id is the table key and is not part
/// of the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileRecord {
    #[serde(skip)]
    pub id: u32,

    #[serde(rename = "name")]
    pub kind: TileKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parity: Option<Parity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
}

impl TileRecord {
    /// Whether `other` is this record's partner in the opposite phase.
    ///
    /// Partners share kind, direction and power and differ only in parity.
    pub fn pairs_with(&self, other: &TileRecord) -> bool {
        match (self.parity, other.parity) {
            (Some(a), Some(b)) => {
                a.opposite() == b
                    && self.kind == other.kind
                    && self.direction == other.direction
                    && self.power == other.power
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for name in ["diamond", "boost", "player", "exit", "receptor", "portal"] {
            let kind = TileKind::from_name(name);
            assert!(!matches!(kind, TileKind::Other(_)), "{name} should be known");
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!(
            TileKind::from_name("lever"),
            TileKind::Other("lever".to_string())
        );
    }

    #[test]
    fn test_direction_range() {
        assert!(Direction::new(0).is_none());
        assert_eq!(Direction::new(1).map(Direction::get), Some(1));
        assert_eq!(Direction::new(4).map(Direction::get), Some(4));
        assert!(Direction::new(5).is_none());
        assert!(Direction::new(-1).is_none());
    }

    #[test]
    fn test_parity_opposite() {
        assert_eq!(Parity::FIRST.opposite(), Parity::SECOND);
        assert_eq!(Parity::SECOND.opposite(), Parity::FIRST);
        assert!(Parity::new(0).is_none());
        assert!(Parity::new(3).is_none());
    }

    #[test]
    fn test_record_serializes_without_absent_fields() {
        let player = TileRecord {
            id: 8,
            kind: TileKind::Player,
            direction: Direction::new(1),
            parity: None,
            power: None,
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "player", "direction": 1 }));
    }

    #[test]
    fn test_pairs_with_requires_matching_fields() {
        let boost = |parity: i64, power: u32| TileRecord {
            id: 0,
            kind: TileKind::Boost,
            direction: Direction::new(3),
            parity: Parity::new(parity),
            power: Some(power),
        };
        assert!(boost(1, 1).pairs_with(&boost(2, 1)));
        assert!(!boost(1, 1).pairs_with(&boost(1, 1)));
        assert!(!boost(1, 1).pairs_with(&boost(2, 20)));
    }
}
