//! Property bag validation.
//!
//! Both the XML parser and the `tiled` import feed their key/value pairs
//! through [`TileRecordBuilder`], so the two paths accept exactly the same
//! tilesets.

use crate::error::MalformedAssetError;
use crate::record::{Direction, Parity, TileKind, TileRecord};

/// Property keys an entity tile may carry.
pub const RECOGNIZED_KEYS: [&str; 4] = ["name", "direction", "parity", "power"];

/// A property value before it is checked against its key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TilePropertyValue<'a> {
    /// `type="int"`.
    Int(i64),
    /// `type="string"` or no type attribute.
    Text(&'a str),
    /// Any other Tiled type (`bool`, `float`, `color`, ...), by name.
    Other(&'a str),
}

impl<'a> TilePropertyValue<'a> {
    /// Interpret an XML `property` element.
    ///
    /// Returns `Err(raw value)` when an `int` typed property doesn't parse.
    pub fn from_xml(kind: Option<&'a str>, value: &'a str) -> Result<Self, &'a str> {
        match kind {
            None | Some("string") => Ok(TilePropertyValue::Text(value)),
            Some("int") => value
                .trim()
                .parse()
                .map(TilePropertyValue::Int)
                .map_err(|_| value),
            Some(other) => Ok(TilePropertyValue::Other(other)),
        }
    }

    fn type_name(&self) -> &'a str {
        match self {
            TilePropertyValue::Int(_) => "int",
            TilePropertyValue::Text(_) => "string",
            TilePropertyValue::Other(name) => name,
        }
    }

    fn describe(&self) -> String {
        match self {
            TilePropertyValue::Int(value) => value.to_string(),
            TilePropertyValue::Text(value) => (*value).to_string(),
            TilePropertyValue::Other(name) => format!("<{name}>"),
        }
    }

    /// Integer view. Untyped text is accepted when it parses as an integer.
    fn as_int(&self) -> Option<i64> {
        match self {
            TilePropertyValue::Int(value) => Some(*value),
            TilePropertyValue::Text(text) => text.trim().parse().ok(),
            TilePropertyValue::Other(_) => None,
        }
    }
}

/// Accumulates the properties of one tile and produces a [`TileRecord`].
#[derive(Debug)]
pub struct TileRecordBuilder {
    id: u32,
    kind: Option<TileKind>,
    direction: Option<Direction>,
    parity: Option<Parity>,
    power: Option<u32>,
}

impl TileRecordBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            kind: None,
            direction: None,
            parity: None,
            power: None,
        }
    }

    /// Record one property, rejecting unknown keys, repeats and bad values.
    pub fn set(
        &mut self,
        key: &str,
        value: TilePropertyValue<'_>,
    ) -> Result<(), MalformedAssetError> {
        let already_set = match key {
            "name" => self.kind.is_some(),
            "direction" => self.direction.is_some(),
            "parity" => self.parity.is_some(),
            "power" => self.power.is_some(),
            _ => {
                return Err(MalformedAssetError::UnknownProperty {
                    tile: self.id,
                    key: key.to_string(),
                });
            }
        };
        if already_set {
            return Err(MalformedAssetError::DuplicateProperty {
                tile: self.id,
                key: key.to_string(),
            });
        }

        match key {
            "name" => {
                let TilePropertyValue::Text(name) = value else {
                    return Err(self.wrong_type(key, &value, "string"));
                };
                if name.trim().is_empty() {
                    return Err(self.invalid(key, &value));
                }
                self.kind = Some(TileKind::from_name(name.trim()));
            }
            "direction" => {
                let number = self.int(key, &value)?;
                let direction = Direction::new(number).ok_or_else(|| self.invalid(key, &value))?;
                self.direction = Some(direction);
            }
            "parity" => {
                let number = self.int(key, &value)?;
                let parity = Parity::new(number).ok_or_else(|| self.invalid(key, &value))?;
                self.parity = Some(parity);
            }
            _ => {
                let number = self.int(key, &value)?;
                let power = u32::try_from(number).map_err(|_| self.invalid(key, &value))?;
                self.power = Some(power);
            }
        }
        Ok(())
    }

    /// Finish the tile.
    ///
    /// `Ok(None)` means the tile carried no properties and is a plain tile.
    pub fn finish(self) -> Result<Option<TileRecord>, MalformedAssetError> {
        let TileRecordBuilder {
            id,
            kind,
            direction,
            parity,
            power,
        } = self;
        let Some(kind) = kind else {
            if direction.is_some() || parity.is_some() || power.is_some() {
                return Err(MalformedAssetError::MissingName { tile: id });
            }
            return Ok(None);
        };

        let misplaced = |key: &str| MalformedAssetError::MisplacedProperty {
            tile: id,
            key: key.to_string(),
            kind: kind.to_string(),
        };
        if direction.is_some() && !kind.accepts_direction() {
            return Err(misplaced("direction"));
        }
        if power.is_some() && !kind.accepts_power() {
            return Err(misplaced("power"));
        }

        Ok(Some(TileRecord {
            id,
            kind,
            direction,
            parity,
            power,
        }))
    }

    fn int(&self, key: &str, value: &TilePropertyValue<'_>) -> Result<i64, MalformedAssetError> {
        match value {
            TilePropertyValue::Other(_) => Err(self.wrong_type(key, value, "int")),
            _ => value.as_int().ok_or_else(|| self.invalid(key, value)),
        }
    }

    fn invalid(&self, key: &str, value: &TilePropertyValue<'_>) -> MalformedAssetError {
        MalformedAssetError::InvalidValue {
            tile: self.id,
            key: key.to_string(),
            value: value.describe(),
        }
    }

    fn wrong_type(
        &self,
        key: &str,
        value: &TilePropertyValue<'_>,
        expected: &'static str,
    ) -> MalformedAssetError {
        MalformedAssetError::WrongPropertyType {
            tile: self.id,
            key: key.to_string(),
            found: value.type_name().to_string(),
            expected,
        }
    }
}
