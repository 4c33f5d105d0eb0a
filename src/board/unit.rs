//! Unit types and ownership.
//!
//! A unit belongs to exactly one gang and sits in exactly one district entry.
//! Ownership is by containment: the board stores units inside the district's
//! per-gang list, never as free-standing references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a unit. Declaration order is the display and sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Solo,
    Techie,
    Netrunner,
    Drone,
}

/// All unit types in declaration order.
pub const ALL_UNIT_TYPES: [UnitType; 4] = [
    UnitType::Solo,
    UnitType::Techie,
    UnitType::Netrunner,
    UnitType::Drone,
];

impl UnitType {
    /// Lowercase key used in the text protocol and in serialized data.
    pub const fn key(self) -> &'static str {
        match self {
            UnitType::Solo => "solo",
            UnitType::Techie => "techie",
            UnitType::Netrunner => "netrunner",
            UnitType::Drone => "drone",
        }
    }

    /// Returns the capitalized name shown to players.
    pub const fn display_name(self) -> &'static str {
        match self {
            UnitType::Solo => "Solo",
            UnitType::Techie => "Techie",
            UnitType::Netrunner => "Netrunner",
            UnitType::Drone => "Drone",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a string names no unit type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit type: '{0}'")]
pub struct ParseUnitTypeError(pub String);

impl FromStr for UnitType {
    type Err = ParseUnitTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_UNIT_TYPES
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseUnitTypeError(s.to_string()))
    }
}

/// Board-unique unit identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub gang: String,
}

impl Unit {
    /// Creates a unit owned by `gang`.
    pub fn new(id: UnitId, unit_type: UnitType, gang: &str) -> Self {
        Unit {
            id,
            unit_type,
            gang: gang.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_key_roundtrip() {
        for t in ALL_UNIT_TYPES {
            assert_eq!(t.key().parse::<UnitType>(), Ok(t));
        }
        assert_eq!("NETRUNNER".parse::<UnitType>(), Ok(UnitType::Netrunner));
        assert_eq!(
            "tank".parse::<UnitType>(),
            Err(ParseUnitTypeError("tank".to_string()))
        );
    }

    #[test]
    fn unit_types_sort_in_declaration_order() {
        let mut types = vec![UnitType::Drone, UnitType::Solo, UnitType::Netrunner, UnitType::Techie];
        types.sort();
        assert_eq!(types, ALL_UNIT_TYPES.to_vec());
    }

    #[test]
    fn unit_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UnitType::Techie).unwrap(), "\"techie\"");
    }
}
