//! Gangs (factions) and their display colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque display color. The board never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A faction competing for districts.
///
/// The `id` is the stable key used in every district's unit mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gang {
    pub id: String,
    pub name: String,
    pub color: Rgb,
}

impl Gang {
    /// Creates a gang.
    pub fn new(id: &str, name: &str, color: Rgb) -> Self {
        Gang {
            id: id.to_string(),
            name: name.to_string(),
            color,
        }
    }
}
