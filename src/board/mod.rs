//! Board representation and game-state types.
//!
//! Contains the core data structures for gangs, units, districts, and the
//! board aggregate that owns them.

pub mod district;
pub mod gang;
pub mod state;
pub mod unit;

pub use district::{District, DistrictId};
pub use gang::{Gang, Rgb};
pub use state::{Board, BoardConfig, BoardError, CANONICAL_HEIGHT, CANONICAL_WIDTH};
pub use unit::{ParseUnitTypeError, Unit, UnitId, UnitType, ALL_UNIT_TYPES};
