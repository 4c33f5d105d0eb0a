//! Board state.
//!
//! The board owns every district and gang, the opaque round/phase labels and
//! the current selection. It is the only place unit lists can change, so the
//! district invariants (no empty entries, no unknown gangs, unique unit ids)
//! hold after every successful call. Failed calls leave the board untouched.

use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::district::{District, DistrictId};
use super::gang::Gang;
use super::unit::{Unit, UnitId, UnitType};
use crate::geometry::{self, GeometryError, Point, Size};

/// Width of the canonical map space district boundaries are drawn in.
pub const CANONICAL_WIDTH: f64 = 1024.0;

/// Height of the canonical map space district boundaries are drawn in.
pub const CANONICAL_HEIGHT: f64 = 1536.0;

/// Errors raised by board construction, mutation and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("unknown gang reference: '{0}'")]
    UnknownGangReference(String),

    #[error("unknown district: {0}")]
    UnknownDistrict(DistrictId),

    #[error("unit {0} is not on the board")]
    UnitNotFound(UnitId),

    #[error("duplicate gang id: '{0}'")]
    DuplicateGang(String),

    #[error("duplicate district id: {0}")]
    DuplicateDistrict(DistrictId),

    #[error("duplicate unit id: {0}")]
    DuplicateUnit(UnitId),

    #[error("unit ids exhausted")]
    UnitIdExhausted,
}

/// Board-level settings fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Coordinate space the district boundaries are expressed in.
    pub canonical_size: Size,
    pub initial_round: NonZeroU32,
    pub initial_phase: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            canonical_size: Size::new(CANONICAL_WIDTH, CANONICAL_HEIGHT),
            initial_round: NonZeroU32::MIN,
            initial_phase: "Planning".to_string(),
        }
    }
}

/// The full game board.
///
/// Districts and gangs keep the order they were registered in; that order is
/// the tie-break for selection (first match wins) and for dominance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    config: BoardConfig,
    gangs: Vec<Gang>,
    districts: Vec<District>,
    round: NonZeroU32,
    phase: String,
    #[serde(skip)]
    selected: Option<DistrictId>,
    /// Next id handed out by `spawn_unit`; `None` once `u64::MAX` is taken.
    #[serde(skip)]
    next_unit_id: Option<u64>,
}

/// Serialized form of a [`Board`], validated on the way in.
#[derive(Deserialize)]
struct BoardRecord {
    #[serde(default)]
    config: BoardConfig,
    gangs: Vec<Gang>,
    districts: Vec<District>,
    round: NonZeroU32,
    phase: String,
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let mut board = Board::new(record.config, record.gangs, record.districts)?;
        board.round = record.round;
        board.phase = record.phase;
        Ok(board)
    }
}

impl Board {
    /// Builds a board from pre-registered gangs and districts.
    ///
    /// Empty unit entries are pruned. Duplicate ids, units whose gang is not
    /// registered, and units filed under another gang's entry are rejected.
    pub fn new(
        config: BoardConfig,
        gangs: Vec<Gang>,
        mut districts: Vec<District>,
    ) -> Result<Self, BoardError> {
        let mut gang_ids = HashSet::new();
        for gang in &gangs {
            if !gang_ids.insert(gang.id.as_str()) {
                return Err(BoardError::DuplicateGang(gang.id.clone()));
            }
        }

        let mut district_ids = HashSet::new();
        let mut unit_ids = HashSet::new();
        for district in &mut districts {
            if !district_ids.insert(district.id()) {
                return Err(BoardError::DuplicateDistrict(district.id()));
            }
            district.prune_empty();
            for (key, unit) in district.all_units() {
                if key != unit.gang || !gang_ids.contains(key) {
                    return Err(BoardError::UnknownGangReference(unit.gang.clone()));
                }
                if !unit_ids.insert(unit.id) {
                    return Err(BoardError::DuplicateUnit(unit.id));
                }
            }
        }

        let next_unit_id = match unit_ids.iter().max() {
            Some(max) => max.0.checked_add(1),
            None => Some(1),
        };
        Ok(Board {
            round: config.initial_round,
            phase: config.initial_phase.clone(),
            config,
            gangs,
            districts,
            selected: None,
            next_unit_id,
        })
    }

    /// Returns the settings the board was built with.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns all gangs in registration order.
    pub fn gangs(&self) -> &[Gang] {
        &self.gangs
    }

    /// Returns all districts in registration order.
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Returns the current round.
    pub fn round(&self) -> NonZeroU32 {
        self.round
    }

    /// Sets the round counter. The board does not interpret it.
    pub fn set_round(&mut self, round: NonZeroU32) {
        self.round = round;
    }

    /// Returns the current phase label.
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Sets the phase label. The board does not interpret it.
    pub fn set_phase(&mut self, phase: impl Into<String>) {
        self.phase = phase.into();
    }

    /// Looks up a gang by id.
    pub fn gang(&self, id: &str) -> Option<&Gang> {
        self.gangs.iter().find(|g| g.id == id)
    }

    /// Looks up a district by id.
    pub fn district(&self, id: DistrictId) -> Option<&District> {
        self.districts.iter().find(|d| d.id() == id)
    }

    /// Looks up a district by display name.
    pub fn district_by_name(&self, name: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.name() == name)
    }

    fn require_district(&self, id: DistrictId) -> Result<&District, BoardError> {
        self.district(id).ok_or(BoardError::UnknownDistrict(id))
    }

    fn district_index(&self, id: DistrictId) -> Result<usize, BoardError> {
        self.districts
            .iter()
            .position(|d| d.id() == id)
            .ok_or(BoardError::UnknownDistrict(id))
    }

    fn require_gang(&self, id: &str) -> Result<&Gang, BoardError> {
        self.gang(id)
            .ok_or_else(|| BoardError::UnknownGangReference(id.to_string()))
    }

    // --- Selection ---

    /// Returns the selected district, if any.
    pub fn selected(&self) -> Option<&District> {
        self.selected.and_then(|id| self.district(id))
    }

    /// Selects the district under `point`, captured on a surface of size
    /// `surface`.
    ///
    /// The point is rescaled into the canonical space and tested against each
    /// district in registration order; the first match wins. No match clears
    /// the selection. A degenerate `surface` fails without touching the
    /// current selection.
    pub fn select_at(&mut self, point: Point, surface: Size) -> Result<Option<&District>, BoardError> {
        let canonical = geometry::rescale(point, surface, self.config.canonical_size)?;
        self.selected = self
            .districts
            .iter()
            .find(|d| d.contains(canonical))
            .map(District::id);
        Ok(self.selected())
    }

    /// Selects a district by id.
    pub fn select(&mut self, id: DistrictId) -> Result<&District, BoardError> {
        let idx = self.district_index(id)?;
        self.selected = Some(id);
        Ok(&self.districts[idx])
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // --- Unit placement ---

    /// Creates a new unit for `gang` in `district` and returns its id.
    pub fn spawn_unit(
        &mut self,
        district: DistrictId,
        gang: &str,
        unit_type: UnitType,
    ) -> Result<UnitId, BoardError> {
        let idx = self.district_index(district)?;
        self.require_gang(gang)?;

        let raw = self.next_unit_id.ok_or(BoardError::UnitIdExhausted)?;
        let id = UnitId(raw);
        self.next_unit_id = raw.checked_add(1);
        self.districts[idx].push_unit(Unit::new(id, unit_type, gang));
        Ok(id)
    }

    /// Appends an existing unit to `district`, keeping its id.
    pub fn place_unit(&mut self, district: DistrictId, unit: Unit) -> Result<(), BoardError> {
        let idx = self.district_index(district)?;
        self.require_gang(&unit.gang)?;
        if self.locate_unit(unit.id).is_some() {
            return Err(BoardError::DuplicateUnit(unit.id));
        }

        if self.next_unit_id.is_some_and(|next| unit.id.0 >= next) {
            self.next_unit_id = unit.id.0.checked_add(1);
        }
        self.districts[idx].push_unit(unit);
        Ok(())
    }

    /// Takes a unit off the board, wherever it is.
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, BoardError> {
        self.districts
            .iter_mut()
            .find_map(|d| d.take_unit(id))
            .ok_or(BoardError::UnitNotFound(id))
    }

    /// Returns the district holding unit `id`, and the unit itself.
    pub fn locate_unit(&self, id: UnitId) -> Option<(&District, &Unit)> {
        self.districts
            .iter()
            .find_map(|d| d.find_unit(id).map(|u| (d, u)))
    }

    // --- Aggregate queries ---

    /// Returns the number of units of all gangs in `district`.
    pub fn total_units(&self, district: DistrictId) -> Result<usize, BoardError> {
        Ok(self.require_district(district)?.total_units())
    }

    /// The gang with the most units in `district`, with its count.
    ///
    /// Ties go to the gang registered first. `None` if the district is empty.
    pub fn dominant_gang(&self, district: DistrictId) -> Result<Option<(&Gang, usize)>, BoardError> {
        let d = self.require_district(district)?;
        let mut best: Option<(&Gang, usize)> = None;
        for gang in &self.gangs {
            let count = d.units_of(&gang.id).len();
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((gang, count));
            }
        }
        Ok(best)
    }

    /// Per-type unit counts for `gang` in `district`. Zero counts are omitted.
    pub fn unit_counts(
        &self,
        district: DistrictId,
        gang: &str,
    ) -> Result<BTreeMap<UnitType, usize>, BoardError> {
        let d = self.require_district(district)?;
        self.require_gang(gang)?;

        let mut counts = BTreeMap::new();
        for unit in d.units_of(gang) {
            *counts.entry(unit.unit_type).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Present gangs in `district` with their unit counts, largest first.
    /// Equal counts keep registration order.
    pub fn gang_breakdown(&self, district: DistrictId) -> Result<Vec<(&Gang, usize)>, BoardError> {
        let d = self.require_district(district)?;
        let mut breakdown: Vec<(&Gang, usize)> = self
            .gangs
            .iter()
            .map(|g| (g, d.units_of(&g.id).len()))
            .filter(|&(_, n)| n > 0)
            .collect();
        breakdown.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(breakdown)
    }

    /// Districts where `gang` has at least one unit, in board order.
    pub fn territories_of(&self, gang: &str) -> Result<Vec<&District>, BoardError> {
        self.require_gang(gang)?;
        Ok(self
            .districts
            .iter()
            .filter(|d| !d.units_of(gang).is_empty())
            .collect())
    }

    /// Returns the number of units `gang` has across the board.
    pub fn total_units_of(&self, gang: &str) -> Result<usize, BoardError> {
        self.require_gang(gang)?;
        Ok(self.districts.iter().map(|d| d.units_of(gang).len()).sum())
    }
}
