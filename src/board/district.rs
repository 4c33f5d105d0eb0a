//! Districts: named polygonal regions holding per-gang unit lists.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::unit::{Unit, UnitId};
use crate::geometry::{GeometryError, Point, Polygon};

/// Stable district identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(pub u32);

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A district on the map.
///
/// `units` maps gang id to the ordered list of that gang's units here. An
/// entry is never empty: removing the last unit removes the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    id: DistrictId,
    name: String,
    boundary: Polygon,
    #[serde(default)]
    units: BTreeMap<String, Vec<Unit>>,
}

impl District {
    /// Creates an empty district. Fails if `boundary` has fewer than three
    /// points.
    pub fn new(id: DistrictId, name: &str, boundary: Vec<Point>) -> Result<Self, GeometryError> {
        Ok(District {
            id,
            name: name.to_string(),
            boundary: Polygon::new(boundary)?,
            units: BTreeMap::new(),
        })
    }

    /// Adds `unit` to its gang's entry. Intended for building districts before
    /// handing them to [`Board::new`](super::state::Board::new), which
    /// validates gang references and unit ids.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.push_unit(unit);
        self
    }

    /// Returns the district id.
    pub fn id(&self) -> DistrictId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the boundary points in canonical map space.
    pub fn boundary(&self) -> &[Point] {
        self.boundary.points()
    }

    /// Mean of the boundary points, used as the label/anchor position.
    pub fn centroid(&self) -> Point {
        self.boundary.centroid()
    }

    /// True if `point` (in canonical map space) lies inside the boundary.
    pub fn contains(&self, point: Point) -> bool {
        self.boundary.contains(point)
    }

    /// Gang id to units, ordered by gang id. No entry is empty.
    pub fn units(&self) -> &BTreeMap<String, Vec<Unit>> {
        &self.units
    }

    /// Units of `gang` in this district; empty if the gang has none here.
    pub fn units_of(&self, gang: &str) -> &[Unit] {
        self.units.get(gang).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of units of all gangs here.
    pub fn total_units(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    /// Returns the unit with `id` if it is in this district.
    pub fn find_unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.values().flatten().find(|u| u.id == id)
    }

    pub(crate) fn push_unit(&mut self, unit: Unit) {
        self.units.entry(unit.gang.clone()).or_default().push(unit);
    }

    /// Removes the unit with `id`, dropping its gang entry if it empties.
    pub(crate) fn take_unit(&mut self, id: UnitId) -> Option<Unit> {
        let (gang, pos) = self.units.iter().find_map(|(gang, units)| {
            units
                .iter()
                .position(|u| u.id == id)
                .map(|pos| (gang.clone(), pos))
        })?;

        let entry = self.units.get_mut(&gang)?;
        let unit = entry.remove(pos);
        if entry.is_empty() {
            self.units.remove(&gang);
        }
        Some(unit)
    }

    pub(crate) fn prune_empty(&mut self) {
        self.units.retain(|_, units| !units.is_empty());
    }

    pub(crate) fn all_units(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.units
            .iter()
            .flat_map(|(gang, units)| units.iter().map(move |u| (gang.as_str(), u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::unit::UnitType;

    fn triangle() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(0.0, 30.0)]
    }

    #[test]
    fn rejects_degenerate_boundary() {
        let err = District::new(DistrictId(0), "Nowhere", vec![Point::new(0.0, 0.0)]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidPolygon { points: 1 });
    }

    #[test]
    fn centroid_is_mean_of_boundary() {
        let d = District::new(DistrictId(0), "Tri", triangle()).unwrap();
        assert_eq!(d.centroid(), Point::new(10.0, 10.0));
        assert!(d.contains(Point::new(5.0, 5.0)));
        assert!(!d.contains(Point::new(25.0, 25.0)));
    }

    #[test]
    fn take_last_unit_prunes_entry() {
        let mut d = District::new(DistrictId(0), "Tri", triangle())
            .unwrap()
            .with_unit(Unit::new(UnitId(1), UnitType::Solo, "scavs"))
            .with_unit(Unit::new(UnitId(2), UnitType::Drone, "animals"));

        assert_eq!(d.total_units(), 2);
        let taken = d.take_unit(UnitId(1)).unwrap();
        assert_eq!(taken.unit_type, UnitType::Solo);
        assert!(!d.units().contains_key("scavs"));
        assert!(d.units_of("scavs").is_empty());
        assert_eq!(d.units_of("animals").len(), 1);
        assert!(d.take_unit(UnitId(1)).is_none());
    }

    #[test]
    fn units_keep_insertion_order_within_gang() {
        let d = District::new(DistrictId(0), "Tri", triangle())
            .unwrap()
            .with_unit(Unit::new(UnitId(5), UnitType::Drone, "scavs"))
            .with_unit(Unit::new(UnitId(3), UnitType::Solo, "scavs"));
        let ids: Vec<u64> = d.units_of("scavs").iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![5, 3]);
        assert_eq!(d.find_unit(UnitId(3)).map(|u| u.unit_type), Some(UnitType::Solo));
    }
}
