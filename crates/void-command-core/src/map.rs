//! Game map structure with hexes, active selection and fleet movement.

use crate::hex::HexCoord;
use crate::settings::MapSettings;
use crate::types::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// What occupies a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Placeholder for a hex with no content.
    Empty,
    Planet,
    Fleet,
}

/// One entity stacked on a hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Facing in degrees; only meaningful for fleets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u16>,
}

impl Element {
    /// Create an element without rotation.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            rotation: None,
        }
    }

    /// Placeholder element for an unoccupied hex, `empty-{x}-{y}`.
    pub fn empty_at(coord: HexCoord) -> Self {
        Self::new(format!("empty-{}-{}", coord.x, coord.y), ElementKind::Empty)
    }

    /// Create a fleet element facing `rotation` degrees.
    pub fn fleet(id: impl Into<ElementId>, rotation: u16) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Fleet,
            rotation: Some(rotation),
        }
    }

    /// Check if this element is a fleet.
    pub fn is_fleet(&self) -> bool {
        self.kind == ElementKind::Fleet
    }
}

/// A single hex on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHex {
    /// Position on the map.
    pub coord: HexCoord,
    /// Entities on this hex, in placement order.
    pub elements: Vec<Element>,
}

impl MapHex {
    /// Create a hex holding a single element.
    pub fn new(coord: HexCoord, element: Element) -> Self {
        Self {
            coord,
            elements: vec![element],
        }
    }

    /// Find an element by id.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Find a fleet element by id.
    pub fn fleet(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.is_fleet() && e.id == id)
    }

    /// Replace the element with the same id, or append it.
    ///
    /// The element always ends up last.
    pub fn upsert(&mut self, element: Element) {
        self.elements.retain(|e| e.id != element.id);
        self.elements.push(element);
    }

    /// Remove an element by id. Returns the removed element.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let position = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(position))
    }
}

/// Result of a successful fleet move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetMove {
    pub fleet_id: ElementId,
    pub from: HexCoord,
    pub to: HexCoord,
    pub rotation: u16,
}

/// The hex grid.
///
/// The active hex is stored once, as a coordinate, so the per-hex active
/// flag and the active-hex reference can never disagree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HexMap {
    hexes: Vec<MapHex>,
    index: HashMap<HexCoord, usize>,
    active: Option<HexCoord>,
}

impl HexMap {
    /// Create an empty map with no hexes and no active hex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map over a set of hexes, with nothing active.
    ///
    /// Later duplicates of a coordinate are dropped.
    pub fn from_hexes(hexes: impl IntoIterator<Item = MapHex>) -> Self {
        let mut map = Self::new();
        for hex in hexes {
            if map.index.contains_key(&hex.coord) {
                continue;
            }
            map.index.insert(hex.coord, map.hexes.len());
            map.hexes.push(hex);
        }
        map
    }

    /// Populate the full rectangular grid and activate the fleet seed.
    ///
    /// Replaces any existing content.
    pub fn initialize(&mut self, settings: &MapSettings) {
        let mut hexes = Vec::new();
        for x in 0..=settings.max_x {
            for y in 0..=settings.max_y {
                let coord = HexCoord::new(x, y);
                let element = if coord == settings.fleet_seed {
                    Element::new(settings.fleet_id.clone(), ElementKind::Fleet)
                } else if coord == settings.planet_seed {
                    Element::new(settings.planet_id.clone(), ElementKind::Planet)
                } else {
                    Element::empty_at(coord)
                };
                hexes.push(MapHex::new(coord, element));
            }
        }

        *self = Self::from_hexes(hexes);
        self.active = self.index.get(&settings.fleet_seed).map(|_| settings.fleet_seed);
        debug!(
            hexes = self.hexes.len(),
            active = ?self.active,
            "map initialized"
        );
    }

    /// Get the hex at (x, y), if it exists.
    pub fn get_hex(&self, x: i32, y: i32) -> Option<&MapHex> {
        self.hex(&HexCoord::new(x, y))
    }

    /// Get the hex at a coordinate, if it exists.
    pub fn hex(&self, coord: &HexCoord) -> Option<&MapHex> {
        self.index.get(coord).map(|&i| &self.hexes[i])
    }

    fn hex_mut(&mut self, coord: &HexCoord) -> Option<&mut MapHex> {
        let position = *self.index.get(coord)?;
        self.hexes.get_mut(position)
    }

    /// Check if a coordinate exists on this map.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.index.contains_key(coord)
    }

    /// Make (x, y) the only active hex.
    ///
    /// If no hex matches, nothing is active afterwards.
    pub fn set_active_hex(&mut self, x: i32, y: i32) -> Option<&MapHex> {
        let coord = HexCoord::new(x, y);
        self.active = self.contains(&coord).then_some(coord);
        self.active_hex()
    }

    /// Deactivate every hex.
    pub fn clear_active_hex(&mut self) {
        self.active = None;
    }

    /// The active hex, if any.
    pub fn active_hex(&self) -> Option<&MapHex> {
        self.active.as_ref().and_then(|c| self.hex(c))
    }

    /// Coordinate of the active hex, if any.
    pub fn active_coord(&self) -> Option<HexCoord> {
        self.active
    }

    /// Check whether the hex at `coord` is the active one.
    pub fn is_active(&self, coord: &HexCoord) -> bool {
        self.active.as_ref() == Some(coord)
    }

    /// Upsert an element at (x, y) keyed by element id.
    ///
    /// Returns false if no hex exists there.
    pub fn update_hex_element(&mut self, x: i32, y: i32, element: Element) -> bool {
        match self.hex_mut(&HexCoord::new(x, y)) {
            Some(hex) => {
                hex.upsert(element);
                true
            }
            None => false,
        }
    }

    /// Move a fleet element between hexes, turning it to face the move.
    ///
    /// Does nothing and returns `None` unless the source hex holds a fleet
    /// with this id and the destination hex exists.
    pub fn move_fleet(&mut self, from: HexCoord, to: HexCoord, fleet_id: &str) -> Option<FleetMove> {
        let has_fleet = self.hex(&from).and_then(|h| h.fleet(fleet_id)).is_some();
        if !has_fleet || !self.contains(&to) {
            debug!(fleet = fleet_id, %from, %to, "fleet move ignored");
            return None;
        }

        let rotation = from.rotation_towards(&to);
        if let Some(source) = self.hex_mut(&from) {
            source.remove(fleet_id);
        }
        if let Some(destination) = self.hex_mut(&to) {
            destination.upsert(Element::fleet(fleet_id, rotation));
        }

        debug!(fleet = fleet_id, %from, %to, rotation, "fleet moved");
        Some(FleetMove {
            fleet_id: fleet_id.to_string(),
            from,
            to,
            rotation,
        })
    }

    /// First fleet element on the active hex.
    pub fn active_fleet(&self) -> Option<&Element> {
        self.active_hex()?.elements.iter().find(|e| e.is_fleet())
    }

    /// Whether a fleet on the active hex may move to `to`.
    ///
    /// The destination must exist and be adjacent to the active hex.
    pub fn is_legal_fleet_destination(&self, to: &HexCoord) -> bool {
        match (self.active, self.active_fleet()) {
            (Some(from), Some(_)) => self.contains(to) && from.is_adjacent(to),
            _ => false,
        }
    }

    /// Adjacent hexes that exist on this map.
    pub fn neighbors(&self, coord: &HexCoord) -> Vec<HexCoord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|c| self.contains(c))
            .collect()
    }

    /// All hexes in grid order.
    pub fn hexes(&self) -> &[MapHex] {
        &self.hexes
    }

    /// Count total hexes in the map.
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    /// Check if the map has not been initialized.
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> HexMap {
        let mut map = HexMap::new();
        map.initialize(&MapSettings::default());
        map
    }

    fn fleet_at(coord: HexCoord) -> HexMap {
        HexMap::from_hexes(vec![
            MapHex::new(coord, Element::new("fleet-1", ElementKind::Fleet)),
            MapHex::new(HexCoord::new(5, 4), Element::empty_at(HexCoord::new(5, 4))),
            MapHex::new(HexCoord::new(6, 5), Element::empty_at(HexCoord::new(6, 5))),
        ])
    }

    #[test]
    fn test_new_map_is_empty() {
        let map = HexMap::new();
        assert!(map.is_empty());
        assert!(map.active_hex().is_none());
    }

    #[test]
    fn test_initialize_full_grid() {
        let map = initialized();
        assert_eq!(map.len(), 121);
        for x in 0..=10 {
            for y in 0..=10 {
                let hex = map.get_hex(x, y).unwrap();
                assert_eq!(hex.coord, HexCoord::new(x, y));
            }
        }
    }

    #[test]
    fn test_initialize_seeds() {
        let map = initialized();
        let planet = map.get_hex(5, 4).unwrap();
        assert_eq!(planet.elements, vec![Element::new("planet-earth", ElementKind::Planet)]);
        assert!(!map.is_active(&planet.coord));

        let fleet = map.get_hex(5, 5).unwrap();
        assert_eq!(fleet.elements, vec![Element::new("fleet-1", ElementKind::Fleet)]);
        assert_eq!(map.active_hex(), Some(fleet));

        let empty = map.get_hex(0, 0).unwrap();
        assert_eq!(empty.elements, vec![Element::empty_at(HexCoord::new(0, 0))]);
        assert_eq!(empty.elements[0].id, "empty-0-0");
    }

    #[test]
    fn test_get_hex_out_of_range() {
        let map = initialized();
        assert!(map.get_hex(99, 99).is_none());
        assert!(map.get_hex(-1, 0).is_none());
        assert!(map.get_hex(11, 10).is_none());
    }

    #[test]
    fn test_set_active_hex() {
        let mut map = initialized();
        let active = map.set_active_hex(5, 4).map(|h| h.coord);
        assert_eq!(active, Some(HexCoord::new(5, 4)));
        assert!(!map.is_active(&HexCoord::new(5, 5)));
        let active_count = map.hexes().iter().filter(|h| map.is_active(&h.coord)).count();
        assert_eq!(active_count, 1);
    }

    #[test]
    fn test_set_active_hex_missing_clears() {
        let mut map = initialized();
        assert!(map.set_active_hex(99, 99).is_none());
        assert!(map.active_hex().is_none());
        assert!(map.hexes().iter().all(|h| !map.is_active(&h.coord)));
    }

    #[test]
    fn test_clear_active_hex() {
        let mut map = initialized();
        map.clear_active_hex();
        assert!(map.active_hex().is_none());
        // Clearing twice is harmless
        map.clear_active_hex();
        assert!(map.active_coord().is_none());
    }

    #[test]
    fn test_update_hex_element_appends() {
        let mut map = initialized();
        assert!(map.update_hex_element(0, 0, Element::new("new-fleet", ElementKind::Fleet)));
        let hex = map.get_hex(0, 0).unwrap();
        assert_eq!(hex.elements.len(), 2);
        assert_eq!(hex.elements[1].id, "new-fleet");
        // Other hexes untouched
        assert_eq!(map.get_hex(5, 4).unwrap().elements.len(), 1);
    }

    #[test]
    fn test_update_hex_element_replaces_same_id() {
        let mut map = initialized();
        map.update_hex_element(5, 4, Element::new("planet-earth", ElementKind::Planet));
        assert_eq!(
            map.get_hex(5, 4).unwrap().elements,
            vec![Element::new("planet-earth", ElementKind::Planet)]
        );
    }

    #[test]
    fn test_update_hex_element_missing_hex() {
        let mut map = initialized();
        let before = map.clone();
        assert!(!map.update_hex_element(50, 50, Element::new("x", ElementKind::Planet)));
        assert_eq!(map, before);
    }

    #[test]
    fn test_move_fleet() {
        let mut map = fleet_at(HexCoord::new(5, 5));
        let moved = map
            .move_fleet(HexCoord::new(5, 5), HexCoord::new(6, 5), "fleet-1")
            .unwrap();
        assert_eq!(moved.rotation, 60);
        assert!(map.get_hex(5, 5).unwrap().fleet("fleet-1").is_none());
        let element = map.get_hex(6, 5).unwrap().fleet("fleet-1").unwrap();
        assert_eq!(element.rotation, Some(60));
        assert_eq!(
            map.get_hex(5, 4).unwrap().elements,
            vec![Element::empty_at(HexCoord::new(5, 4))]
        );
    }

    #[test]
    fn test_move_fleet_preserves_planet() {
        let mut map = initialized();
        map.move_fleet(HexCoord::new(5, 5), HexCoord::new(5, 4), "fleet-1")
            .unwrap();
        let destination = map.get_hex(5, 4).unwrap();
        assert_eq!(destination.elements.len(), 2);
        assert!(destination.element("planet-earth").is_some());
        assert_eq!(destination.fleet("fleet-1").unwrap().rotation, Some(0));
    }

    #[test]
    fn test_move_missing_fleet_is_noop() {
        let mut map = fleet_at(HexCoord::new(5, 5));
        let before = map.clone();
        assert!(map
            .move_fleet(HexCoord::new(5, 5), HexCoord::new(6, 5), "ghost")
            .is_none());
        assert_eq!(map, before);
    }

    #[test]
    fn test_move_requires_fleet_kind() {
        let mut map = initialized();
        let before = map.clone();
        assert!(map
            .move_fleet(HexCoord::new(5, 4), HexCoord::new(5, 3), "planet-earth")
            .is_none());
        assert_eq!(map, before);
    }

    #[test]
    fn test_move_to_missing_hex_is_noop() {
        let mut map = initialized();
        let before = map.clone();
        assert!(map
            .move_fleet(HexCoord::new(5, 5), HexCoord::new(5, 42), "fleet-1")
            .is_none());
        assert_eq!(map, before);
    }

    #[test]
    fn test_legal_destinations() {
        let mut map = initialized();
        // Odd column 5: NE of (5,5) is (6,5), (6,4) is not adjacent
        assert!(map.is_legal_fleet_destination(&HexCoord::new(6, 5)));
        assert!(map.is_legal_fleet_destination(&HexCoord::new(5, 4)));
        assert!(!map.is_legal_fleet_destination(&HexCoord::new(6, 4)));
        assert!(!map.is_legal_fleet_destination(&HexCoord::new(5, 5)));

        map.set_active_hex(0, 0);
        assert!(!map.is_legal_fleet_destination(&HexCoord::new(0, 1)));
    }

    #[test]
    fn test_neighbors_clipped_to_grid() {
        let map = initialized();
        assert_eq!(map.neighbors(&HexCoord::new(0, 0)).len(), 2);
        assert_eq!(map.neighbors(&HexCoord::new(5, 5)).len(), 6);
    }
}
