//! Fleets and their joined view with the commanding officer.

use crate::commander::{Commander, Commanders, DEFAULT_COMMANDER_ID};
use crate::types::{CommanderId, Faction, FleetId, Opaque};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Baseline power of a fleet.
pub const FLEET_BASE_POWER: u32 = 10;

/// Id of the fleet present at bootstrap.
pub const DEFAULT_FLEET_ID: &str = "fleet-1";

/// A fleet, referencing its commander by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    /// The commander is looked up, never owned.
    pub commander_id: CommanderId,
    pub faction: Faction,
    pub cards: Vec<Opaque>,
    /// Fixed baseline; not derived from the commander or units.
    pub power: u32,
}

impl Fleet {
    /// Create a fleet with no cards and baseline power.
    pub fn new(id: impl Into<FleetId>, commander_id: impl Into<CommanderId>, faction: Faction) -> Self {
        Self {
            id: id.into(),
            commander_id: commander_id.into(),
            faction,
            cards: Vec::new(),
            power: FLEET_BASE_POWER,
        }
    }
}

/// A fleet together with a snapshot of its commander, for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FleetWithCommander {
    #[serde(flatten)]
    pub fleet: Fleet,
    pub commander: Commander,
}

/// All fleets in the game, in creation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Fleet>", into = "Vec<Fleet>")]
pub struct Fleets {
    list: Vec<Fleet>,
    index: HashMap<FleetId, usize>,
}

impl Fleets {
    /// Get a fleet by id, falling back to the first fleet.
    pub fn get(&self, id: &str) -> &Fleet {
        let position = self.index.get(id).copied().unwrap_or(0);
        &self.list[position]
    }

    /// Get a fleet by id without fallback.
    pub fn find(&self, id: &str) -> Option<&Fleet> {
        self.index.get(id).map(|&i| &self.list[i])
    }

    /// Resolve a fleet and join it with its commander.
    ///
    /// Both lookups use the first-element fallback.
    pub fn with_commander(&self, id: &str, commanders: &Commanders) -> FleetWithCommander {
        let fleet = self.get(id).clone();
        let commander = commanders.get(&fleet.commander_id).clone();
        FleetWithCommander { fleet, commander }
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Fleet> {
        self.list.iter()
    }

    /// All fleets as a slice.
    pub fn as_slice(&self) -> &[Fleet] {
        &self.list
    }

    /// Number of fleets.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Always false after construction.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Default for Fleets {
    fn default() -> Self {
        Self::from(vec![Fleet::new(
            DEFAULT_FLEET_ID,
            DEFAULT_COMMANDER_ID,
            Faction::Human,
        )])
    }
}

impl From<Vec<Fleet>> for Fleets {
    fn from(list: Vec<Fleet>) -> Self {
        if list.is_empty() {
            return Self::default();
        }
        let mut index = HashMap::new();
        for (i, fleet) in list.iter().enumerate() {
            index.entry(fleet.id.clone()).or_insert(i);
        }
        Self { list, index }
    }
}

impl From<Fleets> for Vec<Fleet> {
    fn from(fleets: Fleets) -> Self {
        fleets.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commander::CommanderName;

    #[test]
    fn test_bootstrap_fleet() {
        let fleets = Fleets::default();
        assert_eq!(fleets.len(), 1);
        let fleet = fleets.get(DEFAULT_FLEET_ID);
        assert_eq!(fleet.commander_id, DEFAULT_COMMANDER_ID);
        assert_eq!(fleet.faction, Faction::Human);
        assert_eq!(fleet.power, FLEET_BASE_POWER);
    }

    #[test]
    fn test_get_falls_back_to_first() {
        let fleets = Fleets::from(vec![
            Fleet::new("fleet-1", "commander-1", Faction::Human),
            Fleet::new("fleet-2", "commander-2", Faction::Karnak),
        ]);
        assert_eq!(fleets.get("fleet-2").faction, Faction::Karnak);
        assert_eq!(fleets.get("ghost").id, "fleet-1");
        assert!(fleets.find("ghost").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let fleets = Fleets::from(vec![
            Fleet::new("fleet-1", "commander-1", Faction::Human),
            Fleet::new("fleet-1", "commander-2", Faction::Karnak),
        ]);
        assert_eq!(fleets.len(), 2);
        assert_eq!(fleets.get("fleet-1").commander_id, "commander-1");
        assert_eq!(fleets.find("fleet-1").map(|f| f.faction), Some(Faction::Human));
    }

    #[test]
    fn test_with_commander_joins_by_id() {
        let mut commanders = Commanders::default();
        commanders.create("commander-2", CommanderName::QueenVeyraKhar);
        let fleets = Fleets::from(vec![
            Fleet::new("fleet-1", "commander-1", Faction::Human),
            Fleet::new("fleet-2", "commander-2", Faction::Karnak),
        ]);

        let joined = fleets.with_commander("fleet-2", &commanders);
        assert_eq!(joined.fleet.id, "fleet-2");
        assert_eq!(joined.commander.id, "commander-2");
        assert_eq!(joined.commander.name, CommanderName::QueenVeyraKhar);
    }

    #[test]
    fn test_with_commander_dangling_reference_falls_back() {
        let commanders = Commanders::default();
        let fleets = Fleets::from(vec![Fleet::new("fleet-9", "ghost", Faction::Ethyrian)]);
        let joined = fleets.with_commander("fleet-9", &commanders);
        assert_eq!(joined.commander.id, DEFAULT_COMMANDER_ID);
    }

    #[test]
    fn test_joined_view_serializes_flat() {
        let joined = Fleets::default().with_commander(DEFAULT_FLEET_ID, &Commanders::default());
        let value = serde_json::to_value(&joined).unwrap();
        assert_eq!(value["id"], "fleet-1");
        assert_eq!(value["commander"]["id"], "commander-1");
    }
}
