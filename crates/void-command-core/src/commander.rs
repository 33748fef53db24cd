//! Commanders, the units they own, and the commander roster.

use crate::types::{CommanderId, Faction, Opaque, Specie, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Baseline power of a freshly created commander.
pub const COMMANDER_BASE_POWER: u32 = 10;

/// Id of the commander present at bootstrap.
pub const DEFAULT_COMMANDER_ID: &str = "commander-1";

/// Named commander templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommanderName {
    #[default]
    #[serde(rename = "Admiral Kryos Vantrel")]
    AdmiralKryosVantrel,
    #[serde(rename = "Captain Zara Thorne")]
    CaptainZaraThorne,
    #[serde(rename = "Commander Raxus Vel")]
    CommanderRaxusVel,
    #[serde(rename = "Queen Veyra Khar")]
    QueenVeyraKhar,
    #[serde(rename = "Overseer Zenith")]
    OverseerZenith,
}

/// Fixed data copied from a template when a commander is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommanderInfo {
    pub name: CommanderName,
    pub description: &'static str,
    pub faction: Faction,
    pub specie: Specie,
    pub image: &'static str,
}

impl CommanderName {
    /// Get all template names.
    pub const fn all() -> &'static [CommanderName] {
        &[
            CommanderName::AdmiralKryosVantrel,
            CommanderName::CaptainZaraThorne,
            CommanderName::CommanderRaxusVel,
            CommanderName::QueenVeyraKhar,
            CommanderName::OverseerZenith,
        ]
    }

    /// Display name, as shown in the UI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CommanderName::AdmiralKryosVantrel => "Admiral Kryos Vantrel",
            CommanderName::CaptainZaraThorne => "Captain Zara Thorne",
            CommanderName::CommanderRaxusVel => "Commander Raxus Vel",
            CommanderName::QueenVeyraKhar => "Queen Veyra Khar",
            CommanderName::OverseerZenith => "Overseer Zenith",
        }
    }

    /// Look up a template by its display name.
    pub fn from_name(name: &str) -> Option<CommanderName> {
        Self::all().iter().copied().find(|n| n.as_str() == name)
    }

    /// Template data for this name.
    pub const fn info(&self) -> CommanderInfo {
        match self {
            CommanderName::AdmiralKryosVantrel => CommanderInfo {
                name: *self,
                description:
                    "A seasoned tactician known for his icy resolve and strategic brilliance.",
                faction: Faction::Human,
                specie: Specie::Human,
                image: "kryos_vantrel.png",
            },
            CommanderName::CaptainZaraThorne => CommanderInfo {
                name: *self,
                description:
                    "A daring explorer with a reputation for bold maneuvers and quick thinking.",
                faction: Faction::Human,
                specie: Specie::Human,
                image: "zara_thorne.png",
            },
            CommanderName::CommanderRaxusVel => CommanderInfo {
                name: *self,
                description: "A fierce Ethyrian warrior, master of alien technology and tactics.",
                faction: Faction::Ethyrian,
                specie: Specie::Ethyrian,
                image: "raxus_vel.png",
            },
            CommanderName::QueenVeyraKhar => CommanderInfo {
                name: *self,
                description: "The ruthless military Queen of the Karnak, feared for her cunning, brutality, and relentless command.",
                faction: Faction::Karnak,
                specie: Specie::Karnak,
                image: "veyra_khar.png",
            },
            CommanderName::OverseerZenith => CommanderInfo {
                name: *self,
                description: "A mysterious leader rumored to be part machine, part alien.",
                faction: Faction::Human,
                specie: Specie::Cyborg,
                image: "overseer_zenith.png",
            },
        }
    }
}

impl std::fmt::Display for CommanderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commander leading fleets and owning units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commander {
    pub id: CommanderId,
    /// Display name. Renaming changes only this field.
    pub name: CommanderName,
    pub description: String,
    pub faction: Faction,
    pub specie: Specie,
    /// Portrait file name.
    pub image: String,
    pub level: u32,
    pub experience: u32,
    /// Baseline power; not derived from owned units.
    pub power: u32,
    pub items: Vec<Opaque>,
    pub units: Vec<Unit>,
    pub cards: Vec<Opaque>,
}

impl Commander {
    /// Create a commander from a named template.
    pub fn from_template(id: impl Into<CommanderId>, name: CommanderName) -> Self {
        let info = name.info();
        Self {
            id: id.into(),
            name,
            description: info.description.to_string(),
            faction: info.faction,
            specie: info.specie,
            image: info.image.to_string(),
            level: 1,
            experience: 0,
            power: COMMANDER_BASE_POWER,
            items: Vec::new(),
            units: Vec::new(),
            cards: Vec::new(),
        }
    }

    /// Sum of the power of every attached unit.
    pub fn unit_power(&self) -> f64 {
        self.units.iter().map(|u| u.power).sum()
    }
}

/// Unit categories; a unit can carry several.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Ground,
    Air,
    Biological,
    Mech,
}

/// Types of units available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitType {
    // Human
    #[default]
    Striker,
    Enforcer,
    Firestormer,
    Aegis,
    Titan,
    #[serde(rename = "War sun")]
    WarSun,

    // Karnak
    Detonator,
    Tunneler,
    Skylash,
    Assimilator,
    Devourer,
    Behemoth,

    // Ethyrian
    Phantom,
    Sparhawk,
    #[serde(rename = "Astral Beam")]
    AstralBeam,
    Sentinel,
    Stormseer,
    Eclipse,
}

impl UnitType {
    /// Faction that fields this unit type.
    pub const fn faction(&self) -> Faction {
        match self {
            UnitType::Striker
            | UnitType::Enforcer
            | UnitType::Firestormer
            | UnitType::Aegis
            | UnitType::Titan
            | UnitType::WarSun => Faction::Human,
            UnitType::Detonator
            | UnitType::Tunneler
            | UnitType::Skylash
            | UnitType::Assimilator
            | UnitType::Devourer
            | UnitType::Behemoth => Faction::Karnak,
            UnitType::Phantom
            | UnitType::Sparhawk
            | UnitType::AstralBeam
            | UnitType::Sentinel
            | UnitType::Stormseer
            | UnitType::Eclipse => Faction::Ethyrian,
        }
    }

    /// Get all unit type variants.
    pub const fn all() -> &'static [UnitType] {
        &[
            UnitType::Striker,
            UnitType::Enforcer,
            UnitType::Firestormer,
            UnitType::Aegis,
            UnitType::Titan,
            UnitType::WarSun,
            UnitType::Detonator,
            UnitType::Tunneler,
            UnitType::Skylash,
            UnitType::Assimilator,
            UnitType::Devourer,
            UnitType::Behemoth,
            UnitType::Phantom,
            UnitType::Sparhawk,
            UnitType::AstralBeam,
            UnitType::Sentinel,
            UnitType::Stormseer,
            UnitType::Eclipse,
        ]
    }
}

/// A stack of identical units owned by a commander.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub categories: Vec<UnitCategory>,
    pub faction: Faction,
    pub tier: u32,
    pub quantity: u32,
    pub cost: u32,
    pub health: u32,
    pub damage: u32,
    pub initiative: u32,
    pub passives: Vec<Opaque>,
    pub cards: Vec<Opaque>,
    /// Zero until the unit is attached to a commander.
    pub power: f64,
}

impl Unit {
    const HEALTH_WEIGHT: f64 = 0.8;
    const DAMAGE_WEIGHT: f64 = 1.0;
    const INITIATIVE_WEIGHT: f64 = 0.5;

    /// Create a basic Striker stack. Power stays 0 until attached.
    pub fn new(id: impl Into<UnitId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            unit_type: UnitType::Striker,
            categories: vec![UnitCategory::Ground, UnitCategory::Biological],
            faction: Faction::Human,
            tier: 1,
            quantity,
            cost: 5,
            health: 3,
            damage: 1,
            initiative: 4,
            passives: Vec::new(),
            cards: vec![Opaque::from("Stimpack"), Opaque::from("Laser Gun")],
            power: 0.0,
        }
    }

    /// Weighted power of the whole stack.
    ///
    /// `(health * 0.8 * damage + initiative * damage * 0.5) * quantity`
    pub fn calculate_power(&self) -> f64 {
        let health = f64::from(self.health);
        let damage = f64::from(self.damage);
        let initiative = f64::from(self.initiative);
        (health * Self::HEALTH_WEIGHT * damage * Self::DAMAGE_WEIGHT
            + initiative * damage * Self::INITIATIVE_WEIGHT)
            * f64::from(self.quantity)
    }

    /// Check if the unit has a category tag.
    pub fn has_category(&self, category: UnitCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// All commanders in the game, in creation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Commander>", into = "Vec<Commander>")]
pub struct Commanders {
    list: Vec<Commander>,
    index: HashMap<CommanderId, usize>,
}

impl Commanders {
    /// Create a roster holding a single commander.
    pub fn new(first: Commander) -> Self {
        Self::from(vec![first])
    }

    /// Get a commander by id, falling back to the first commander.
    pub fn get(&self, id: &str) -> &Commander {
        let position = self.index.get(id).copied().unwrap_or(0);
        &self.list[position]
    }

    /// Get a commander by id without fallback.
    pub fn find(&self, id: &str) -> Option<&Commander> {
        self.index.get(id).map(|&i| &self.list[i])
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Commander> {
        let position = *self.index.get(id)?;
        self.list.get_mut(position)
    }

    /// Create a commander from a template and append it to the roster.
    ///
    /// An id that is already taken is still appended; lookups keep
    /// resolving to the earlier commander.
    pub fn create(&mut self, id: impl Into<CommanderId>, name: CommanderName) -> &Commander {
        let id = id.into();
        let position = self.list.len();
        debug!(commander = %id, template = %name, "commander created");
        self.index.entry(id.clone()).or_insert(position);
        self.list.push(Commander::from_template(id, name));
        &self.list[position]
    }

    /// Change the display name of a commander. Returns false for unknown ids.
    pub fn rename(&mut self, id: &str, new_name: CommanderName) -> bool {
        match self.find_mut(id) {
            Some(commander) => {
                commander.name = new_name;
                true
            }
            None => false,
        }
    }

    /// Attach a unit to a commander, computing its power.
    ///
    /// Returns the computed power, or `None` if the commander does not exist.
    pub fn add_unit(&mut self, commander_id: &str, mut unit: Unit) -> Option<f64> {
        let commander = self.find_mut(commander_id)?;
        unit.power = unit.calculate_power();
        let power = unit.power;
        debug!(commander = commander_id, unit = %unit.id, power, "unit attached");
        commander.units.push(unit);
        Some(power)
    }

    /// The most recently created commander.
    pub fn newest(&self) -> &Commander {
        &self.list[self.list.len() - 1]
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Commander> {
        self.list.iter()
    }

    /// All commanders as a slice.
    pub fn as_slice(&self) -> &[Commander] {
        &self.list
    }

    /// Number of commanders.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Always false after construction.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Default for Commanders {
    fn default() -> Self {
        Self::new(Commander::from_template(
            DEFAULT_COMMANDER_ID,
            CommanderName::AdmiralKryosVantrel,
        ))
    }
}

impl From<Vec<Commander>> for Commanders {
    /// The first commander with a given id wins lookups; an empty list
    /// falls back to the default roster so lookups always succeed.
    fn from(list: Vec<Commander>) -> Self {
        if list.is_empty() {
            return Self::default();
        }
        let mut index = HashMap::new();
        for (i, commander) in list.iter().enumerate() {
            index.entry(commander.id.clone()).or_insert(i);
        }
        Self { list, index }
    }
}

impl From<Commanders> for Vec<Commander> {
    fn from(commanders: Commanders) -> Self {
        commanders.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_power_formula() {
        let unit = Unit::new("u1", 2);
        assert!((unit.calculate_power() - 8.8).abs() < 1e-9);
    }

    #[test]
    fn test_factory_unit_has_zero_power() {
        let unit = Unit::new("u1", 3);
        assert_eq!(unit.power, 0.0);
        assert_eq!(unit.unit_type, UnitType::Striker);
        assert!(unit.has_category(UnitCategory::Ground));
        assert!(unit.has_category(UnitCategory::Biological));
        assert!(!unit.has_category(UnitCategory::Mech));
        assert_eq!(unit.cards.len(), 2);
    }

    #[test]
    fn test_add_unit_computes_power() {
        let mut roster = Commanders::default();
        let power = roster.add_unit(DEFAULT_COMMANDER_ID, Unit::new("u1", 3));
        assert!((power.unwrap() - 13.2).abs() < 1e-9);

        let commander = roster.get(DEFAULT_COMMANDER_ID);
        assert_eq!(commander.units.len(), 1);
        assert!((commander.units[0].power - 13.2).abs() < 1e-9);
        // Commander power is a fixed baseline
        assert_eq!(commander.power, COMMANDER_BASE_POWER);
        assert!((commander.unit_power() - 13.2).abs() < 1e-9);
    }

    #[test]
    fn test_add_unit_unknown_commander() {
        let mut roster = Commanders::default();
        assert_eq!(roster.add_unit("nobody", Unit::new("u1", 1)), None);
        assert!(roster.get(DEFAULT_COMMANDER_ID).units.is_empty());
    }

    #[test]
    fn test_create_from_template() {
        let mut roster = Commanders::default();
        let commander = roster.create("commander-2", CommanderName::QueenVeyraKhar);
        assert_eq!(commander.faction, Faction::Karnak);
        assert_eq!(commander.specie, Specie::Karnak);
        assert_eq!(commander.power, 10);
        assert_eq!(commander.level, 1);
        assert_eq!(commander.experience, 0);
        assert!(commander.units.is_empty());
        assert!(commander.items.is_empty());
        assert!(commander.cards.is_empty());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_create_duplicate_appends() {
        let mut roster = Commanders::default();
        let commander = roster.create(DEFAULT_COMMANDER_ID, CommanderName::OverseerZenith);
        assert_eq!(commander.name, CommanderName::OverseerZenith);
        assert_eq!(roster.len(), 2);
        // Lookups still resolve to the first commander with that id
        assert_eq!(
            roster.get(DEFAULT_COMMANDER_ID).name,
            CommanderName::AdmiralKryosVantrel
        );
        assert!(roster.rename(DEFAULT_COMMANDER_ID, CommanderName::CaptainZaraThorne));
        assert_eq!(roster.as_slice()[0].name, CommanderName::CaptainZaraThorne);
        assert_eq!(roster.newest().name, CommanderName::OverseerZenith);
    }

    #[test]
    fn test_from_list_first_duplicate_wins() {
        let roster = Commanders::from(vec![
            Commander::from_template("commander-1", CommanderName::QueenVeyraKhar),
            Commander::from_template("commander-1", CommanderName::CommanderRaxusVel),
        ]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("commander-1").name, CommanderName::QueenVeyraKhar);
    }

    #[test]
    fn test_get_falls_back_to_first() {
        let mut roster = Commanders::default();
        roster.create("commander-2", CommanderName::CaptainZaraThorne);
        assert_eq!(roster.get("commander-2").id, "commander-2");
        assert_eq!(roster.get("missing").id, DEFAULT_COMMANDER_ID);
        assert!(roster.find("missing").is_none());
    }

    #[test]
    fn test_rename_keeps_template_fields() {
        let mut roster = Commanders::default();
        assert!(roster.rename(DEFAULT_COMMANDER_ID, CommanderName::QueenVeyraKhar));
        let commander = roster.get(DEFAULT_COMMANDER_ID);
        assert_eq!(commander.name, CommanderName::QueenVeyraKhar);
        assert_eq!(commander.faction, Faction::Human);
        assert_eq!(commander.image, "kryos_vantrel.png");
        assert!(!roster.rename("missing", CommanderName::OverseerZenith));
    }

    #[test]
    fn test_template_catalog() {
        assert_eq!(CommanderName::all().len(), 5);
        let zenith = CommanderName::OverseerZenith.info();
        assert_eq!(zenith.faction, Faction::Human);
        assert_eq!(zenith.specie, Specie::Cyborg);
        assert_eq!(
            CommanderName::from_name("Commander Raxus Vel"),
            Some(CommanderName::CommanderRaxusVel)
        );
        assert_eq!(CommanderName::from_name("Nobody"), None);
    }

    #[test]
    fn test_unit_type_factions() {
        assert_eq!(UnitType::all().len(), 18);
        assert_eq!(UnitType::WarSun.faction(), Faction::Human);
        assert_eq!(UnitType::Behemoth.faction(), Faction::Karnak);
        assert_eq!(UnitType::AstralBeam.faction(), Faction::Ethyrian);
    }

    #[test]
    fn test_template_name_serialization() {
        let json = serde_json::to_string(&CommanderName::QueenVeyraKhar).unwrap();
        assert_eq!(json, "\"Queen Veyra Khar\"");
        let json = serde_json::to_string(&UnitType::WarSun).unwrap();
        assert_eq!(json, "\"War sun\"");
    }
}
