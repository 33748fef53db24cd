//! Game settings and configuration.

use crate::commander::{CommanderName, DEFAULT_COMMANDER_ID};
use crate::fleet::DEFAULT_FLEET_ID;
use crate::hex::HexCoord;
use crate::resource::Resources;
use crate::types::{CommanderId, ElementId, GameId, GameType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Largest number of columns or rows a map may have.
pub const MAX_MAP_SIZE: i32 = 128;

/// Layout of the hex grid and its seeded content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Largest column index (inclusive).
    pub max_x: i32,
    /// Largest row index (inclusive).
    pub max_y: i32,
    /// Hex that starts with the home planet.
    pub planet_seed: HexCoord,
    /// Element id of the home planet.
    pub planet_id: ElementId,
    /// Hex that starts with the first fleet; active at start.
    pub fleet_seed: HexCoord,
    /// Element id of the first fleet.
    pub fleet_id: ElementId,
}

impl MapSettings {
    /// Number of hexes the grid will contain.
    pub fn hex_count(&self) -> usize {
        let columns = usize::try_from(i64::from(self.max_x) + 1).unwrap_or(0);
        let rows = usize::try_from(i64::from(self.max_y) + 1).unwrap_or(0);
        columns.saturating_mul(rows)
    }

    /// Check if a coordinate lies inside the grid.
    pub fn contains(&self, coord: &HexCoord) -> bool {
        coord.in_bounds(self.max_x, self.max_y)
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            max_x: 10,
            max_y: 10,
            planet_seed: HexCoord::new(5, 4),
            planet_id: "planet-earth".to_string(),
            fleet_seed: HexCoord::new(5, 5),
            fleet_id: DEFAULT_FLEET_ID.to_string(),
        }
    }
}

/// Configuration for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Identifier for the game.
    pub id: GameId,
    /// Display name for the game.
    pub name: String,
    /// Game mode.
    pub game_type: GameType,
    /// Grid layout.
    #[serde(default)]
    pub map: MapSettings,
    /// Starting resource balances.
    #[serde(default)]
    pub resources: Resources,
    /// Id of the commander leading the first fleet.
    pub commander_id: CommanderId,
    /// Template of the first commander.
    pub commander: CommanderName,
    /// Build the grid when the game is created.
    pub initialize_map: bool,
}

impl GameSettings {
    /// Create default settings for a new game.
    pub fn new(name: String) -> Self {
        Self {
            id: "game-1".to_string(),
            name,
            game_type: GameType::Demo,
            map: MapSettings::default(),
            resources: Resources::default(),
            commander_id: DEFAULT_COMMANDER_ID.to_string(),
            commander: CommanderName::AdmiralKryosVantrel,
            initialize_map: false,
        }
    }

    /// The demo game every session starts from.
    pub fn demo() -> Self {
        Self::new("Demo Game".to_string())
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let result = self.check();
        if let Err(e) = &result {
            warn!(error = %e, "rejected game settings");
        }
        result
    }

    fn check(&self) -> Result<(), SettingsError> {
        if self.name.is_empty() {
            return Err(SettingsError::EmptyName);
        }
        if self.name.len() > 64 {
            return Err(SettingsError::NameTooLong);
        }
        if self.id.is_empty() {
            return Err(SettingsError::EmptyId);
        }
        if self.map.max_x < 0 || self.map.max_y < 0 {
            return Err(SettingsError::EmptyMap);
        }
        if self.map.max_x >= MAX_MAP_SIZE || self.map.max_y >= MAX_MAP_SIZE {
            return Err(SettingsError::MapTooLarge);
        }
        if !self.map.contains(&self.map.planet_seed) {
            return Err(SettingsError::SeedOutOfBounds(self.map.planet_seed));
        }
        if !self.map.contains(&self.map.fleet_seed) {
            return Err(SettingsError::SeedOutOfBounds(self.map.fleet_seed));
        }
        if self.map.planet_seed == self.map.fleet_seed {
            return Err(SettingsError::SeedsOverlap);
        }
        if self.map.planet_id == self.map.fleet_id {
            return Err(SettingsError::DuplicateElementId(self.map.fleet_id.clone()));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::demo()
    }
}

/// Errors from invalid game settings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Game name cannot be empty")]
    EmptyName,
    #[error("Game name must be 64 characters or less")]
    NameTooLong,
    #[error("Game id cannot be empty")]
    EmptyId,
    #[error("Map must contain at least one hex")]
    EmptyMap,
    #[error("Map cannot be larger than {} hexes per side", MAX_MAP_SIZE)]
    MapTooLarge,
    #[error("Seed {0} lies outside the map")]
    SeedOutOfBounds(HexCoord),
    #[error("Planet and fleet cannot start on the same hex")]
    SeedsOverlap,
    #[error("Element id {0} is used by more than one seed")]
    DuplicateElementId(ElementId),
    #[error("Invalid settings JSON: {0}")]
    Parse(String),
}
