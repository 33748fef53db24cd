//! Core type aliases used throughout the crate.

use serde::{Deserialize, Serialize};

/// Unique identifier for a game session.
pub type GameId = String;

/// Identifier of a commander record.
pub type CommanderId = String;

/// Identifier of a fleet record.
pub type FleetId = String;

/// Identifier of a unit owned by a commander.
pub type UnitId = String;

/// Identifier of an element placed on a map hex.
pub type ElementId = String;

/// Identifier of an entry in the action queue.
pub type ActionId = String;

/// Game mode chosen when the session is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameType {
    #[default]
    Demo,
    Classic,
    OneCommander,
    Campaign,
    Battle,
}

impl GameType {
    /// Get all game type variants.
    pub const fn all() -> &'static [GameType] {
        &[
            GameType::Demo,
            GameType::Classic,
            GameType::OneCommander,
            GameType::Campaign,
            GameType::Battle,
        ]
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::Demo => write!(f, "Demo"),
            GameType::Classic => write!(f, "Classic"),
            GameType::OneCommander => write!(f, "One Commander"),
            GameType::Campaign => write!(f, "Campaign"),
            GameType::Battle => write!(f, "Battle"),
        }
    }
}

/// Political faction a commander, unit or fleet belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Faction {
    #[default]
    Human,
    Karnak,
    Ethyrian,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Human => write!(f, "Human"),
            Faction::Karnak => write!(f, "Karnak"),
            Faction::Ethyrian => write!(f, "Ethyrian"),
        }
    }
}

/// Biological species of a commander.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Specie {
    #[default]
    Human,
    Cyborg,
    Karnak,
    Ethyrian,
}

impl std::fmt::Display for Specie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Specie::Human => write!(f, "Human"),
            Specie::Cyborg => write!(f, "Cyborg"),
            Specie::Karnak => write!(f, "Karnak"),
            Specie::Ethyrian => write!(f, "Ethyrian"),
        }
    }
}

/// Opaque payload for items and cards.
///
/// The core stores these and hands them back; it never interprets them.
pub type Opaque = serde_json::Value;
