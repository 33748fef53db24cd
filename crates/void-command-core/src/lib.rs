//! Void Command Core Library
//!
//! This crate contains the authoritative game state for Void Command, a
//! turn-based space strategy game played on an odd-q hex grid. Rendering and
//! UI layers read from it and issue mutations against it; it never depends on
//! either.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Owned state**: Any number of independent games can coexist
//! - **One commit per operation**: Subscribers only ever see settled state
//! - **Serializable**: Settings, commands and events round-trip through serde

// Core modules
pub mod hex;
pub mod map;
pub mod types;

// Game state modules
pub mod action;
pub mod game_state;
pub mod resource;
pub mod settings;

// Commanders and fleets
pub mod commander;
pub mod fleet;

// Commands, events and the composed store
pub mod events;
pub mod store;

// Re-exports for convenience
pub use action::{Action, ActionError, ActionKind, ActionQueue};
pub use commander::{
    Commander, CommanderInfo, CommanderName, Commanders, Unit, UnitCategory, UnitType,
};
pub use events::{Command, GameEvent, TurnReport};
pub use fleet::{Fleet, FleetWithCommander, Fleets};
pub use game_state::{GameError, GameState, Selection};
pub use hex::{shortest_rotation, Direction, HexCoord};
pub use map::{Element, ElementKind, FleetMove, HexMap, MapHex};
pub use resource::{
    Capacity, Income, Progress, Resource, ResourceError, ResourceKind, Resources,
    ThresholdReached,
};
pub use settings::{GameSettings, MapSettings, SettingsError};
pub use store::{GameStore, SubscriptionId};
pub use types::{Faction, GameType, Specie};
