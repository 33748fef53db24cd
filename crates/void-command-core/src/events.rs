//! Commands that mutate the game and the events they produce.
//!
//! Every mutation of the game state can be expressed as a [`Command`].
//! Applying one yields at most one [`GameEvent`], which describes the
//! committed change and is what subscribers are notified with. A command
//! that changes nothing (for example moving a fleet that is not there)
//! yields no event.

use crate::action::ActionKind;
use crate::commander::{CommanderName, Unit};
use crate::hex::HexCoord;
use crate::map::{Element, FleetMove};
use crate::resource::{Resource, ThresholdReached};
use crate::types::{ActionId, CommanderId, GameId, GameType, UnitId};
use serde::{Deserialize, Serialize};

/// All possible mutations of the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // Identity
    SetId {
        id: GameId,
    },
    SetName {
        name: String,
    },
    SetType {
        game_type: GameType,
    },

    // Turn & resources
    AdvanceTurn,
    SettleResources,
    SetResources {
        resources: Vec<Resource>,
    },

    // Action cycle
    AdvanceAction,
    TriggerCurrentAction,

    // Map
    InitializeMap,
    SetActiveHex {
        x: i32,
        y: i32,
    },
    ClearActiveHex,
    UpdateHexElement {
        x: i32,
        y: i32,
        element: Element,
    },
    MoveFleet {
        from: HexCoord,
        to: HexCoord,
        fleet_id: String,
    },
    SelectHex {
        x: i32,
        y: i32,
    },

    // Commanders
    CreateCommander {
        commander_id: CommanderId,
        name: CommanderName,
    },
    RenameCommander {
        commander_id: CommanderId,
        new_name: CommanderName,
    },
    AddUnit {
        commander_id: CommanderId,
        unit: Unit,
    },
}

impl Command {
    /// Get a human-readable description of the command.
    pub fn description(&self) -> String {
        match self {
            Command::SetId { id } => format!("Set game id to {}", id),
            Command::SetName { name } => format!("Renamed game to {}", name),
            Command::SetType { game_type } => format!("Set game type to {}", game_type),
            Command::AdvanceTurn => "Advanced turn".to_string(),
            Command::SettleResources => "Settled resources".to_string(),
            Command::SetResources { .. } => "Replaced resources".to_string(),
            Command::AdvanceAction => "Advanced action".to_string(),
            Command::TriggerCurrentAction => "Triggered current action".to_string(),
            Command::InitializeMap => "Initialized map".to_string(),
            Command::SetActiveHex { x, y } => format!("Selected hex ({}, {})", x, y),
            Command::ClearActiveHex => "Cleared selection".to_string(),
            Command::UpdateHexElement { x, y, element } => {
                format!("Placed {} at ({}, {})", element.id, x, y)
            }
            Command::MoveFleet { from, to, fleet_id } => {
                format!("Fleet {} moved from {} to {}", fleet_id, from, to)
            }
            Command::SelectHex { x, y } => format!("Clicked hex ({}, {})", x, y),
            Command::CreateCommander { commander_id, name } => {
                format!("Recruited {} as {}", name, commander_id)
            }
            Command::RenameCommander {
                commander_id,
                new_name,
            } => format!("Renamed {} to {}", commander_id, new_name),
            Command::AddUnit { commander_id, unit } => {
                format!("Assigned unit {} to {}", unit.id, commander_id)
            }
        }
    }
}

/// Outcome of ending a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number after the increment.
    pub turn: u32,
    /// Resources that rolled over while settling.
    pub thresholds: Vec<ThresholdReached>,
}

/// A committed change to the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    IdChanged {
        id: GameId,
    },
    NameChanged {
        name: String,
    },
    TypeChanged {
        game_type: GameType,
    },
    TurnAdvanced(TurnReport),
    ResourcesSettled {
        thresholds: Vec<ThresholdReached>,
    },
    ResourcesReplaced,
    ActionAdvanced {
        action_id: ActionId,
    },
    ActionTriggered {
        action_id: ActionId,
        kind: ActionKind,
        /// Present when the action ended the turn.
        turn: Option<TurnReport>,
        next_action_id: ActionId,
    },
    MapInitialized {
        hexes: usize,
    },
    ActiveHexChanged {
        active: Option<HexCoord>,
    },
    HexElementUpdated {
        coord: HexCoord,
        element_id: String,
    },
    FleetMoved(FleetMove),
    HexSelected {
        active: Option<HexCoord>,
        /// Present when the click moved the selected fleet.
        fleet_move: Option<FleetMove>,
    },
    CommanderCreated {
        commander_id: CommanderId,
    },
    CommanderRenamed {
        commander_id: CommanderId,
        new_name: CommanderName,
    },
    UnitAdded {
        commander_id: CommanderId,
        unit_id: UnitId,
        power: f64,
    },
}

impl GameEvent {
    /// Thresholds reached during this change, if any.
    pub fn thresholds(&self) -> &[ThresholdReached] {
        match self {
            GameEvent::TurnAdvanced(report) => &report.thresholds,
            GameEvent::ResourcesSettled { thresholds } => thresholds,
            GameEvent::ActionTriggered {
                turn: Some(report), ..
            } => &report.thresholds,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let command = Command::MoveFleet {
            from: HexCoord::new(5, 5),
            to: HexCoord::new(6, 5),
            fleet_id: "fleet-1".to_string(),
        };
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains("\"type\":\"MoveFleet\""));
        let restored: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, command);
    }

    #[test]
    fn test_unit_command_from_json() {
        let command: Command = serde_json::from_str(r#"{"type":"AdvanceTurn"}"#).unwrap();
        assert_eq!(command, Command::AdvanceTurn);
    }

    #[test]
    fn test_description() {
        let command = Command::CreateCommander {
            commander_id: "commander-2".to_string(),
            name: CommanderName::QueenVeyraKhar,
        };
        assert_eq!(command.description(), "Recruited Queen Veyra Khar as commander-2");
    }

    #[test]
    fn test_event_thresholds() {
        let signal = ThresholdReached {
            kind: crate::resource::ResourceKind::Science,
            threshold: 25,
            remainder: 0,
        };
        let event = GameEvent::TurnAdvanced(TurnReport {
            turn: 2,
            thresholds: vec![signal],
        });
        assert_eq!(event.thresholds(), &[signal]);
        assert!(GameEvent::ResourcesReplaced.thresholds().is_empty());
    }
}
