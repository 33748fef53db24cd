//! Root game state containing all game data.

use crate::action::{Action, ActionError, ActionQueue};
use crate::commander::{Commander, CommanderName, Commanders, Unit};
use crate::events::{Command, GameEvent, TurnReport};
use crate::fleet::{Fleet, FleetWithCommander, Fleets};
use crate::hex::HexCoord;
use crate::map::{Element, FleetMove, HexMap, MapHex};
use crate::resource::{Resource, ResourceError, Resources, ThresholdReached};
use crate::settings::{GameSettings, MapSettings, SettingsError};
use crate::types::{CommanderId, GameId, GameType};
use thiserror::Error;
use tracing::debug;

/// The complete state of a game at any point in time.
///
/// Every collection here guards its own invariants, so the fields can be
/// read directly. Cross-concern operations (ending a turn from the action
/// cycle, joining fleets with commanders) live on this type.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Unique identifier for this game.
    pub id: GameId,
    /// Display name.
    pub name: String,
    /// Game mode.
    pub game_type: GameType,
    /// Current turn number (starts at 1).
    pub turn: u32,
    /// Resource balances.
    pub resources: Resources,
    /// The action cycle.
    pub actions: ActionQueue,
    /// The hex grid.
    pub map: HexMap,
    /// All fleets.
    pub fleets: Fleets,
    /// All commanders.
    pub commanders: Commanders,
    /// Layout used by `initialize_map`.
    pub map_settings: MapSettings,
}

/// What a click on a hex did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The selected fleet moved to the clicked hex, which is now active.
    Moved(FleetMove),
    /// The clicked hex became active (or nothing, if it does not exist).
    Selected(Option<HexCoord>),
}

impl GameState {
    /// Create a new game with the given settings.
    ///
    /// The map stays empty unless `settings.initialize_map` is set.
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        settings.validate()?;

        let commander = Commander::from_template(settings.commander_id.clone(), settings.commander);
        let fleet = Fleet::new(
            settings.map.fleet_id.clone(),
            settings.commander_id,
            commander.faction,
        );

        let mut state = Self {
            id: settings.id,
            name: settings.name,
            game_type: settings.game_type,
            turn: 1,
            resources: settings.resources,
            actions: ActionQueue::default(),
            map: HexMap::new(),
            fleets: Fleets::from(vec![fleet]),
            commanders: Commanders::new(commander),
            map_settings: settings.map,
        };
        if settings.initialize_map {
            state.initialize_map();
        }
        Ok(state)
    }

    /// The bootstrap demo game.
    pub fn demo() -> Self {
        Self {
            id: "game-1".to_string(),
            name: "Demo Game".to_string(),
            game_type: GameType::Demo,
            turn: 1,
            resources: Resources::default(),
            actions: ActionQueue::default(),
            map: HexMap::new(),
            fleets: Fleets::default(),
            commanders: Commanders::default(),
            map_settings: MapSettings::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Turn & resources
    // ---------------------------------------------------------------------

    /// Apply one turn of resource growth.
    pub fn settle_resources(&mut self) -> Vec<ThresholdReached> {
        self.resources.settle()
    }

    /// End the current turn.
    ///
    /// Resources are settled for the ending turn before the counter moves.
    pub fn advance_turn(&mut self) -> TurnReport {
        let thresholds = self.settle_resources();
        self.turn = self.turn.saturating_add(1);
        debug!(turn = self.turn, thresholds = thresholds.len(), "turn advanced");
        TurnReport {
            turn: self.turn,
            thresholds,
        }
    }

    /// Replace every resource balance at once.
    pub fn set_resources(&mut self, resources: Vec<Resource>) -> Result<(), GameError> {
        self.resources = Resources::new(resources)?;
        Ok(())
    }

    /// Replace the action cycle.
    pub fn set_actions(&mut self, actions: Vec<Action>) -> Result<(), GameError> {
        self.actions = ActionQueue::new(actions)?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Action cycle
    // ---------------------------------------------------------------------

    /// The active action, or the first one if none is active.
    pub fn current_action(&self) -> &Action {
        self.actions.current()
    }

    /// Move the action cycle forward by one.
    pub fn advance_action(&mut self) -> &Action {
        let next = self.actions.advance();
        debug!(action = %next.id, kind = ?next.kind, "action advanced");
        next
    }

    /// Run the effect of the current action.
    ///
    /// `NextTurn` ends the turn first; both kinds then advance the cycle.
    pub fn trigger_current_action(&mut self) -> GameEvent {
        let current = self.current_action();
        let action_id = current.id.clone();
        let kind = current.kind;

        let turn = kind.ends_turn().then(|| self.advance_turn());
        let next_action_id = self.advance_action().id.clone();

        GameEvent::ActionTriggered {
            action_id,
            kind,
            turn,
            next_action_id,
        }
    }

    // ---------------------------------------------------------------------
    // Map
    // ---------------------------------------------------------------------

    /// Build the full grid from the stored layout.
    pub fn initialize_map(&mut self) {
        self.map.initialize(&self.map_settings);
    }

    /// Get the hex at (x, y).
    pub fn get_hex(&self, x: i32, y: i32) -> Option<&MapHex> {
        self.map.get_hex(x, y)
    }

    /// The active hex, if any.
    pub fn active_hex(&self) -> Option<&MapHex> {
        self.map.active_hex()
    }

    /// Handle a click on (x, y).
    ///
    /// If a fleet sits on the active hex and (x, y) is adjacent, the fleet
    /// moves there. Either way (x, y) becomes the active hex.
    pub fn select_hex(&mut self, x: i32, y: i32) -> Selection {
        let to = HexCoord::new(x, y);
        if self.map.is_legal_fleet_destination(&to) {
            let from = self.map.active_coord();
            let fleet_id = self.map.active_fleet().map(|e| e.id.clone());
            if let (Some(from), Some(fleet_id)) = (from, fleet_id) {
                if let Some(moved) = self.map.move_fleet(from, to, &fleet_id) {
                    self.map.set_active_hex(x, y);
                    return Selection::Moved(moved);
                }
            }
        }
        let active = self.map.set_active_hex(x, y).map(|h| h.coord);
        Selection::Selected(active)
    }

    // ---------------------------------------------------------------------
    // Commanders & fleets
    // ---------------------------------------------------------------------

    /// Get a commander by id, falling back to the first commander.
    pub fn get_commander(&self, id: &str) -> &Commander {
        self.commanders.get(id)
    }

    /// Recruit a commander from a template. Returns the new commander.
    pub fn create_commander(
        &mut self,
        id: impl Into<CommanderId>,
        name: CommanderName,
    ) -> &Commander {
        self.commanders.create(id, name)
    }

    /// Get a fleet by id, falling back to the first fleet.
    pub fn get_fleet(&self, id: &str) -> &Fleet {
        self.fleets.get(id)
    }

    /// Get a fleet joined with a snapshot of its commander.
    pub fn get_fleet_with_commander(&self, fleet_id: &str) -> FleetWithCommander {
        self.fleets.with_commander(fleet_id, &self.commanders)
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Apply a command.
    ///
    /// Returns the event describing the committed change, `None` if the
    /// command changed nothing, or an error if it was rejected. A rejected
    /// command leaves the state untouched.
    pub fn apply(&mut self, command: Command) -> Result<Option<GameEvent>, GameError> {
        let event = match command {
            Command::SetId { id } => {
                self.id = id.clone();
                GameEvent::IdChanged { id }
            }
            Command::SetName { name } => {
                self.name = name.clone();
                GameEvent::NameChanged { name }
            }
            Command::SetType { game_type } => {
                self.game_type = game_type;
                GameEvent::TypeChanged { game_type }
            }
            Command::AdvanceTurn => GameEvent::TurnAdvanced(self.advance_turn()),
            Command::SettleResources => GameEvent::ResourcesSettled {
                thresholds: self.settle_resources(),
            },
            Command::SetResources { resources } => {
                self.set_resources(resources)?;
                GameEvent::ResourcesReplaced
            }
            Command::AdvanceAction => GameEvent::ActionAdvanced {
                action_id: self.advance_action().id.clone(),
            },
            Command::TriggerCurrentAction => self.trigger_current_action(),
            Command::InitializeMap => {
                self.initialize_map();
                GameEvent::MapInitialized {
                    hexes: self.map.len(),
                }
            }
            Command::SetActiveHex { x, y } => GameEvent::ActiveHexChanged {
                active: self.map.set_active_hex(x, y).map(|h| h.coord),
            },
            Command::ClearActiveHex => {
                self.map.clear_active_hex();
                GameEvent::ActiveHexChanged { active: None }
            }
            Command::UpdateHexElement { x, y, element } => {
                let element_id = element.id.clone();
                if !self.map.update_hex_element(x, y, element) {
                    debug!(x, y, element = %element_id, "no hex to update");
                    return Ok(None);
                }
                GameEvent::HexElementUpdated {
                    coord: HexCoord::new(x, y),
                    element_id,
                }
            }
            Command::MoveFleet { from, to, fleet_id } => {
                match self.map.move_fleet(from, to, &fleet_id) {
                    Some(moved) => GameEvent::FleetMoved(moved),
                    None => return Ok(None),
                }
            }
            Command::SelectHex { x, y } => match self.select_hex(x, y) {
                Selection::Moved(moved) => GameEvent::HexSelected {
                    active: Some(moved.to),
                    fleet_move: Some(moved),
                },
                Selection::Selected(active) => GameEvent::HexSelected {
                    active,
                    fleet_move: None,
                },
            },
            Command::CreateCommander { commander_id, name } => {
                self.create_commander(commander_id.clone(), name);
                GameEvent::CommanderCreated { commander_id }
            }
            Command::RenameCommander {
                commander_id,
                new_name,
            } => {
                if !self.commanders.rename(&commander_id, new_name) {
                    debug!(commander = %commander_id, "no commander to rename");
                    return Ok(None);
                }
                GameEvent::CommanderRenamed {
                    commander_id,
                    new_name,
                }
            }
            Command::AddUnit { commander_id, unit } => {
                let unit_id = unit.id.clone();
                match self.commanders.add_unit(&commander_id, unit) {
                    Some(power) => GameEvent::UnitAdded {
                        commander_id,
                        unit_id,
                        power,
                    },
                    None => {
                        debug!(commander = %commander_id, unit = %unit_id, "no commander for unit");
                        return Ok(None);
                    }
                }
            }
        };
        Ok(Some(event))
    }

    /// Attach a unit to a commander. Returns the computed power.
    pub fn add_unit(&mut self, commander_id: &str, unit: Unit) -> Option<f64> {
        self.commanders.add_unit(commander_id, unit)
    }

    /// Place or replace an element on a hex.
    pub fn update_hex_element(&mut self, x: i32, y: i32, element: Element) -> bool {
        self.map.update_hex_element(x, y, element)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::demo()
    }
}

/// Errors that can occur during game operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Resources(#[from] ResourceError),
    #[error(transparent)]
    Actions(#[from] ActionError),
}
