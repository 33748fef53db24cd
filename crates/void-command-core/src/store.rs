//! The composed game store: the single entry point for callers.
//!
//! A [`GameStore`] owns one [`GameState`] and a list of subscribers. Every
//! mutation is one commit; after a commit that changed something, every
//! subscriber is called once with the settled state and the event that
//! describes the change. Guarded no-ops do not notify.

use crate::action::{Action, ActionQueue};
use crate::commander::{Commander, CommanderName, Commanders, Unit};
use crate::events::{Command, GameEvent, TurnReport};
use crate::fleet::{Fleet, FleetWithCommander, Fleets};
use crate::game_state::{GameError, GameState};
use crate::hex::HexCoord;
use crate::map::{Element, FleetMove, MapHex};
use crate::resource::{Resource, ResourceKind, Resources, ThresholdReached};
use crate::settings::GameSettings;
use crate::types::{CommanderId, GameType};
use tracing::{debug, warn};

/// Handle returned by [`GameStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameState, &GameEvent)>;

/// Owned game store with a single change notification channel.
pub struct GameStore {
    state: GameState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl GameStore {
    /// Create a store for a new game.
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::new(settings)?))
    }

    /// Wrap an existing state.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Apply a command and notify subscribers if anything changed.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<GameEvent>, GameError> {
        let description = command.description();
        let event = self.state.apply(command)?;
        match &event {
            Some(event) => self.notify(event),
            None => debug!(command = %description, "command changed nothing"),
        }
        Ok(event)
    }

    fn notify(&mut self, event: &GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state, event);
        }
    }

    /// Register a listener called after every committed change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameState, &GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Take the state out of the store, dropping all subscribers.
    pub fn into_state(self) -> GameState {
        self.state
    }

    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn game_type(&self) -> GameType {
        self.state.game_type
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn resources(&self) -> &Resources {
        &self.state.resources
    }

    /// Typed lookup of one resource balance.
    pub fn resource(&self, kind: ResourceKind) -> &Resource {
        self.state.resources.get(kind)
    }

    pub fn actions(&self) -> &ActionQueue {
        &self.state.actions
    }

    pub fn hexes(&self) -> &[MapHex] {
        self.state.map.hexes()
    }

    pub fn active_hex(&self) -> Option<&MapHex> {
        self.state.active_hex()
    }

    pub fn fleets(&self) -> &Fleets {
        &self.state.fleets
    }

    pub fn commanders(&self) -> &Commanders {
        &self.state.commanders
    }

    /// The active action, or the first one if none is active.
    pub fn current_action(&self) -> &Action {
        self.state.current_action()
    }

    pub fn get_hex(&self, x: i32, y: i32) -> Option<&MapHex> {
        self.state.get_hex(x, y)
    }

    /// Get a commander by id, falling back to the first commander.
    pub fn get_commander(&self, id: &str) -> &Commander {
        self.state.get_commander(id)
    }

    /// Get a fleet by id, falling back to the first fleet.
    pub fn get_fleet(&self, id: &str) -> &Fleet {
        self.state.get_fleet(id)
    }

    pub fn get_fleet_with_commander(&self, fleet_id: &str) -> FleetWithCommander {
        self.state.get_fleet_with_commander(fleet_id)
    }

    /// Whether the fleet on the active hex may move to (x, y).
    pub fn is_legal_fleet_destination(&self, x: i32, y: i32) -> bool {
        self.state
            .map
            .is_legal_fleet_destination(&HexCoord::new(x, y))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.commit(Command::SetId { id: id.into() });
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.commit(Command::SetName { name: name.into() });
    }

    pub fn set_type(&mut self, game_type: GameType) {
        self.commit(Command::SetType { game_type });
    }

    /// Settle resources, then move to the next turn.
    pub fn advance_turn(&mut self) -> TurnReport {
        match self.commit(Command::AdvanceTurn) {
            Some(GameEvent::TurnAdvanced(report)) => report,
            _ => TurnReport {
                turn: self.state.turn,
                thresholds: Vec::new(),
            },
        }
    }

    /// Apply one turn of resource growth.
    pub fn settle_resources(&mut self) -> Vec<ThresholdReached> {
        match self.commit(Command::SettleResources) {
            Some(GameEvent::ResourcesSettled { thresholds }) => thresholds,
            _ => Vec::new(),
        }
    }

    /// Replace the whole resource set.
    pub fn set_resources(&mut self, resources: Vec<Resource>) -> Result<(), GameError> {
        self.dispatch(Command::SetResources { resources })?;
        Ok(())
    }

    /// Move the action cycle forward by one.
    pub fn advance_action(&mut self) -> &Action {
        self.commit(Command::AdvanceAction);
        self.state.current_action()
    }

    /// Run the current action's effect.
    pub fn trigger_current_action(&mut self) -> Option<GameEvent> {
        self.commit(Command::TriggerCurrentAction)
    }

    /// Build the grid from the game's map settings.
    pub fn initialize_map(&mut self) {
        self.commit(Command::InitializeMap);
    }

    /// Make (x, y) the only active hex. Returns it, if it exists.
    pub fn set_active_hex(&mut self, x: i32, y: i32) -> Option<&MapHex> {
        self.commit(Command::SetActiveHex { x, y });
        self.state.active_hex()
    }

    pub fn clear_active_hex(&mut self) {
        self.commit(Command::ClearActiveHex);
    }

    /// Place or replace an element on a hex. Returns false for unknown hexes.
    pub fn update_hex_element(&mut self, x: i32, y: i32, element: Element) -> bool {
        self.commit(Command::UpdateHexElement { x, y, element })
            .is_some()
    }

    /// Move a fleet element between hexes.
    pub fn move_fleet(
        &mut self,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        fleet_id: &str,
    ) -> Option<FleetMove> {
        let command = Command::MoveFleet {
            from: HexCoord::new(from_x, from_y),
            to: HexCoord::new(to_x, to_y),
            fleet_id: fleet_id.to_string(),
        };
        match self.commit(command) {
            Some(GameEvent::FleetMoved(moved)) => Some(moved),
            _ => None,
        }
    }

    /// Handle a click on (x, y). Returns the fleet move, if one happened.
    pub fn select_hex(&mut self, x: i32, y: i32) -> Option<FleetMove> {
        match self.commit(Command::SelectHex { x, y }) {
            Some(GameEvent::HexSelected { fleet_move, .. }) => fleet_move,
            _ => None,
        }
    }

    /// Recruit a commander from a template. Returns the new commander.
    ///
    /// A taken id is appended anyway; lookups by that id keep returning
    /// the earlier commander.
    pub fn create_commander(
        &mut self,
        id: impl Into<CommanderId>,
        name: CommanderName,
    ) -> &Commander {
        self.commit(Command::CreateCommander {
            commander_id: id.into(),
            name,
        });
        self.state.commanders.newest()
    }

    /// Change a commander's display name. Returns false for unknown ids.
    pub fn rename_commander(&mut self, id: &str, new_name: CommanderName) -> bool {
        self.commit(Command::RenameCommander {
            commander_id: id.to_string(),
            new_name,
        })
        .is_some()
    }

    /// Attach a unit to a commander. Returns the unit's computed power.
    pub fn add_unit(&mut self, commander_id: &str, unit: Unit) -> Option<f64> {
        let command = Command::AddUnit {
            commander_id: commander_id.to_string(),
            unit,
        };
        match self.commit(command) {
            Some(GameEvent::UnitAdded { power, .. }) => Some(power),
            _ => None,
        }
    }

    /// Dispatch a command that cannot be rejected.
    ///
    /// Fallible commands go through [`GameStore::dispatch`] so the caller
    /// sees the error.
    fn commit(&mut self, command: Command) -> Option<GameEvent> {
        let result = self.dispatch(command);
        debug_assert!(result.is_ok(), "infallible command rejected: {:?}", result);
        result.unwrap_or_else(|error| {
            warn!(%error, "command rejected");
            None
        })
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::from_state(GameState::demo())
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("state", &self.state)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
