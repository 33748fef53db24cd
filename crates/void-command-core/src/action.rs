//! The cyclic queue of player actions.
//!
//! Exactly one action is current at a time. Completing an action's effect
//! moves the cycle forward, wrapping from the last action to the first.

use crate::types::ActionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an action does when the player triggers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Issue orders; completing it only advances the cycle.
    Command,
    /// End the turn, then advance the cycle.
    NextTurn,
}

impl ActionKind {
    /// Default label shown on the action button.
    pub const fn label(&self) -> &'static str {
        match self {
            ActionKind::Command => "Command",
            ActionKind::NextTurn => "Next Turn",
        }
    }

    /// Whether completing this action ends the turn.
    pub const fn ends_turn(&self) -> bool {
        match self {
            ActionKind::Command => false,
            ActionKind::NextTurn => true,
        }
    }
}

/// One entry in the action cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub kind: ActionKind,
    pub description: String,
    pub is_active: bool,
}

impl Action {
    /// Create an inactive action labelled after its kind.
    pub fn new(id: impl Into<ActionId>, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            description: kind.label().to_string(),
            is_active: false,
        }
    }
}

/// Errors from an invalid action queue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action queue cannot be empty")]
    Empty,
    #[error("{0} actions are active, at most one is allowed")]
    MultipleActive(usize),
}

/// The circular action list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Action>", into = "Vec<Action>")]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    /// Build a queue, rejecting an empty list or more than one active entry.
    pub fn new(actions: Vec<Action>) -> Result<Self, ActionError> {
        if actions.is_empty() {
            return Err(ActionError::Empty);
        }
        let active = actions.iter().filter(|a| a.is_active).count();
        if active > 1 {
            return Err(ActionError::MultipleActive(active));
        }
        Ok(Self { actions })
    }

    /// Index of the active action, if one is active.
    pub fn active_index(&self) -> Option<usize> {
        self.actions.iter().position(|a| a.is_active)
    }

    /// The active action, or the first one if none is active.
    pub fn current(&self) -> &Action {
        let position = self.active_index().unwrap_or(0);
        &self.actions[position]
    }

    /// Activate the action after the current one, wrapping around.
    ///
    /// With nothing active, the first action becomes active.
    pub fn advance(&mut self) -> &Action {
        let next = match self.active_index() {
            Some(i) => (i + 1) % self.actions.len(),
            None => 0,
        };
        for (i, action) in self.actions.iter_mut().enumerate() {
            action.is_active = i == next;
        }
        &self.actions[next]
    }

    /// Iterate in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// All actions as a slice.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions in the cycle.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false; an empty queue cannot be built.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        let mut command = Action::new("1", ActionKind::Command);
        command.is_active = true;
        Self {
            actions: vec![command, Action::new("2", ActionKind::NextTurn)],
        }
    }
}

impl TryFrom<Vec<Action>> for ActionQueue {
    type Error = ActionError;

    fn try_from(actions: Vec<Action>) -> Result<Self, Self::Error> {
        Self::new(actions)
    }
}

impl From<ActionQueue> for Vec<Action> {
    fn from(queue: ActionQueue) -> Self {
        queue.actions
    }
}
