//! Empire resources and per-turn accumulation.
//!
//! Six resource kinds exist, exactly one of each. Four of them grow every
//! turn, two of those also roll over once they reach a threshold, and the
//! two capacity kinds only track a ceiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// The six resource kinds, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Crypto,
    Influence,
    Science,
    Happiness,
    PlanetsCapacity,
    FleetCapacity,
}

impl ResourceKind {
    /// Get all resource kinds in canonical order.
    pub const fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Crypto,
            ResourceKind::Influence,
            ResourceKind::Science,
            ResourceKind::Happiness,
            ResourceKind::PlanetsCapacity,
            ResourceKind::FleetCapacity,
        ]
    }

    /// Position of this kind in the canonical order (0-5).
    pub const fn index(&self) -> usize {
        match self {
            ResourceKind::Crypto => 0,
            ResourceKind::Influence => 1,
            ResourceKind::Science => 2,
            ResourceKind::Happiness => 3,
            ResourceKind::PlanetsCapacity => 4,
            ResourceKind::FleetCapacity => 5,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Crypto => write!(f, "Crypto"),
            ResourceKind::Influence => write!(f, "Influence"),
            ResourceKind::Science => write!(f, "Science"),
            ResourceKind::Happiness => write!(f, "Happiness"),
            ResourceKind::PlanetsCapacity => write!(f, "PlanetsCapacity"),
            ResourceKind::FleetCapacity => write!(f, "FleetCapacity"),
        }
    }
}

/// A balance that grows by a fixed amount every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub amount: i32,
    pub per_turn: i32,
}

/// A growing balance that rolls over when it reaches `threshold`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub amount: i32,
    pub per_turn: i32,
    pub threshold: i32,
}

/// A current amount against a fixed ceiling. Never changes on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub amount: i32,
    pub max_capacity: i32,
}

/// One typed resource balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Resource {
    Crypto(Income),
    Influence(Income),
    Science(Progress),
    Happiness(Progress),
    PlanetsCapacity(Capacity),
    FleetCapacity(Capacity),
}

/// Diagnostic emitted when a threshold resource rolls over during settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdReached {
    pub kind: ResourceKind,
    pub threshold: i32,
    /// Amount left after the threshold was subtracted.
    pub remainder: i32,
}

impl Resource {
    /// Which of the six kinds this is.
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Resource::Crypto(_) => ResourceKind::Crypto,
            Resource::Influence(_) => ResourceKind::Influence,
            Resource::Science(_) => ResourceKind::Science,
            Resource::Happiness(_) => ResourceKind::Happiness,
            Resource::PlanetsCapacity(_) => ResourceKind::PlanetsCapacity,
            Resource::FleetCapacity(_) => ResourceKind::FleetCapacity,
        }
    }

    /// Current balance.
    pub const fn amount(&self) -> i32 {
        match self {
            Resource::Crypto(r) | Resource::Influence(r) => r.amount,
            Resource::Science(r) | Resource::Happiness(r) => r.amount,
            Resource::PlanetsCapacity(r) | Resource::FleetCapacity(r) => r.amount,
        }
    }

    /// Per-turn growth, if this kind grows.
    pub const fn per_turn(&self) -> Option<i32> {
        match self {
            Resource::Crypto(r) | Resource::Influence(r) => Some(r.per_turn),
            Resource::Science(r) | Resource::Happiness(r) => Some(r.per_turn),
            Resource::PlanetsCapacity(_) | Resource::FleetCapacity(_) => None,
        }
    }

    /// Rollover threshold, if this kind has one.
    pub const fn threshold(&self) -> Option<i32> {
        match self {
            Resource::Science(r) | Resource::Happiness(r) => Some(r.threshold),
            Resource::Crypto(_)
            | Resource::Influence(_)
            | Resource::PlanetsCapacity(_)
            | Resource::FleetCapacity(_) => None,
        }
    }

    /// Ceiling, for capacity kinds.
    pub const fn max_capacity(&self) -> Option<i32> {
        match self {
            Resource::PlanetsCapacity(r) | Resource::FleetCapacity(r) => Some(r.max_capacity),
            Resource::Crypto(_)
            | Resource::Influence(_)
            | Resource::Science(_)
            | Resource::Happiness(_) => None,
        }
    }

    /// Apply one turn of growth.
    ///
    /// The threshold is subtracted at most once, even if the new amount
    /// still exceeds it afterwards.
    pub fn settle(&mut self) -> Option<ThresholdReached> {
        let kind = self.kind();
        match self {
            Resource::Crypto(r) | Resource::Influence(r) => {
                r.amount = r.amount.saturating_add(r.per_turn);
                None
            }
            Resource::Science(r) | Resource::Happiness(r) => {
                r.amount = r.amount.saturating_add(r.per_turn);
                if r.amount < r.threshold {
                    return None;
                }
                r.amount = r.amount.saturating_sub(r.threshold);
                info!(
                    resource = %kind,
                    threshold = r.threshold,
                    remainder = r.amount,
                    "threshold reached"
                );
                Some(ThresholdReached {
                    kind,
                    threshold: r.threshold,
                    remainder: r.amount,
                })
            }
            Resource::PlanetsCapacity(_) | Resource::FleetCapacity(_) => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.amount())?;
        if let Some(per_turn) = self.per_turn() {
            write!(f, " (+{})", per_turn)?;
        }
        if let Some(max) = self.max_capacity() {
            write!(f, "/{}", max)?;
        }
        Ok(())
    }
}

/// Errors from an invalid resource set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource {0} appears more than once")]
    Duplicate(ResourceKind),
    #[error("resource {0} is missing")]
    Missing(ResourceKind),
}

/// The full set of resources, exactly one of each kind.
///
/// Stored in canonical order so lookups by kind are direct indexing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Resource>", into = "Vec<Resource>")]
pub struct Resources {
    entries: Vec<Resource>,
}

impl Resources {
    /// Build a resource set, rejecting duplicates and missing kinds.
    ///
    /// Input order does not matter.
    pub fn new(resources: Vec<Resource>) -> Result<Self, ResourceError> {
        let mut slots: [Option<Resource>; 6] = [None; 6];
        for resource in resources {
            let slot = &mut slots[resource.kind().index()];
            if slot.is_some() {
                return Err(ResourceError::Duplicate(resource.kind()));
            }
            *slot = Some(resource);
        }

        let mut entries = Vec::with_capacity(slots.len());
        for (kind, slot) in ResourceKind::all().iter().zip(slots) {
            entries.push(slot.ok_or(ResourceError::Missing(*kind))?);
        }
        Ok(Self { entries })
    }

    /// Look up the resource of a given kind.
    pub fn get(&self, kind: ResourceKind) -> &Resource {
        &self.entries[kind.index()]
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.entries.iter()
    }

    /// Number of resources (always 6).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Settle one turn of growth for every resource.
    ///
    /// Returns one signal per resource that reached its threshold.
    pub fn settle(&mut self) -> Vec<ThresholdReached> {
        self.entries
            .iter_mut()
            .filter_map(Resource::settle)
            .collect()
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            entries: vec![
                Resource::Crypto(Income {
                    amount: 0,
                    per_turn: 1,
                }),
                Resource::Influence(Income {
                    amount: 0,
                    per_turn: 1,
                }),
                Resource::Science(Progress {
                    amount: 0,
                    per_turn: 1,
                    threshold: 25,
                }),
                Resource::Happiness(Progress {
                    amount: 0,
                    per_turn: 1,
                    threshold: 100,
                }),
                Resource::PlanetsCapacity(Capacity {
                    amount: 1,
                    max_capacity: 2,
                }),
                Resource::FleetCapacity(Capacity {
                    amount: 1,
                    max_capacity: 2,
                }),
            ],
        }
    }
}

impl TryFrom<Vec<Resource>> for Resources {
    type Error = ResourceError;

    fn try_from(resources: Vec<Resource>) -> Result<Self, Self::Error> {
        Self::new(resources)
    }
}

impl From<Resources> for Vec<Resource> {
    fn from(resources: Resources) -> Self {
        resources.entries
    }
}

impl<'a> IntoIterator for &'a Resources {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
