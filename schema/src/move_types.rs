use crate::{ConditionId, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Who an effect bundle lands on, relative to the move's user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MoveTarget {
    Foe,
    #[strum(to_string = "Self")]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: StatType,
    pub boost: i8,
}

/// A bundle of non-damaging effects: stat boosts, a persistent status and a
/// volatile status. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffects {
    #[serde(default)]
    pub boosts: Vec<StatBoost>,
    #[serde(default)]
    pub status: Option<ConditionId>,
    #[serde(default)]
    pub volatile_status: Option<ConditionId>,
}

impl MoveEffects {
    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty() && self.status.is_none() && self.volatile_status.is_none()
    }
}

/// An effect bundle applied after a successful hit with `chance` percent probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub chance: u8,
    pub target: MoveTarget,
    pub effects: MoveEffects,
}

/// Immutable definition of a move, loaded once from data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub move_type: PokemonType,
    pub power: u16,
    pub accuracy: u8,
    #[serde(default)]
    pub always_hits: bool,
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub category: MoveCategory,
    #[serde(default)]
    pub effects: MoveEffects,
    #[serde(default)]
    pub secondary_effects: Vec<SecondaryEffect>,
    pub target: MoveTarget,
}
