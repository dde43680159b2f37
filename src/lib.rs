//! Pokemon Battle Engine
//!
//! A single-player, turn-based Pokemon battle engine: one player Pokemon against
//! one wild Pokemon or a trainer's team. The engine is a synchronous state machine
//! that narrates everything it does as an ordered list of presentation events.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod config;
pub mod dex;
pub mod errors;
pub mod party;
pub mod pokemon;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-battle-engine` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    ConditionId,
    LearnableMove,
    MoveCategory,
    // Core Data Structs
    MoveData,
    MoveEffects,
    MoveTarget,
    PokemonType,
    SecondaryEffect,
    SpeciesData,
    StatBoost,
    StatType,
};

// --- From this crate's modules (`src/`) ---

// The battle state machine and its presentation events.
pub use battle::rng::TurnRng;
pub use battle::runner::{BattleInput, BattleSystem};
pub use battle::state::{AnimationCue, BattleEvent, BattlePhase, BattleState, EventBus, Side};

// Core runtime types for a battle.
pub use party::{Encounter, Party, PartySlotInfo, Trainer};
pub use pokemon::{MoveInstance, PokemonInst};

// Data access and configuration.
pub use config::BattleConfig;
pub use dex::Dex;
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, DexError,
};
