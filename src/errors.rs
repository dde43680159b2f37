use crate::battle::state::BattlePhase;
use thiserror::Error;

/// Main error type for the Pokemon battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to species or move data lookup and loading
    #[error("Dex error: {0}")]
    Dex(#[from] DexError),
    /// Error related to battle configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Errors raised while loading or querying the static species and move data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    /// The RON source could not be parsed
    #[error("Malformed {source_name} data: {message}")]
    Parse {
        source_name: &'static str,
        message: String,
    },
    /// Parsed fine but breaks a data rule (bad accuracy, missing learnset move, ...)
    #[error("Invalid data for {name}: {reason}")]
    InvalidData { name: String, reason: String },
    #[error("Invalid level {0}, expected 1..=100")]
    InvalidLevel(u8),
    #[error("Species {0} knows no moves at that level")]
    NoMoves(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Malformed battle config: {0}")]
    Parse(String),
    #[error("Could not read battle config {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid battle config: {0}")]
    Invalid(String),
}

/// Errors related to battle setup and state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("Party is empty")]
    EmptyParty,
    /// Every member of the party has fainted
    #[error("{0} has no healthy Pokemon")]
    NoHealthyPokemon(String),
    #[error("Party of {size} exceeds the maximum of {max}")]
    PartyTooLarge { size: usize, max: usize },
}

/// Errors related to player actions.
///
/// Rejections that the party screen shows to the player carry the exact text
/// displayed there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("{0} has no PP left")]
    NoPpLeft(String),
    /// Pokemon index is out of bounds
    #[error("Invalid Pokemon index: {0}")]
    InvalidPokemonIndex(usize),
    #[error("You can't send out a fainted pokemon")]
    PokemonFainted(usize),
    #[error("You can't switch with the same pokemon")]
    AlreadyActive(usize),
    #[error("You have to choose a pokemon to continue")]
    MustChoosePokemon,
    /// Action is not valid in the current battle phase
    #[error("Action not accepted while in {0:?}")]
    NotAccepted(BattlePhase),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;
