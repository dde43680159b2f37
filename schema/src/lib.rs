// Pokemon Battle Engine Schema - Shared type definitions
// This crate holds the static, serializable definitions that the engine reads
// from its RON data files: types and the type chart, stats, moves and species.

// Re-export the main types
pub use conditions::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;
pub use stats::*;

pub mod conditions;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
pub mod stats;
