pub mod action_stack;
pub mod calculators;
pub mod catch;
pub mod conditions;
pub mod rng;
pub mod runner;
pub mod state;
pub mod stats;
pub mod turn_orchestrator;

#[cfg(test)]
mod tests;
