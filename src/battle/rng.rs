use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The single source of randomness for a battle.
///
/// Every draw names its reason, which shows up in trace logs and in the panic
/// message when a scripted sequence runs dry.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Replays `outcomes` in order. Each value is clamped into the range of the draw
    /// that consumes it.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Uniform integer in `low..=high`.
    pub fn range(&mut self, reason: &str, low: u32, high: u32) -> u32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let outcome = match self.source {
            RngSource::Seeded(ref mut rng) => rng.random_range(low..=high),
            RngSource::Scripted { .. } => self.next_scripted(reason).clamp(low, high),
        };
        trace!(reason, outcome, "rng draw");
        outcome
    }

    /// Uniform integer in `1..=100`.
    pub fn percent(&mut self, reason: &str) -> u32 {
        self.range(reason, 1, 100)
    }

    /// True with probability `1 / n`.
    pub fn one_in(&mut self, reason: &str, n: u32) -> bool {
        self.range(reason, 1, n.max(1)) == 1
    }

    /// Random damage spread in `[0.85, 1.0]`. A scripted value `v` reads as `v / 100`.
    pub fn damage_factor(&mut self, reason: &str) -> f32 {
        let factor = match self.source {
            RngSource::Seeded(ref mut rng) => rng.random_range(0.85f32..=1.0),
            RngSource::Scripted { .. } => {
                (self.next_scripted(reason) as f32 / 100.0).clamp(0.85, 1.0)
            }
        };
        trace!(reason, factor, "rng draw");
        factor
    }

    /// Number of scripted outcomes not yet consumed. Always zero for seeded sources.
    pub fn remaining(&self) -> usize {
        match &self.source {
            RngSource::Seeded(_) => 0,
            RngSource::Scripted { outcomes, index } => outcomes.len().saturating_sub(*index),
        }
    }

    fn next_scripted(&mut self, reason: &str) -> u32 {
        let RngSource::Scripted { outcomes, index } = &mut self.source else {
            unreachable!("next_scripted is only called for scripted sources");
        };
        if *index >= outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        *index += 1;
        outcome
    }
}
