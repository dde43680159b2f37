use crate::errors::ConfigError;
use crate::party::MAX_PARTY_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CONFIG: &str = include_str!("../data/battle_config.ron");

/// Presentation timings and policy constants for a battle.
///
/// Timings are only ever reported through `Wait` events; the engine itself never sleeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Pause between the attack animation and the hit animation.
    pub attack_windup_ms: u64,
    pub faint_ms: u64,
    /// Pause after recalling the active Pokemon during a switch.
    pub switch_out_ms: u64,
    /// Pause before a trainer sends out its next Pokemon.
    pub trainer_switch_delay_ms: u64,
    pub pokeball_shake_ms: u64,
    pub break_out_ms: u64,
    pub max_party_size: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            attack_windup_ms: 1000,
            faint_ms: 2000,
            switch_out_ms: 2000,
            trainer_switch_delay_ms: 2000,
            pokeball_shake_ms: 500,
            break_out_ms: 1000,
            max_party_size: MAX_PARTY_SIZE,
        }
    }
}

impl BattleConfig {
    /// The configuration shipped in `data/battle_config.ron`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_ron_str(BUILTIN_CONFIG)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig =
            ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_party_size == 0 {
            return Err(ConfigError::Invalid(
                "max_party_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_matches_default() {
        assert_eq!(BattleConfig::builtin().unwrap(), BattleConfig::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = BattleConfig::from_ron_str("(faint_ms: 10)").unwrap();
        assert_eq!(config.faint_ms, 10);
        assert_eq!(config.attack_windup_ms, 1000);
    }

    #[test]
    fn zero_party_size_is_rejected() {
        let err = BattleConfig::from_ron_str("(max_party_size: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = BattleConfig::from_ron_str("(faint_ms: \"slow\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
