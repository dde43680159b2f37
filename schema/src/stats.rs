use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Every stat that carries a boost stage during battle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
pub enum StatType {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Attack")]
    SpAttack,
    #[strum(to_string = "Sp. Defense")]
    SpDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl StatType {
    /// Position of this stat in a stage table.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}
