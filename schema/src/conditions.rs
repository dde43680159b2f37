use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Identifier of a status condition as referenced by move data.
///
/// `Confusion` is the only volatile condition; every other identifier names a
/// persistent status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ConditionId {
    #[strum(to_string = "Poison")]
    Poison,
    #[strum(to_string = "Burn")]
    Burn,
    #[strum(to_string = "Sleep")]
    Sleep,
    #[strum(to_string = "Paralyzed")]
    Paralysis,
    #[strum(to_string = "Freeze")]
    Freeze,
    #[strum(to_string = "Confusion")]
    Confusion,
}

impl ConditionId {
    pub fn is_volatile(self) -> bool {
        matches!(self, ConditionId::Confusion)
    }
}
