use crate::battle::rng::TurnRng;
use crate::pokemon::PokemonInst;
use schema::ConditionId;
use tracing::debug;

/// Per-condition behaviour, dispatched on the condition identifier.
///
/// Hooks report through the Pokemon's narration queue; `on_before_move` returns
/// false when the upcoming move is blocked.
pub trait ConditionHooks {
    /// Appended to the Pokemon's name when the condition lands.
    fn start_message(&self) -> &'static str;
    fn on_start(&self, pokemon: &mut PokemonInst, rng: &mut TurnRng);
    fn on_before_move(&self, pokemon: &mut PokemonInst, rng: &mut TurnRng) -> bool;
    fn on_after_turn(&self, pokemon: &mut PokemonInst);
}

impl ConditionHooks for ConditionId {
    fn start_message(&self) -> &'static str {
        match self {
            ConditionId::Poison => "has been poisoned",
            ConditionId::Burn => "has been burned",
            ConditionId::Paralysis => "has been paralyzed",
            ConditionId::Freeze => "has been frozen",
            ConditionId::Sleep => "has fallen asleep",
            ConditionId::Confusion => "has been confused",
        }
    }

    fn on_start(&self, pokemon: &mut PokemonInst, rng: &mut TurnRng) {
        match self {
            ConditionId::Sleep => {
                pokemon.status_time = rng.range("sleep duration", 1, 3) as i8;
                debug!(pokemon = pokemon.name(), turns = pokemon.status_time, "will be asleep");
            }
            ConditionId::Confusion => {
                pokemon.volatile_status_time = rng.range("confusion duration", 1, 4) as i8;
                debug!(
                    pokemon = pokemon.name(),
                    turns = pokemon.volatile_status_time,
                    "will be confused"
                );
            }
            _ => {}
        }
    }

    fn on_before_move(&self, pokemon: &mut PokemonInst, rng: &mut TurnRng) -> bool {
        let name = pokemon.name().to_string();
        match self {
            ConditionId::Paralysis => {
                if rng.one_in("paralysis check", 5) {
                    pokemon.push_status_change(format!("{name}'s paralyzed and can't move..."));
                    return false;
                }
                true
            }
            ConditionId::Freeze => {
                if rng.one_in("freeze thaw", 5) {
                    pokemon.cure_status();
                    pokemon.push_status_change(format!("{name}'s not frozen anymore!"));
                    return true;
                }
                false
            }
            ConditionId::Sleep => {
                if pokemon.status_time <= 0 {
                    pokemon.cure_status();
                    pokemon.push_status_change(format!("{name} woke up!"));
                    return true;
                }
                pokemon.status_time -= 1;
                pokemon.push_status_change(format!("{name} is sleeping..."));
                false
            }
            ConditionId::Confusion => {
                if pokemon.volatile_status_time <= 0 {
                    pokemon.cure_volatile_status();
                    pokemon.push_status_change(format!("{name} kicked out of confusion!"));
                    return true;
                }
                pokemon.volatile_status_time -= 1;

                if rng.one_in("confusion check", 2) {
                    return true;
                }

                pokemon.push_status_change(format!("{name} is confused"));
                pokemon.take_damage(pokemon.max_hp() / 8);
                pokemon.push_status_change(format!("{name} hurt itself due to confusion"));
                false
            }
            ConditionId::Poison | ConditionId::Burn => true,
        }
    }

    fn on_after_turn(&self, pokemon: &mut PokemonInst) {
        let (divisor, cause) = match self {
            ConditionId::Poison => (8, "poison"),
            ConditionId::Burn => (16, "burn"),
            _ => return,
        };
        pokemon.take_damage(pokemon.max_hp() / divisor);
        let message = format!("{} hurt itself due to {}", pokemon.name(), cause);
        pokemon.push_status_change(message);
    }
}

/// Capture-rate multiplier for the target's persistent status.
pub fn status_bonus(status: Option<ConditionId>) -> f32 {
    match status {
        Some(ConditionId::Sleep) | Some(ConditionId::Freeze) => 2.0,
        Some(ConditionId::Paralysis) | Some(ConditionId::Poison) | Some(ConditionId::Burn) => 1.5,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1.0)]
    #[case(Some(ConditionId::Sleep), 2.0)]
    #[case(Some(ConditionId::Freeze), 2.0)]
    #[case(Some(ConditionId::Burn), 1.5)]
    #[case(Some(ConditionId::Confusion), 1.0)]
    fn status_bonus_table(#[case] status: Option<ConditionId>, #[case] expected: f32) {
        assert_eq!(status_bonus(status), expected);
    }

    #[test]
    fn start_messages_read_after_name() {
        assert_eq!(ConditionId::Sleep.start_message(), "has fallen asleep");
        assert_eq!(ConditionId::Confusion.start_message(), "has been confused");
    }
}
