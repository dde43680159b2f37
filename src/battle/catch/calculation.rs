use crate::battle::conditions::status_bonus;
use crate::battle::rng::TurnRng;
use crate::pokemon::PokemonInst;
use tracing::debug;

/// Shakes needed for a successful capture.
pub const CATCH_SHAKES: u8 = 4;

/// Modified catch rate: `(3*maxHP - 2*HP) * catchRate * statusBonus / (3*maxHP)`.
pub fn catch_value(target: &PokemonInst) -> f32 {
    let max_hp = target.max_hp() as f32;
    let hp = target.hp() as f32;
    let catch_rate = target.species().catch_rate as f32;
    (3.0 * max_hp - 2.0 * hp) * catch_rate * status_bonus(target.status()) / (3.0 * max_hp)
}

/// Threshold each shake roll in `0..=65535` must fall below.
pub fn shake_threshold(catch_value: f32) -> f32 {
    1_048_560.0 / (16_711_680.0 / catch_value).sqrt().sqrt()
}

/// Roll the shake checks for a Poke Ball thrown at `target`.
/// Returns the number of shakes; `CATCH_SHAKES` means the Pokemon was caught.
pub fn roll_shake_count(target: &PokemonInst, rng: &mut TurnRng) -> u8 {
    let a = catch_value(target);
    if a >= 255.0 {
        debug!(pokemon = target.name(), a, "guaranteed capture");
        return CATCH_SHAKES;
    }

    let b = shake_threshold(a);
    let mut shakes = 0;
    while shakes < CATCH_SHAKES {
        if rng.range("pokeball shake", 0, 65535) as f32 >= b {
            break;
        }
        shakes += 1;
    }
    debug!(pokemon = target.name(), a, b, shakes, "pokeball shakes");
    shakes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use schema::ConditionId;

    fn pidgey(hp: u16) -> PokemonInst {
        let dex = Dex::builtin().unwrap();
        let mut pokemon = dex.create_pokemon("Pidgey", 25).unwrap();
        pokemon.set_hp(hp);
        pokemon
    }

    #[test]
    fn catch_value_at_full_hp() {
        // (135 - 90) * 255 / 135
        assert!((catch_value(&pidgey(45)) - 85.0).abs() < 1e-3);
    }

    #[test]
    fn catch_value_rises_as_hp_falls() {
        assert!(catch_value(&pidgey(1)) > catch_value(&pidgey(30)));
    }

    #[test]
    fn status_doubles_catch_value_for_sleep() {
        let mut rng = TurnRng::new_for_test(vec![2]);
        let mut asleep = pidgey(45);
        asleep.set_status(ConditionId::Sleep, &mut rng);
        assert!((catch_value(&asleep) - 170.0).abs() < 1e-3);
    }

    #[test]
    fn guaranteed_capture_uses_no_rolls() {
        let mut rng = TurnRng::new_for_test(vec![1]);
        let mut target = pidgey(1);
        target.set_status(ConditionId::Sleep, &mut rng);
        assert_eq!(roll_shake_count(&target, &mut rng), CATCH_SHAKES);
    }

    #[test]
    fn shake_count_stops_at_first_failed_roll() {
        let mut rng = TurnRng::new_for_test(vec![0, 0, 65535]);
        assert_eq!(roll_shake_count(&pidgey(45), &mut rng), 2);
    }

    #[test]
    fn four_low_rolls_catch() {
        let mut rng = TurnRng::new_for_test(vec![0, 0, 0, 0]);
        assert_eq!(roll_shake_count(&pidgey(45), &mut rng), CATCH_SHAKES);
    }
}
