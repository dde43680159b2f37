use crate::battle::rng::TurnRng;
use crate::battle::stats::accuracy_multiplier;
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveData, StatType};
use tracing::debug;

/// Outcome of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageDetails {
    /// 2.0 on a critical hit, otherwise 1.0.
    pub critical: f32,
    pub type_effectiveness: f32,
    pub damage: u16,
    pub fainted: bool,
}

/// Roll whether `move_data` connects, folding in accuracy and evasion stages.
pub fn move_hits(
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    rng: &mut TurnRng,
) -> bool {
    if move_data.always_hits {
        return true;
    }

    let accuracy = move_data.accuracy as f32
        * accuracy_multiplier(attacker.stat_stage(StatType::Accuracy))
        / accuracy_multiplier(defender.stat_stage(StatType::Evasion));

    let roll = rng.percent("hit check");
    debug!(move_name = %move_data.name, accuracy, roll, "hit check");
    roll as f32 <= accuracy
}

/// 6.25% chance of a critical hit.
pub fn roll_critical(rng: &mut TurnRng) -> f32 {
    if rng.one_in("critical hit", 16) {
        2.0
    } else {
        1.0
    }
}

/// `floor(((2*level+10)/250 * power * attack/defense + 2) * random * type * critical)`
pub fn damage_formula(
    level: u8,
    power: u16,
    attack: u16,
    defense: u16,
    random_factor: f32,
    type_effectiveness: f32,
    critical: f32,
) -> u16 {
    let level_factor = (2.0 * level as f32 + 10.0) / 250.0;
    let base = level_factor * power as f32 * (attack as f32 / defense.max(1) as f32) + 2.0;
    (base * random_factor * type_effectiveness * critical).floor() as u16
}

/// Compute the damage `attacker` deals to `defender` with `move_data` and apply it.
pub fn take_damage(
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &mut PokemonInst,
    rng: &mut TurnRng,
) -> DamageDetails {
    let critical = roll_critical(rng);
    let type_effectiveness = move_data.move_type.effectiveness_against(defender.types());

    let (attack, defense) = match move_data.category {
        MoveCategory::Special => (attacker.sp_attack(), defender.sp_defense()),
        _ => (attacker.attack(), defender.defense()),
    };

    let random_factor = rng.damage_factor("damage spread");
    let damage = damage_formula(
        attacker.level(),
        move_data.power,
        attack,
        defense,
        random_factor,
        type_effectiveness,
        critical,
    );
    let fainted = defender.take_damage(damage);

    debug!(
        move_name = %move_data.name,
        attack,
        defense,
        critical,
        type_effectiveness,
        damage,
        remaining_hp = defender.hp(),
        "damage dealt"
    );

    DamageDetails {
        critical,
        type_effectiveness,
        damage,
        fainted,
    }
}
