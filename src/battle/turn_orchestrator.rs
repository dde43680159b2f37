use crate::battle::calculators::{move_hits, take_damage, DamageDetails};
use crate::battle::rng::TurnRng;
use crate::battle::state::{AnimationCue, BattleEvent, BattleState, EventBus, Side};
use crate::config::BattleConfig;
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveEffects, MoveTarget};
use tracing::{debug, warn};

/// Flush a Pokemon's queued narration onto the bus.
pub fn show_status_changes(pokemon: &mut PokemonInst, bus: &mut EventBus) {
    for message in pokemon.drain_status_changes() {
        bus.message(message);
    }
}

pub fn hp_update(pokemon: &PokemonInst, side: Side) -> BattleEvent {
    BattleEvent::HpUpdated {
        side,
        hp: pokemon.hp(),
        max_hp: pokemon.max_hp(),
    }
}

fn show_damage_details(details: &DamageDetails, bus: &mut EventBus) {
    if details.critical > 1.0 {
        bus.message("A critical hit!");
    }
    if details.type_effectiveness > 1.0 {
        bus.message("It's super effective!");
    } else if details.type_effectiveness < 1.0 {
        bus.message("It's not very effective...");
    }
}

fn narrate_faint(pokemon: &PokemonInst, side: Side, bus: &mut EventBus, config: &BattleConfig) {
    bus.message(format!("{} fainted", pokemon.name()));
    bus.push(BattleEvent::Animation {
        side,
        cue: AnimationCue::Faint,
    });
    bus.push(BattleEvent::Wait {
        ms: config.faint_ms,
    });
}

/// Apply an effect bundle. Boosts follow `target`; statuses always land on `defender`.
pub fn run_move_effects(
    effects: &MoveEffects,
    attacker: &mut PokemonInst,
    defender: &mut PokemonInst,
    target: MoveTarget,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    if !effects.boosts.is_empty() {
        match target {
            MoveTarget::User => attacker.apply_boosts(&effects.boosts),
            MoveTarget::Foe => defender.apply_boosts(&effects.boosts),
        }
    }

    if let Some(status) = effects.status {
        defender.set_status(status, rng);
    }

    if let Some(volatile_status) = effects.volatile_status {
        defender.set_volatile_status(volatile_status, rng);
    }

    show_status_changes(attacker, bus);
    show_status_changes(defender, bus);
}

/// Execute the active `source` Pokemon's move at `move_index` against the other side.
///
/// Returns the side whose Pokemon fainted from the hit, if any. Faints caused by
/// the user's own status are left for the after-turn check.
pub fn run_move(
    battle_state: &mut BattleState,
    source: Side,
    move_index: usize,
    bus: &mut EventBus,
    rng: &mut TurnRng,
    config: &BattleConfig,
) -> Option<Side> {
    let target_side = source.opponent();
    let (attacker, defender) = battle_state.combatants_mut(source);

    if !attacker.on_before_move(rng) {
        show_status_changes(attacker, bus);
        bus.push(hp_update(attacker, source));
        debug!(pokemon = attacker.name(), "move blocked by status");
        return None;
    }
    show_status_changes(attacker, bus);

    let Some(move_instance) = attacker.moves_mut().get_mut(move_index) else {
        warn!(pokemon = attacker.name(), move_index, "move slot does not exist");
        return None;
    };
    move_instance.use_move();
    let move_data = move_instance.shared_data();

    bus.message(format!("{} used {}", attacker.name(), move_data.name));

    if !move_hits(&move_data, attacker, defender, rng) {
        bus.message(format!("{}'s attack missed", attacker.name()));
        return None;
    }

    bus.push(BattleEvent::Animation {
        side: source,
        cue: AnimationCue::Attack,
    });
    bus.push(BattleEvent::Wait {
        ms: config.attack_windup_ms,
    });
    bus.push(BattleEvent::Animation {
        side: target_side,
        cue: AnimationCue::Hit,
    });

    if move_data.category == MoveCategory::Status {
        run_move_effects(
            &move_data.effects,
            attacker,
            defender,
            move_data.target,
            bus,
            rng,
        );
    } else {
        let details = take_damage(&move_data, attacker, defender, rng);
        bus.push(hp_update(defender, target_side));
        show_damage_details(&details, bus);
    }

    if !move_data.secondary_effects.is_empty() && !defender.is_fainted() {
        for secondary in &move_data.secondary_effects {
            let roll = rng.percent("secondary effect");
            if roll <= secondary.chance as u32 {
                debug!(move_name = %move_data.name, roll, chance = secondary.chance, "secondary effect triggered");
                run_move_effects(
                    &secondary.effects,
                    attacker,
                    defender,
                    secondary.target,
                    bus,
                    rng,
                );
            }
        }
    }

    if defender.is_fainted() {
        narrate_faint(defender, target_side, bus, config);
        return Some(target_side);
    }
    None
}

/// End-of-turn status tick for the active Pokemon on `side`.
///
/// Returns `Some(side)` if the Pokemon is now fainted.
pub fn run_after_turn(
    battle_state: &mut BattleState,
    side: Side,
    bus: &mut EventBus,
    config: &BattleConfig,
) -> Option<Side> {
    let pokemon = battle_state.active_mut(side);
    if !pokemon.is_fainted() {
        pokemon.on_after_turn();
        show_status_changes(pokemon, bus);
        bus.push(hp_update(pokemon, side));
    }

    if pokemon.is_fainted() {
        narrate_faint(pokemon, side, bus, config);
        return Some(side);
    }
    None
}
