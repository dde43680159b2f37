use pokemon_battle_engine::{
    BattleConfig, BattleEngineError, BattlePhase, BattleSystem, Dex, Encounter, EventBus, Trainer,
    TurnRng,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Upper bound on engine calls per demo battle, so a stalemate cannot spin forever.
const MAX_STEPS: usize = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), BattleEngineError> {
    let dex = Dex::builtin()?;
    let config = BattleConfig::builtin()?;

    // Example 1: the player's starter against a wild Pokemon.
    println!("--- Wild battle ---");
    let player = Trainer::new(
        "Red",
        vec![
            dex.create_pokemon("Pikachu", 12)?,
            dex.create_pokemon("Squirtle", 10)?,
        ],
    );
    let wild = dex.create_pokemon("Pidgey", 7)?;
    let player = play(
        BattleSystem::new(
            config.clone(),
            player,
            Encounter::Wild(wild),
            TurnRng::seeded(7),
        )?,
        11,
    );

    println!();

    // Patch everyone up before the next fight.
    let mut player = player;
    for pokemon in player.party.iter_mut() {
        pokemon.set_hp_to_max();
        pokemon.cure_status();
    }

    // Example 2: the same party against a trainer.
    println!("--- Trainer battle ---");
    let rival = Trainer::new(
        "Blue",
        vec![
            dex.create_pokemon("Rattata", 9)?,
            dex.create_pokemon("Geodude", 11)?,
        ],
    );
    let player = play(
        BattleSystem::new(config, player, Encounter::Trainer(rival), TurnRng::seeded(42))?,
        23,
    );

    println!();
    println!("Party after both battles:");
    for slot in player.party.roster() {
        println!(
            "  {} Lv{} {}/{} HP{}",
            slot.name,
            slot.level,
            slot.hp,
            slot.max_hp,
            slot.status
                .map(|status| format!(" ({:?})", status))
                .unwrap_or_default()
        );
    }
    Ok(())
}

/// Drive a battle to completion with a random player, printing the narration.
fn play(mut battle: BattleSystem, policy_seed: u64) -> Trainer {
    let mut policy = StdRng::seed_from_u64(policy_seed);
    battle.start().print_formatted();

    for _ in 0..MAX_STEPS {
        if battle.is_over() {
            break;
        }
        random_choice(&mut battle, &mut policy).print_formatted();
    }

    match battle.outcome() {
        Some(won) => info!(won, turns = battle.turn_number(), "demo battle finished"),
        None => info!("demo battle stopped without a result"),
    }
    battle.into_player()
}

/// One decision for whatever the battle is currently waiting on.
fn random_choice(battle: &mut BattleSystem, policy: &mut StdRng) -> EventBus {
    let result = match battle.phase() {
        BattlePhase::ActionSelection => match policy.random_range(0..10) {
            0 => battle.run_away(),
            1 => battle.throw_pokeball(),
            2 => battle.open_party(),
            _ => {
                let usable: Vec<usize> = battle
                    .player_pokemon()
                    .moves()
                    .iter()
                    .enumerate()
                    .filter(|(_, move_instance)| move_instance.has_pp())
                    .map(|(index, _)| index)
                    .collect();
                if usable.is_empty() {
                    battle.run_away()
                } else {
                    battle.choose_move(usable[policy.random_range(0..usable.len())])
                }
            }
        },
        BattlePhase::MoveSelection => battle.back_to_actions(),
        BattlePhase::PokemonSelection => {
            let party = &battle.state().player.party;
            let active = battle.state().player_active;
            let candidates: Vec<usize> = (0..party.len())
                .filter(|&index| index != active && !party[index].is_fainted())
                .collect();
            if candidates.is_empty() {
                battle.cancel_party_selection()
            } else {
                battle.choose_pokemon(candidates[policy.random_range(0..candidates.len())])
            }
        }
        BattlePhase::WillChangePokemon => battle.answer_switch_prompt(policy.random_bool(0.3)),
        _ => return EventBus::new(),
    };

    result.unwrap_or_else(|err| {
        let mut bus = EventBus::new();
        bus.message(format!("({})", err));
        bus
    })
}
