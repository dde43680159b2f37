use crate::battle::rng::TurnRng;
use crate::battle::runner::BattleSystem;
use crate::battle::state::{BattleEvent, EventBus};
use crate::config::BattleConfig;
use crate::dex::Dex;
use crate::party::{Encounter, Trainer};
use crate::pokemon::PokemonInst;
use schema::ConditionId;

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_moves(&["Tackle"])
///     .with_status(ConditionId::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u8,
    moves: Option<Vec<String>>,
    status: Option<ConditionId>,
    volatile_status: Option<ConditionId>,
    status_turns: Option<i8>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: None,
            status: None,
            volatile_status: None,
            status_turns: None,
            current_hp: None,
        }
    }

    /// Sets the moves for the test Pokemon. Without this, the learnset decides.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = Some(moves.iter().map(|name| name.to_string()).collect());
        self
    }

    pub fn with_status(mut self, status: ConditionId) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_volatile_status(mut self, status: ConditionId) -> Self {
        self.volatile_status = Some(status);
        self
    }

    /// Turns left on sleep or confusion.
    pub fn with_status_turns(mut self, turns: i8) -> Self {
        self.status_turns = Some(turns);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        let dex = test_dex();
        let created = match &self.moves {
            Some(moves) => {
                let names: Vec<&str> = moves.iter().map(String::as_str).collect();
                dex.create_pokemon_with_moves(&self.species, self.level, &names)
            }
            None => dex.create_pokemon(&self.species, self.level),
        };
        let mut pokemon = match created {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to create test {}: {}", self.species, err),
        };

        // Durations are overwritten below when the test cares about them.
        let mut setup_rng = TurnRng::new_for_test(vec![1, 1]);
        if let Some(status) = self.status {
            pokemon.set_status(status, &mut setup_rng);
        }
        if let Some(volatile) = self.volatile_status {
            pokemon.set_volatile_status(volatile, &mut setup_rng);
        }
        if let Some(turns) = self.status_turns {
            if self.status.is_some() {
                pokemon.status_time = turns;
            }
            if self.volatile_status.is_some() {
                pokemon.volatile_status_time = turns;
            }
        }
        pokemon.drain_status_changes();

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

pub fn test_dex() -> Dex {
    match Dex::builtin() {
        Ok(dex) => dex,
        Err(err) => panic!("Built-in dex failed to load: {}", err),
    }
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// With 50s every move hits, nothing crits, damage rolls 0.85 and 10% secondaries never fire.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 200])
}

/// A started wild battle, waiting for the first action.
pub fn start_wild_battle(
    player_party: Vec<PokemonInst>,
    wild: PokemonInst,
    rng: TurnRng,
) -> BattleSystem {
    let player = Trainer::new("Red", player_party);
    let mut battle =
        match BattleSystem::new(BattleConfig::default(), player, Encounter::Wild(wild), rng) {
            Ok(battle) => battle,
            Err(err) => panic!("Failed to create wild battle: {}", err),
        };
    battle.start();
    battle
}

/// A started battle against the trainer "Blue".
pub fn start_trainer_battle(
    player_party: Vec<PokemonInst>,
    trainer_party: Vec<PokemonInst>,
    rng: TurnRng,
) -> BattleSystem {
    let player = Trainer::new("Red", player_party);
    let rival = Trainer::new("Blue", trainer_party);
    let mut battle =
        match BattleSystem::new(BattleConfig::default(), player, Encounter::Trainer(rival), rng) {
            Ok(battle) => battle,
            Err(err) => panic!("Failed to create trainer battle: {}", err),
        };
    battle.start();
    battle
}

pub fn has_message(bus: &EventBus, text: &str) -> bool {
    bus.messages().contains(&text)
}

/// Position of a message in the narration stream; panics if it never appears.
pub fn message_position(bus: &EventBus, text: &str) -> usize {
    match bus.messages().iter().position(|message| *message == text) {
        Some(position) => position,
        None => panic!("Message {:?} not found in:\n{}", text, bus),
    }
}

pub fn count_battle_over(bus: &EventBus) -> usize {
    bus.events()
        .iter()
        .filter(|event| matches!(event, BattleEvent::BattleOver { .. }))
        .count()
}
