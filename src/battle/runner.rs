use crate::battle::action_stack::{ActionStack, TurnStep};
use crate::battle::catch::{roll_shake_count, try_escape, CATCH_SHAKES};
use crate::battle::rng::TurnRng;
use crate::battle::state::{
    AnimationCue, BattleEvent, BattlePhase, BattleState, EventBus, MoveSlotInfo, Side,
};
use crate::battle::turn_orchestrator::{hp_update, run_after_turn, run_move};
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::party::{Encounter, Party, Trainer};
use crate::pokemon::PokemonInst;
use tracing::{debug, info, warn};

/// Discrete input events from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleInput {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

/// Entries of the action menu, in cursor order (a 2x2 grid).
pub const ACTION_MENU: [&str; 4] = ["Fight", "Bag", "Pokemon", "Run"];

/// Why the party screen is open; decides what a pick or a cancel does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartyScreenReason {
    /// Opened from the action menu. A pick spends the turn.
    Voluntary,
    /// The active Pokemon fainted and must be replaced.
    Forced,
    /// The trainer is about to send out its next Pokemon.
    TrainerSwap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerChoice {
    Move(usize),
    Switch(usize),
    Pokeball,
    Run,
}

/// Outcome of a single turn step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Waiting on the player; remaining steps stay queued.
    Suspend,
    /// The battle ended.
    Stop,
}

/// The battle state machine.
///
/// Every entry point returns the presentation directives it produced. Nothing here
/// blocks: the caller plays the events back and then submits the next input.
#[derive(Debug)]
pub struct BattleSystem {
    config: BattleConfig,
    state: BattleState,
    phase: BattlePhase,
    rng: TurnRng,
    steps: ActionStack,
    party_reason: Option<PartyScreenReason>,
    next_trainer_pokemon: Option<usize>,
    action_cursor: usize,
    move_cursor: usize,
    party_cursor: usize,
    choice_yes: bool,
    outcome: Option<bool>,
}

impl BattleSystem {
    pub fn new(
        config: BattleConfig,
        player: Trainer,
        encounter: Encounter,
        rng: TurnRng,
    ) -> BattleResult<Self> {
        validate_party(&player.party, &player.name, config.max_party_size)?;
        let player_active = player
            .party
            .healthy_pokemon_index()
            .ok_or_else(|| BattleStateError::NoHealthyPokemon(player.name.clone()))?;

        let (enemy, trainer_name) = match encounter {
            Encounter::Wild(pokemon) => (Party::new(vec![pokemon]), None),
            Encounter::Trainer(trainer) => {
                validate_party(&trainer.party, &trainer.name, config.max_party_size)?;
                (trainer.party, Some(trainer.name))
            }
        };
        let enemy_active = enemy.healthy_pokemon_index().ok_or_else(|| {
            BattleStateError::NoHealthyPokemon(
                trainer_name
                    .clone()
                    .unwrap_or_else(|| "The wild Pokemon".to_string()),
            )
        })?;

        Ok(Self {
            config,
            state: BattleState {
                player,
                player_active,
                enemy,
                enemy_active,
                trainer_name,
                turn_number: 0,
                escape_attempts: 0,
            },
            phase: BattlePhase::Start,
            rng,
            steps: ActionStack::new(),
            party_reason: None,
            next_trainer_pokemon: None,
            action_cursor: 0,
            move_cursor: 0,
            party_cursor: 0,
            choice_yes: true,
            outcome: None,
        })
    }

    // === Queries ===

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// `Some(won)` once the battle is over.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase == BattlePhase::BattleOver
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn rng(&self) -> &TurnRng {
        &self.rng
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    pub fn player_pokemon(&self) -> &PokemonInst {
        self.state.active(Side::Player)
    }

    pub fn enemy_pokemon(&self) -> &PokemonInst {
        self.state.active(Side::Enemy)
    }

    /// Current cursor position in the menu for the current phase.
    pub fn cursor(&self) -> usize {
        match self.phase {
            BattlePhase::MoveSelection => self.move_cursor,
            BattlePhase::PokemonSelection => self.party_cursor,
            BattlePhase::WillChangePokemon => usize::from(!self.choice_yes),
            _ => self.action_cursor,
        }
    }

    /// Hand the player's trainer (and party) back once the battle is done with it.
    pub fn into_player(self) -> Trainer {
        self.state.player
    }

    // === Setup ===

    /// Send out both sides and open the action menu.
    pub fn start(&mut self) -> EventBus {
        let mut bus = EventBus::new();
        if self.phase != BattlePhase::Start {
            warn!(phase = ?self.phase, "battle already started");
            return bus;
        }
        self.set_phase(BattlePhase::Busy);

        match self.state.trainer_name.clone() {
            None => {
                info!(
                    wild = self.enemy_pokemon().name(),
                    player = self.player_pokemon().name(),
                    "wild battle started"
                );
                self.announce_sent_out(Side::Player, &mut bus);
                self.announce_sent_out(Side::Enemy, &mut bus);
                bus.message(format!("A wild {} appeared.", self.enemy_pokemon().name()));
            }
            Some(trainer) => {
                info!(trainer = %trainer, "trainer battle started");
                bus.message(format!("{} wants to battle", trainer));
                self.announce_sent_out(Side::Enemy, &mut bus);
                bus.message(format!("{} sent out {}", trainer, self.enemy_pokemon().name()));
                self.announce_sent_out(Side::Player, &mut bus);
                bus.message(format!("Go {}!", self.player_pokemon().name()));
            }
        }

        self.state.escape_attempts = 0;
        self.action_selection(&mut bus);
        bus
    }

    // === Directional input ===

    /// Feed one input event. Inputs outside the selection phases are ignored, and
    /// rejected choices are reported the way the menus report them.
    pub fn handle_input(&mut self, input: BattleInput) -> EventBus {
        if !self.phase.accepts_input() {
            debug!(?input, phase = ?self.phase, "input ignored");
            return EventBus::new();
        }
        match self.phase {
            BattlePhase::MoveSelection => self.handle_move_selection(input),
            BattlePhase::PokemonSelection => self.handle_party_selection(input),
            BattlePhase::WillChangePokemon => self.handle_about_to_use(input),
            _ => self.handle_action_selection(input),
        }
    }

    fn handle_action_selection(&mut self, input: BattleInput) -> EventBus {
        match input {
            BattleInput::Confirm => {
                let result = match self.action_cursor {
                    0 => self.select_fight(),
                    1 => self.throw_pokeball(),
                    2 => self.open_party(),
                    _ => self.run_away(),
                };
                rejected_as_inert(result)
            }
            BattleInput::Cancel => EventBus::new(),
            direction => navigate(&mut self.action_cursor, ACTION_MENU.len(), direction),
        }
    }

    fn handle_move_selection(&mut self, input: BattleInput) -> EventBus {
        match input {
            BattleInput::Confirm => rejected_as_inert(self.choose_move(self.move_cursor)),
            BattleInput::Cancel => rejected_as_inert(self.back_to_actions()),
            direction => {
                let count = self.player_pokemon().moves().len();
                navigate(&mut self.move_cursor, count, direction)
            }
        }
    }

    fn handle_party_selection(&mut self, input: BattleInput) -> EventBus {
        match input {
            BattleInput::Confirm => rejected_as_party_message(self.choose_pokemon(self.party_cursor)),
            BattleInput::Cancel => rejected_as_party_message(self.cancel_party_selection()),
            direction => {
                let count = self.state.player.party.len();
                navigate(&mut self.party_cursor, count, direction)
            }
        }
    }

    fn handle_about_to_use(&mut self, input: BattleInput) -> EventBus {
        match input {
            BattleInput::Up | BattleInput::Down => {
                self.choice_yes = !self.choice_yes;
                let mut bus = EventBus::new();
                bus.push(BattleEvent::SelectionChanged {
                    index: usize::from(!self.choice_yes),
                });
                bus
            }
            BattleInput::Confirm => rejected_as_inert(self.answer_switch_prompt(self.choice_yes)),
            BattleInput::Cancel => rejected_as_inert(self.answer_switch_prompt(false)),
            BattleInput::Left | BattleInput::Right => EventBus::new(),
        }
    }

    // === Intents ===

    /// Open the move menu.
    pub fn select_fight(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::ActionSelection])?;
        let mut bus = EventBus::new();
        self.move_selection(&mut bus);
        Ok(bus)
    }

    /// Leave the move menu.
    pub fn back_to_actions(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::MoveSelection])?;
        let mut bus = EventBus::new();
        self.action_selection(&mut bus);
        Ok(bus)
    }

    /// Lock in a move and play out the turn.
    pub fn choose_move(&mut self, move_index: usize) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::ActionSelection, BattlePhase::MoveSelection])?;
        let move_instance = self
            .player_pokemon()
            .moves()
            .get(move_index)
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;
        if !move_instance.has_pp() {
            return Err(ActionError::NoPpLeft(move_instance.name().to_string()));
        }

        let mut bus = EventBus::new();
        self.move_cursor = move_index;
        self.begin_turn(PlayerChoice::Move(move_index), &mut bus);
        Ok(bus)
    }

    /// Open the party screen from the action menu.
    pub fn open_party(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::ActionSelection])?;
        let mut bus = EventBus::new();
        self.open_party_screen(PartyScreenReason::Voluntary, &mut bus);
        Ok(bus)
    }

    /// Pick a party member on the party screen.
    pub fn choose_pokemon(&mut self, party_index: usize) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::PokemonSelection])?;
        let member = self
            .state
            .player
            .party
            .get(party_index)
            .ok_or(ActionError::InvalidPokemonIndex(party_index))?;
        if member.is_fainted() {
            return Err(ActionError::PokemonFainted(party_index));
        }
        if party_index == self.state.player_active {
            return Err(ActionError::AlreadyActive(party_index));
        }

        let reason = self
            .party_reason
            .take()
            .unwrap_or(PartyScreenReason::Voluntary);
        self.party_cursor = party_index;
        let mut bus = EventBus::new();

        match reason {
            PartyScreenReason::Voluntary => {
                self.begin_turn(PlayerChoice::Switch(party_index), &mut bus);
            }
            PartyScreenReason::Forced => {
                self.set_phase(BattlePhase::Busy);
                self.switch_pokemon(party_index, &mut bus);
                self.continue_turn(&mut bus);
            }
            PartyScreenReason::TrainerSwap => {
                self.set_phase(BattlePhase::Busy);
                self.switch_pokemon(party_index, &mut bus);
                self.send_next_trainer_pokemon(&mut bus);
                self.continue_turn(&mut bus);
            }
        }
        Ok(bus)
    }

    /// Back out of the party screen. Refused while the active Pokemon is fainted.
    pub fn cancel_party_selection(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::PokemonSelection])?;
        if self.player_pokemon().is_fainted() {
            return Err(ActionError::MustChoosePokemon);
        }

        let mut bus = EventBus::new();
        match self.party_reason.take() {
            Some(PartyScreenReason::TrainerSwap) => {
                self.set_phase(BattlePhase::Busy);
                self.send_next_trainer_pokemon(&mut bus);
                self.continue_turn(&mut bus);
            }
            _ => self.action_selection(&mut bus),
        }
        Ok(bus)
    }

    /// Throw a Poke Ball. Trainer battles refuse without using up the turn.
    pub fn throw_pokeball(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::ActionSelection])?;
        let mut bus = EventBus::new();
        if self.state.is_trainer_battle() {
            bus.message("You can't steal the trainer's pokemon!");
            self.action_selection(&mut bus);
        } else {
            self.begin_turn(PlayerChoice::Pokeball, &mut bus);
        }
        Ok(bus)
    }

    /// Try to flee. Trainer battles refuse without using up the turn.
    pub fn run_away(&mut self) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::ActionSelection])?;
        let mut bus = EventBus::new();
        if self.state.is_trainer_battle() {
            bus.message("You can't run from trainer battles!");
            self.action_selection(&mut bus);
        } else {
            self.begin_turn(PlayerChoice::Run, &mut bus);
        }
        Ok(bus)
    }

    /// Answer "Do you want to change pokemon?".
    pub fn answer_switch_prompt(&mut self, change: bool) -> Result<EventBus, ActionError> {
        self.expect_phase(&[BattlePhase::WillChangePokemon])?;
        let mut bus = EventBus::new();
        if change {
            self.open_party_screen(PartyScreenReason::TrainerSwap, &mut bus);
        } else {
            self.set_phase(BattlePhase::Busy);
            self.send_next_trainer_pokemon(&mut bus);
            self.continue_turn(&mut bus);
        }
        Ok(bus)
    }

    // === Menus ===

    fn action_selection(&mut self, bus: &mut EventBus) {
        self.set_phase(BattlePhase::ActionSelection);
        bus.message("Choose an action");
        bus.push(BattleEvent::ActionSelectorShown);
    }

    fn move_selection(&mut self, bus: &mut EventBus) {
        self.set_phase(BattlePhase::MoveSelection);
        let moves: Vec<MoveSlotInfo> = self
            .player_pokemon()
            .moves()
            .iter()
            .map(MoveSlotInfo::from_move)
            .collect();
        self.move_cursor = self.move_cursor.min(moves.len().saturating_sub(1));
        bus.push(BattleEvent::MoveSelectorShown { moves });
        bus.push(BattleEvent::SelectionChanged {
            index: self.move_cursor,
        });
    }

    fn open_party_screen(&mut self, reason: PartyScreenReason, bus: &mut EventBus) {
        self.party_reason = Some(reason);
        self.set_phase(BattlePhase::PokemonSelection);
        bus.push(BattleEvent::PartyScreenShown {
            roster: self.state.player.party.roster(),
            message: "Choose a Pokemon".to_string(),
        });
    }

    fn about_to_use(&mut self, next: usize, bus: &mut EventBus) {
        self.next_trainer_pokemon = Some(next);
        let trainer = self.state.trainer_name.clone().unwrap_or_default();
        bus.message(format!(
            "{} is about to use {}. Do you want to change pokemon?",
            trainer,
            self.state.enemy[next].name()
        ));
        self.set_phase(BattlePhase::WillChangePokemon);
        self.choice_yes = true;
        bus.push(BattleEvent::ChoiceBoxShown);
    }

    // === Turn execution ===

    fn begin_turn(&mut self, choice: PlayerChoice, bus: &mut EventBus) {
        self.set_phase(BattlePhase::RunningTurn);
        self.state.turn_number += 1;
        bus.push(BattleEvent::TurnStarted {
            turn: self.state.turn_number,
        });
        info!(turn = self.state.turn_number, ?choice, "turn started");

        let enemy_move = self.state.active(Side::Enemy).random_move_index(&mut self.rng);
        self.steps = match choice {
            PlayerChoice::Move(move_index) => {
                ActionStack::build_move_turn(&self.state, move_index, enemy_move)
            }
            PlayerChoice::Switch(party_index) => ActionStack::build_action_turn(
                &self.state,
                TurnStep::SwitchPokemon { party_index },
                enemy_move,
            ),
            PlayerChoice::Pokeball => {
                ActionStack::build_action_turn(&self.state, TurnStep::ThrowPokeball, enemy_move)
            }
            PlayerChoice::Run => {
                ActionStack::build_action_turn(&self.state, TurnStep::Escape, enemy_move)
            }
        };
        self.continue_turn(bus);
    }

    /// Run queued steps until the turn finishes, the battle ends, or the player
    /// has to make a choice.
    fn continue_turn(&mut self, bus: &mut EventBus) {
        self.set_phase(BattlePhase::RunningTurn);
        while let Some(step) = self.steps.pop_front() {
            match self.execute_step(step, bus) {
                Flow::Continue => {}
                Flow::Suspend => return,
                Flow::Stop => {
                    self.steps.clear();
                    return;
                }
            }
        }
        bus.push(BattleEvent::TurnEnded);
        self.action_selection(bus);
    }

    fn execute_step(&mut self, step: TurnStep, bus: &mut EventBus) -> Flow {
        match step {
            TurnStep::UseMove {
                side,
                party_index,
                move_index,
            } => {
                if !self.is_still_active(side, party_index) {
                    return Flow::Continue;
                }
                let Some(move_index) = move_index else {
                    let name = self.state.active(side).name().to_string();
                    warn!(pokemon = %name, "no move with PP left, turn skipped");
                    bus.message(format!("{} has no moves left!", name));
                    return Flow::Continue;
                };
                let fainted = run_move(
                    &mut self.state,
                    side,
                    move_index,
                    bus,
                    &mut self.rng,
                    &self.config,
                );
                match fainted {
                    Some(fainted_side) => self.check_for_battle_over(fainted_side, bus),
                    None => Flow::Continue,
                }
            }
            TurnStep::AfterTurn { side, party_index } => {
                if self.state.active_index(side) != party_index {
                    return Flow::Continue;
                }
                match run_after_turn(&mut self.state, side, bus, &self.config) {
                    Some(fainted_side) => self.check_for_battle_over(fainted_side, bus),
                    None => Flow::Continue,
                }
            }
            TurnStep::SwitchPokemon { party_index } => {
                self.set_phase(BattlePhase::Busy);
                self.switch_pokemon(party_index, bus);
                self.set_phase(BattlePhase::RunningTurn);
                Flow::Continue
            }
            TurnStep::ThrowPokeball => self.throw_pokeball_step(bus),
            TurnStep::Escape => self.escape_step(bus),
            TurnStep::TrainerReplacement => self.check_for_battle_over(Side::Enemy, bus),
        }
    }

    fn is_still_active(&self, side: Side, party_index: usize) -> bool {
        self.state.active_index(side) == party_index && !self.state.active(side).is_fainted()
    }

    fn check_for_battle_over(&mut self, fainted_side: Side, bus: &mut EventBus) -> Flow {
        match fainted_side {
            Side::Player => {
                if self.state.player.party.has_healthy_pokemon() {
                    self.open_party_screen(PartyScreenReason::Forced, bus);
                    Flow::Suspend
                } else {
                    self.battle_over(false, bus);
                    Flow::Stop
                }
            }
            Side::Enemy => {
                if !self.state.is_trainer_battle() {
                    self.battle_over(true, bus);
                    return Flow::Stop;
                }
                match self.state.enemy.healthy_pokemon_index() {
                    Some(_) if self.player_tick_pending() => {
                        // The player's end-of-turn tick lands before the swap prompt.
                        if let Some(after_turn) = self.steps.pop_front() {
                            self.steps.push_front(TurnStep::TrainerReplacement);
                            self.steps.push_front(after_turn);
                        }
                        Flow::Continue
                    }
                    Some(next) => {
                        self.about_to_use(next, bus);
                        Flow::Suspend
                    }
                    None => {
                        self.battle_over(true, bus);
                        Flow::Stop
                    }
                }
            }
        }
    }

    fn player_tick_pending(&self) -> bool {
        matches!(
            self.steps.steps().next(),
            Some(TurnStep::AfterTurn {
                side: Side::Player,
                ..
            })
        )
    }

    fn switch_pokemon(&mut self, party_index: usize, bus: &mut EventBus) {
        let current = self.player_pokemon();
        if !current.is_fainted() {
            bus.message(format!("Come back {}", current.name()));
            bus.push(BattleEvent::Animation {
                side: Side::Player,
                cue: AnimationCue::Faint,
            });
            bus.push(BattleEvent::Wait {
                ms: self.config.switch_out_ms,
            });
        }

        self.state.player_active = party_index;
        self.move_cursor = 0;
        self.announce_sent_out(Side::Player, bus);
        bus.message(format!("Go {}!", self.player_pokemon().name()));
    }

    fn send_next_trainer_pokemon(&mut self, bus: &mut EventBus) {
        let Some(next) = self
            .next_trainer_pokemon
            .take()
            .or_else(|| self.state.enemy.healthy_pokemon_index())
        else {
            warn!("trainer has no Pokemon left to send out");
            return;
        };

        bus.push(BattleEvent::Wait {
            ms: self.config.trainer_switch_delay_ms,
        });
        self.state.enemy_active = next;
        self.announce_sent_out(Side::Enemy, bus);
        let trainer = self.state.trainer_name.clone().unwrap_or_default();
        bus.message(format!("{} sent out {}", trainer, self.enemy_pokemon().name()));
    }

    fn announce_sent_out(&self, side: Side, bus: &mut EventBus) {
        let pokemon = self.state.active(side);
        bus.push(BattleEvent::PokemonSentOut {
            side,
            name: pokemon.name().to_string(),
            level: pokemon.level(),
        });
        bus.push(BattleEvent::Animation {
            side,
            cue: AnimationCue::Enter,
        });
        bus.push(hp_update(pokemon, side));
    }

    fn throw_pokeball_step(&mut self, bus: &mut EventBus) -> Flow {
        bus.message(format!("{} used POKEBALL!", self.state.player.name));
        bus.push(BattleEvent::Animation {
            side: Side::Player,
            cue: AnimationCue::PokeballThrow,
        });
        bus.push(BattleEvent::Animation {
            side: Side::Enemy,
            cue: AnimationCue::Capture,
        });

        let shakes = roll_shake_count(self.state.active(Side::Enemy), &mut self.rng);
        for _ in 0..shakes.min(3) {
            bus.push(BattleEvent::Wait {
                ms: self.config.pokeball_shake_ms,
            });
            bus.push(BattleEvent::Animation {
                side: Side::Enemy,
                cue: AnimationCue::PokeballShake,
            });
        }

        let name = self.enemy_pokemon().name().to_string();
        if shakes == CATCH_SHAKES {
            bus.message(format!("{} was caught", name));
            let caught = self.enemy_pokemon().clone();
            if self
                .state
                .player
                .party
                .add_pokemon(caught, self.config.max_party_size)
            {
                bus.message(format!("{} has been added to your party", name));
            } else {
                bus.message(format!("Your party is full, {} could not join", name));
            }
            info!(pokemon = %name, "pokemon caught");
            self.battle_over(true, bus);
            return Flow::Stop;
        }

        bus.push(BattleEvent::Wait {
            ms: self.config.break_out_ms,
        });
        bus.push(BattleEvent::Animation {
            side: Side::Enemy,
            cue: AnimationCue::BreakOut,
        });
        if shakes < 2 {
            bus.message(format!("{} broke free", name));
        } else {
            bus.message("Almost caught it");
        }
        Flow::Continue
    }

    fn escape_step(&mut self, bus: &mut EventBus) -> Flow {
        self.state.escape_attempts += 1;
        let player_speed = self.player_pokemon().speed();
        let enemy_speed = self.enemy_pokemon().speed();

        if try_escape(
            player_speed,
            enemy_speed,
            self.state.escape_attempts,
            &mut self.rng,
        ) {
            bus.message("Ran away safely!");
            self.battle_over(true, bus);
            Flow::Stop
        } else {
            bus.message("Can't escape!");
            Flow::Continue
        }
    }

    fn battle_over(&mut self, won: bool, bus: &mut EventBus) {
        if self.phase == BattlePhase::BattleOver {
            return;
        }
        self.set_phase(BattlePhase::BattleOver);
        self.outcome = Some(won);
        self.steps.clear();
        self.party_reason = None;
        for pokemon in self.state.player.party.iter_mut() {
            pokemon.on_battle_over();
        }
        info!(won, turns = self.state.turn_number, "battle over");
        bus.push(BattleEvent::BattleOver { won });
    }

    // === Helpers ===

    fn set_phase(&mut self, phase: BattlePhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    fn expect_phase(&self, allowed: &[BattlePhase]) -> Result<(), ActionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ActionError::NotAccepted(self.phase))
        }
    }
}

fn validate_party(party: &Party, owner: &str, max_size: usize) -> Result<(), BattleStateError> {
    if party.is_empty() {
        return Err(BattleStateError::EmptyParty);
    }
    if party.len() > max_size {
        return Err(BattleStateError::PartyTooLarge {
            size: party.len(),
            max: max_size,
        });
    }
    if !party.has_healthy_pokemon() {
        return Err(BattleStateError::NoHealthyPokemon(owner.to_string()));
    }
    Ok(())
}

/// Move a grid cursor: left/right step by one, up/down by a row of two.
fn navigate(cursor: &mut usize, count: usize, input: BattleInput) -> EventBus {
    let mut bus = EventBus::new();
    if count == 0 {
        return bus;
    }
    let last = count - 1;
    let moved = match input {
        BattleInput::Right => (*cursor + 1).min(last),
        BattleInput::Left => cursor.saturating_sub(1),
        BattleInput::Down => (*cursor + 2).min(last),
        BattleInput::Up => cursor.saturating_sub(2),
        BattleInput::Confirm | BattleInput::Cancel => *cursor,
    };
    if moved != *cursor {
        *cursor = moved;
        bus.push(BattleEvent::SelectionChanged { index: moved });
    }
    bus
}

fn rejected_as_inert(result: Result<EventBus, ActionError>) -> EventBus {
    result.unwrap_or_else(|err| {
        warn!(%err, "input rejected");
        EventBus::new()
    })
}

fn rejected_as_party_message(result: Result<EventBus, ActionError>) -> EventBus {
    result.unwrap_or_else(|err| {
        debug!(%err, "party selection rejected");
        let mut bus = EventBus::new();
        bus.push(BattleEvent::PartyMessage(err.to_string()));
        bus
    })
}
