use crate::party::{Party, PartySlotInfo, Trainer};
use crate::pokemon::{MoveInstance, PokemonInst};
use schema::PokemonType;
use serde::{Deserialize, Serialize};

/// Which half of the field something belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattlePhase {
    Start,
    ActionSelection,
    MoveSelection,
    PokemonSelection,
    /// Trainer is about to send out its next Pokemon; waiting on a yes/no answer.
    WillChangePokemon,
    RunningTurn,
    Busy,
    BattleOver,
}

impl BattlePhase {
    /// Phases in which player input is read. Input anywhere else is ignored.
    pub fn accepts_input(self) -> bool {
        matches!(
            self,
            BattlePhase::ActionSelection
                | BattlePhase::MoveSelection
                | BattlePhase::PokemonSelection
                | BattlePhase::WillChangePokemon
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    Enter,
    Attack,
    Hit,
    Faint,
    Capture,
    PokeballThrow,
    PokeballShake,
    BreakOut,
}

/// One entry of the move selector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveSlotInfo {
    pub name: String,
    pub move_type: PokemonType,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveSlotInfo {
    pub fn from_move(move_instance: &MoveInstance) -> Self {
        Self {
            name: move_instance.name().to_string(),
            move_type: move_instance.data().move_type,
            pp: move_instance.pp(),
            max_pp: move_instance.max_pp(),
        }
    }
}

/// A presentation directive. The shell plays each one to completion, in order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Narration
    Message(String),

    // HUD and animation
    HpUpdated {
        side: Side,
        hp: u16,
        max_hp: u16,
    },
    Animation {
        side: Side,
        cue: AnimationCue,
    },
    Wait {
        ms: u64,
    },
    PokemonSentOut {
        side: Side,
        name: String,
        level: u8,
    },

    // Menus
    ActionSelectorShown,
    MoveSelectorShown {
        moves: Vec<MoveSlotInfo>,
    },
    SelectionChanged {
        index: usize,
    },
    PartyScreenShown {
        roster: Vec<PartySlotInfo>,
        message: String,
    },
    PartyMessage(String),
    ChoiceBoxShown,

    // Turn management
    TurnStarted {
        turn: u32,
    },
    TurnEnded,
    BattleOver {
        won: bool,
    },
}

impl BattleEvent {
    /// Human-readable text for events that have one.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::Message(text) | BattleEvent::PartyMessage(text) => Some(text.clone()),
            BattleEvent::PokemonSentOut { name, level, .. } => {
                Some(format!("[{} Lv{} enters the field]", name, level))
            }
            BattleEvent::PartyScreenShown { message, .. } => Some(message.clone()),
            BattleEvent::TurnStarted { turn } => Some(format!("=== Turn {} ===", turn)),
            BattleEvent::BattleOver { won: true } => Some("[Battle won]".to_string()),
            BattleEvent::BattleOver { won: false } => Some("[Battle lost]".to_string()),
            _ => None,
        }
    }
}

/// Ordered presentation directives produced by one engine call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.events.push(BattleEvent::Message(text.into()));
    }

    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The narration stream: every `Message`, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The outcome carried by a `BattleOver` event, if one was emitted.
    pub fn battle_outcome(&self) -> Option<bool> {
        self.events.iter().find_map(|event| match event {
            BattleEvent::BattleOver { won } => Some(*won),
            _ => None,
        })
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text, skipping silent ones.
    pub fn print_formatted(&self) {
        for event in &self.events {
            if let Some(formatted) = event.format() {
                println!("  {}", formatted);
            }
        }
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// The two combatant parties and who is currently on the field.
#[derive(Debug, Clone)]
pub struct BattleState {
    pub player: Trainer,
    pub player_active: usize,
    pub enemy: Party,
    pub enemy_active: usize,
    /// Set for trainer battles; wild battles have no opposing trainer.
    pub trainer_name: Option<String>,
    pub turn_number: u32,
    pub escape_attempts: u32,
}

impl BattleState {
    pub fn is_trainer_battle(&self) -> bool {
        self.trainer_name.is_some()
    }

    pub fn party(&self, side: Side) -> &Party {
        match side {
            Side::Player => &self.player.party,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn party_mut(&mut self, side: Side) -> &mut Party {
        match side {
            Side::Player => &mut self.player.party,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn active_index(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_active,
            Side::Enemy => self.enemy_active,
        }
    }

    /// The active Pokemon on `side`.
    ///
    /// Active indices are only ever set to valid party slots.
    pub fn active(&self, side: Side) -> &PokemonInst {
        &self.party(side)[self.active_index(side)]
    }

    pub fn active_mut(&mut self, side: Side) -> &mut PokemonInst {
        let index = self.active_index(side);
        &mut self.party_mut(side)[index]
    }

    /// Both active Pokemon, `source` first.
    pub fn combatants_mut(&mut self, source: Side) -> (&mut PokemonInst, &mut PokemonInst) {
        let player = &mut self.player.party[self.player_active];
        let enemy = &mut self.enemy[self.enemy_active];
        match source {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        }
    }
}
