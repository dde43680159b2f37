use std::collections::VecDeque;

use crate::battle::state::{BattleState, Side};
use tracing::debug;

/// One resumable unit of work within a turn.
///
/// Steps that belong to a specific Pokemon remember its party slot; if that
/// Pokemon has been replaced or has fainted by the time the step runs, the step
/// is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStep {
    /// `move_index` is `None` when the Pokemon has no move with PP left.
    UseMove {
        side: Side,
        party_index: usize,
        move_index: Option<usize>,
    },
    AfterTurn {
        side: Side,
        party_index: usize,
    },
    /// Voluntary player switch to the given party slot.
    SwitchPokemon {
        party_index: usize,
    },
    ThrowPokeball,
    Escape,
    /// The trainer's active Pokemon fainted; offer the swap prompt and send out
    /// the next one.
    TrainerReplacement,
}

/// Ordered queue of the steps still to run this turn.
#[derive(Debug, Clone, Default)]
pub struct ActionStack {
    steps: VecDeque<TurnStep>,
}

impl ActionStack {
    /// Creates a new, empty ActionStack.
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }

    /// A turn where both sides use a move: each actor's move followed by its own
    /// after-turn tick, in turn order.
    pub fn build_move_turn(
        battle_state: &BattleState,
        player_move: usize,
        enemy_move: Option<usize>,
    ) -> Self {
        let moves = [
            (Side::Player, Some(player_move)),
            (Side::Enemy, enemy_move),
        ];
        let first = determine_first_actor(battle_state, Some(player_move), enemy_move);
        let order = [first, first.opponent()];

        let mut stack = Self::new();
        for side in order {
            let move_index = moves
                .iter()
                .find(|(owner, _)| *owner == side)
                .and_then(|(_, index)| *index);
            let party_index = battle_state.active_index(side);
            stack.push_back(TurnStep::UseMove {
                side,
                party_index,
                move_index,
            });
            stack.push_back(TurnStep::AfterTurn { side, party_index });
        }
        stack
    }

    /// A turn where the player switches, throws a ball or runs. The player's
    /// action always comes first; the enemy then takes its turn.
    pub fn build_action_turn(
        battle_state: &BattleState,
        player_action: TurnStep,
        enemy_move: Option<usize>,
    ) -> Self {
        let party_index = battle_state.active_index(Side::Enemy);
        let mut stack = Self::new();
        stack.push_back(player_action);
        stack.push_back(TurnStep::UseMove {
            side: Side::Enemy,
            party_index,
            move_index: enemy_move,
        });
        stack.push_back(TurnStep::AfterTurn {
            side: Side::Enemy,
            party_index,
        });
        stack
    }

    pub fn push_back(&mut self, step: TurnStep) {
        self.steps.push_back(step);
    }

    pub fn push_front(&mut self, step: TurnStep) {
        self.steps.push_front(step);
    }

    pub fn pop_front(&mut self) -> Option<TurnStep> {
        self.steps.pop_front()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> impl Iterator<Item = &TurnStep> {
        self.steps.iter()
    }
}

/// Decide who moves first: higher move priority, then higher effective speed.
/// An exact speed tie goes to the player.
pub fn determine_first_actor(
    battle_state: &BattleState,
    player_move: Option<usize>,
    enemy_move: Option<usize>,
) -> Side {
    let priority = |side: Side, move_index: Option<usize>| -> i8 {
        move_index
            .and_then(|index| battle_state.active(side).moves().get(index))
            .map_or(0, |move_instance| move_instance.data().priority)
    };
    let player_priority = priority(Side::Player, player_move);
    let enemy_priority = priority(Side::Enemy, enemy_move);

    let first = if player_priority != enemy_priority {
        if player_priority > enemy_priority {
            Side::Player
        } else {
            Side::Enemy
        }
    } else {
        let player_speed = battle_state.active(Side::Player).speed();
        let enemy_speed = battle_state.active(Side::Enemy).speed();
        if player_speed >= enemy_speed {
            Side::Player
        } else {
            Side::Enemy
        }
    };

    debug!(
        player_priority,
        enemy_priority,
        first = ?first,
        "turn order decided"
    );
    first
}
