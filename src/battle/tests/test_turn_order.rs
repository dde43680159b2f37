use crate::battle::action_stack::{determine_first_actor, ActionStack, TurnStep};
use crate::battle::state::Side;
use crate::battle::tests::common::{
    message_position, predictable_rng, start_wild_battle, TestPokemonBuilder,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::faster_player("Pikachu", "Tackle", "Pidgey", "Tackle", Side::Player)]
#[case::faster_enemy("Geodude", "Tackle", "Pidgey", "Tackle", Side::Enemy)]
#[case::priority_beats_speed("Geodude", "Quick Attack", "Pidgey", "Tackle", Side::Player)]
#[case::enemy_priority("Pikachu", "Tackle", "Rattata", "Quick Attack", Side::Enemy)]
#[case::speed_tie_goes_to_player("Pidgey", "Tackle", "Pidgey", "Tackle", Side::Player)]
fn test_first_actor(
    #[case] player_species: &str,
    #[case] player_move: &str,
    #[case] enemy_species: &str,
    #[case] enemy_move: &str,
    #[case] expected: Side,
) {
    let player = TestPokemonBuilder::new(player_species, 25)
        .with_moves(&[player_move])
        .build();
    let enemy = TestPokemonBuilder::new(enemy_species, 25)
        .with_moves(&[enemy_move])
        .build();
    let battle = start_wild_battle(vec![player], enemy, predictable_rng());

    assert_eq!(
        determine_first_actor(battle.state(), Some(0), Some(0)),
        expected
    );
}

#[test]
fn test_missing_enemy_move_counts_as_priority_zero() {
    let player = TestPokemonBuilder::new("Geodude", 25)
        .with_moves(&["Tackle"])
        .build();
    let enemy = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Tackle"])
        .build();
    let battle = start_wild_battle(vec![player], enemy, predictable_rng());

    assert_eq!(determine_first_actor(battle.state(), Some(0), None), Side::Enemy);
}

#[test]
fn test_move_turn_interleaves_after_turn_ticks() {
    let player = TestPokemonBuilder::new("Pikachu", 25)
        .with_moves(&["Thunder Shock"])
        .build();
    let enemy = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Tackle"])
        .build();
    let battle = start_wild_battle(vec![player], enemy, predictable_rng());

    let stack = ActionStack::build_move_turn(battle.state(), 0, Some(0));
    let steps: Vec<TurnStep> = stack.steps().cloned().collect();

    assert_eq!(
        steps,
        vec![
            TurnStep::UseMove {
                side: Side::Player,
                party_index: 0,
                move_index: Some(0)
            },
            TurnStep::AfterTurn {
                side: Side::Player,
                party_index: 0
            },
            TurnStep::UseMove {
                side: Side::Enemy,
                party_index: 0,
                move_index: Some(0)
            },
            TurnStep::AfterTurn {
                side: Side::Enemy,
                party_index: 0
            },
        ]
    );
}

#[test]
fn test_action_turn_puts_player_action_first() {
    let player = TestPokemonBuilder::new("Geodude", 25)
        .with_moves(&["Tackle"])
        .build();
    let enemy = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Tackle"])
        .build();
    let battle = start_wild_battle(vec![player], enemy, predictable_rng());

    let stack = ActionStack::build_action_turn(battle.state(), TurnStep::Escape, Some(0));

    assert_eq!(stack.len(), 3);
    assert_eq!(stack.steps().next(), Some(&TurnStep::Escape));
}

#[test]
fn test_turn_narration_follows_speed_order() {
    let player = TestPokemonBuilder::new("Geodude", 25)
        .with_moves(&["Tackle"])
        .build();
    let enemy = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Tackle"])
        .build();
    let mut battle = start_wild_battle(vec![player], enemy, predictable_rng());

    let bus = battle.choose_move(0).unwrap();
    bus.print_debug_with_message("Events for test_turn_narration_follows_speed_order:");

    assert!(
        message_position(&bus, "Pidgey used Tackle") < message_position(&bus, "Geodude used Tackle"),
        "The faster Pidgey should act first"
    );
}
