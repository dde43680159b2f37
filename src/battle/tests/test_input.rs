use crate::battle::runner::BattleInput;
use crate::battle::state::{BattleEvent, BattlePhase};
use crate::battle::tests::common::{has_message, predictable_rng, start_wild_battle, TestPokemonBuilder};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn battle_with_four_moves() -> crate::battle::runner::BattleSystem {
    let player = TestPokemonBuilder::new("Pikachu", 25)
        .with_moves(&["Thunder Shock", "Growl", "Tail Whip", "Quick Attack"])
        .build();
    let wild = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Growl"])
        .build();
    start_wild_battle(vec![player], wild, predictable_rng())
}

#[rstest]
#[case::right(vec![BattleInput::Right], 1)]
#[case::down(vec![BattleInput::Down], 2)]
#[case::down_right(vec![BattleInput::Down, BattleInput::Right], 3)]
#[case::clamped_right(vec![BattleInput::Right, BattleInput::Right, BattleInput::Right, BattleInput::Right], 3)]
#[case::clamped_up(vec![BattleInput::Up, BattleInput::Left], 0)]
#[case::back_up(vec![BattleInput::Down, BattleInput::Right, BattleInput::Up], 1)]
fn test_action_cursor_moves_on_a_grid(#[case] inputs: Vec<BattleInput>, #[case] expected: usize) {
    let mut battle = battle_with_four_moves();
    for input in inputs {
        battle.handle_input(input);
    }
    assert_eq!(battle.cursor(), expected);
}

#[test]
fn test_cursor_at_edge_emits_nothing() {
    let mut battle = battle_with_four_moves();

    assert!(battle.handle_input(BattleInput::Left).is_empty());
    assert_eq!(
        battle.handle_input(BattleInput::Right).events(),
        &[BattleEvent::SelectionChanged { index: 1 }]
    );
}

#[test]
fn test_fight_menu_selects_and_cancels() {
    let mut battle = battle_with_four_moves();

    let bus = battle.handle_input(BattleInput::Confirm);
    assert_eq!(battle.phase(), BattlePhase::MoveSelection);
    assert!(matches!(
        bus.events().first(),
        Some(BattleEvent::MoveSelectorShown { moves }) if moves.len() == 4
    ));

    battle.handle_input(BattleInput::Cancel);
    assert_eq!(battle.phase(), BattlePhase::ActionSelection);

    battle.handle_input(BattleInput::Confirm);
    battle.handle_input(BattleInput::Right);
    let bus = battle.handle_input(BattleInput::Confirm);

    assert!(has_message(&bus, "Pikachu used Growl"));
    assert_eq!(battle.turn_number(), 1);
    assert_eq!(battle.phase(), BattlePhase::ActionSelection);
}

#[test]
fn test_move_without_pp_ignores_confirm() {
    let mut battle = battle_with_four_moves();
    battle.handle_input(BattleInput::Confirm);
    battle.handle_input(BattleInput::Confirm);
    assert_eq!(battle.turn_number(), 1);

    let mut player = battle.into_player();
    player.party[0].moves_mut()[0].set_pp(0);
    let wild = TestPokemonBuilder::new("Pidgey", 25)
        .with_moves(&["Growl"])
        .build();
    let mut battle = start_wild_battle(player.party.into_pokemon(), wild, predictable_rng());

    battle.handle_input(BattleInput::Confirm);
    let bus = battle.handle_input(BattleInput::Confirm);

    assert!(bus.is_empty());
    assert_eq!(battle.phase(), BattlePhase::MoveSelection);
    assert_eq!(battle.turn_number(), 0);
}

#[test]
fn test_menu_entries_dispatch_by_cursor() {
    // Bag
    let mut battle = battle_with_four_moves();
    battle.handle_input(BattleInput::Right);
    let bus = battle.handle_input(BattleInput::Confirm);
    assert!(has_message(&bus, "Red used POKEBALL!"));

    // Pokemon
    let mut battle = battle_with_four_moves();
    battle.handle_input(BattleInput::Down);
    battle.handle_input(BattleInput::Confirm);
    assert_eq!(battle.phase(), BattlePhase::PokemonSelection);

    // Run
    let mut battle = battle_with_four_moves();
    battle.handle_input(BattleInput::Down);
    battle.handle_input(BattleInput::Right);
    let bus = battle.handle_input(BattleInput::Confirm);
    assert!(has_message(&bus, "Ran away safely!"));
    assert!(battle.is_over());
}
