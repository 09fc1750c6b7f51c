//! Property tests over random legal action sequences.

use proptest::prelude::*;

use super::cards_logic::{envido_value, truco_rank};
use super::dealing::full_deck;
use super::test_prelude;
use super::test_support::{drive_random, replay_hands, replay_points};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn random_matches_preserve_invariants(seed in any::<u64>()) {
        let states = drive_random(seed, 400);
        for game in &states {
            for player in &game.players {
                let held = game.state.cards.get(&player.id).map_or(0, Vec::len);
                let thrown = game.state.thrown_count(player.id);
                prop_assert_eq!(held + thrown, 3, "hand plus thrown must stay at 3");
            }
            prop_assert!((1..=3).contains(&game.state.step()));
            prop_assert!(
                !(game.state.envido.waiting_response && game.state.truco.waiting_response),
                "both sub-protocols pending at once"
            );
            let turn = game.state.player_turn;
            prop_assert!(game.is_player(turn));
            for id in game.player_ids() {
                prop_assert!(game.state.points_of(id) <= 30);
            }
        }
    }

    #[test]
    fn event_log_is_append_only(seed in any::<u64>()) {
        let states = drive_random(seed, 400);
        for pair in states.windows(2) {
            prop_assert!(pair[1].events.len() > pair[0].events.len());
            prop_assert_eq!(
                &pair[1].events[..pair[0].events.len()],
                pair[0].events.as_slice()
            );
        }
    }

    #[test]
    fn points_stop_moving_once_the_match_is_decided(seed in any::<u64>()) {
        let states = drive_random(seed, 400);
        let mut decided: Option<&super::game::Game> = None;
        for game in &states {
            if let Some(reference) = decided {
                prop_assert_eq!(&game.state.points, &reference.state.points);
                prop_assert_eq!(game.state.winner, reference.state.winner);
            } else if game.state.winner.is_some() {
                decided = Some(game);
            }
        }
    }

    #[test]
    fn replaying_the_log_reproduces_scores_and_hands(seed in any::<u64>()) {
        let states = drive_random(seed, 400);
        let last = states.last().expect("at least the started game");

        let (points, winner) = replay_points(&last.events);
        for id in last.player_ids() {
            prop_assert_eq!(
                points.get(&id).copied().unwrap_or(0),
                last.state.points_of(id)
            );
        }
        prop_assert_eq!(winner, last.state.winner);

        let hands = replay_hands(&last.events);
        for id in last.player_ids() {
            let mut derived = hands.get(&id).cloned().unwrap_or_default();
            let mut live = last.state.cards.get(&id).cloned().unwrap_or_default();
            derived.sort();
            live.sort();
            prop_assert_eq!(derived, live);
        }
    }

    #[test]
    fn envido_value_is_order_invariant(
        cards in prop::sample::subsequence(full_deck(), 1..=6),
        rotation in 0usize..6,
    ) {
        let mut permuted = cards.clone();
        permuted.rotate_left(rotation % cards.len());
        permuted.reverse();
        prop_assert_eq!(envido_value(&cards), envido_value(&permuted));
    }

    #[test]
    fn truco_rank_is_a_total_order(a in test_prelude::card(), b in test_prelude::card()) {
        let (ra, rb) = (truco_rank(a), truco_rank(b));
        prop_assert!((1..=14).contains(&ra));
        prop_assert!((1..=14).contains(&rb));
        if a == b {
            prop_assert_eq!(ra, rb);
        }
    }
}
