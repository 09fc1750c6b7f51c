use std::collections::HashMap;

use super::envido::EnvidoCall::{Envido, FaltaEnvido, RealEnvido};
use super::test_support::{game_with_hands, P1, P2};
use super::{DomainError, GameEvent};

#[test]
fn declined_envido_scores_one_point_per_call() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let start = game.events.len();

    let game = game.call_envido(P1, Envido).unwrap();
    assert!(game.state.envido.waiting_response);
    assert_eq!(game.state.player_turn, P2);

    let game = game.answer_envido(P2, false).unwrap();
    assert_eq!(game.state.points_of(P1), 1);
    assert_eq!(game.state.points_of(P2), 0);
    assert_eq!(game.state.player_turn, P1);
    assert!(!game.state.envido.waiting_response);
    assert_eq!(
        game.events_since(start),
        &[
            GameEvent::EnvidoCall { call: Envido, caller: P1 },
            GameEvent::EnvidoDeclined {
                declined_by: P2,
                points: HashMap::from([(P1, 1), (P2, 0)]),
            },
        ]
    );
}

#[test]
fn declined_chain_concedes_every_call() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game
        .call_envido(P1, Envido)
        .unwrap()
        .call_envido(P2, Envido)
        .unwrap()
        .call_envido(P1, RealEnvido)
        .unwrap();
    let game = game.answer_envido(P2, false).unwrap();
    assert_eq!(game.state.points_of(P1), 3);
    assert_eq!(game.state.envido.winner, Some(P1));
}

#[test]
fn accepted_chain_awards_the_sum_of_calls() {
    // P1 (mano) holds 27, P2 holds 29; chain worth 2 + 2 + 3.
    let game = game_with_hands(&["7E", "12E", "4C"], &["5B", "4B", "1O"]);
    let game = game
        .call_envido(P1, Envido)
        .unwrap()
        .call_envido(P2, Envido)
        .unwrap()
        .call_envido(P1, RealEnvido)
        .unwrap();
    let game = game.answer_envido(P2, true).unwrap();
    assert_eq!(game.state.points_of(P2), 7);
    assert_eq!(game.state.points_of(P1), 0);
    assert_eq!(game.state.envido.winner, Some(P2));
    assert_eq!(
        game.state.envido.players_points,
        Some(HashMap::from([(P2, 7), (P1, 0)]))
    );
    // Turn returns to whoever opened the chain.
    assert_eq!(game.state.player_turn, P1);
}

#[test]
fn tie_goes_to_the_mano() {
    // Both hold 33.
    let game = game_with_hands(&["7E", "6E", "12B"], &["7O", "6O", "12C"]);
    let game = game.call_envido(P1, Envido).unwrap();
    let game = game.answer_envido(P2, true).unwrap();
    assert_eq!(game.state.envido.winner, Some(P1));
    assert_eq!(game.state.points_of(P1), 2);
}

#[test]
fn envido_resolution_counts_thrown_cards_too() {
    // Resolution scores the six-card universe, held and thrown alike.
    let mut game = game_with_hands(&["6E", "4C"], &["5B", "4B", "12O"]);
    game.state.thrown_cards.get_mut(&P1).unwrap().push("7E".parse().unwrap());
    game.state.envido.calls.push(Envido);
    game.state.envido.first_caller = Some(P1);
    game.state.envido.last_caller = Some(P1);
    game.state.envido.waiting_response = true;
    game.state.player_turn = P2;

    let game = game.answer_envido(P2, true).unwrap();
    // 7E + 6E = 33 beats 29 even with the seven already on the table.
    assert_eq!(game.state.envido.winner, Some(P1));
    assert_eq!(game.state.points_of(P1), 2);
}

#[test]
fn falta_envido_awards_the_remainder_of_the_match() {
    // 14-10 before the call; winner of the envido takes what the loser is
    // still missing from the target.
    let mut game = game_with_hands(&["7E", "12E", "4C"], &["5B", "4B", "1O"]);
    game.state.points = HashMap::from([(P1, 14), (P2, 10)]);

    let game = game.call_envido(P1, FaltaEnvido).unwrap();
    let game = game.answer_envido(P2, true).unwrap();
    // P2 wins; loser P1 sits at 14, one short of 15.
    assert_eq!(game.state.points_of(P2), 11);
    assert!(game.state.winner.is_none());
}

#[test]
fn falta_envido_can_end_the_match() {
    let mut game = game_with_hands(&["5B", "4B", "1O"], &["7E", "12E", "4C"]);
    game.state.points = HashMap::from([(P1, 14), (P2, 10)]);

    let game = game.call_envido(P1, FaltaEnvido).unwrap();
    let game = game.answer_envido(P2, true).unwrap();
    // P1 wins 15 - 10 = 5 points and passes the target.
    assert_eq!(game.state.points_of(P1), 19);
    assert_eq!(game.state.winner, Some(P1));
    assert!(matches!(
        game.events.last(),
        Some(GameEvent::Result { winner, .. }) if *winner == P1
    ));
}

#[test]
fn envido_requires_the_first_step_with_no_thrown_cards() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game
        .throw_card(&mut super::test_support::rng(), P1, "1E".parse().unwrap())
        .unwrap();
    // P2 may not open envido once a card is on the table.
    assert_eq!(
        game.call_envido(P2, Envido).unwrap_err(),
        DomainError::InvalidStep
    );
}

#[test]
fn escalation_chain_is_enforced() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_envido(P1, RealEnvido).unwrap();
    assert_eq!(
        game.call_envido(P2, Envido).unwrap_err(),
        DomainError::InvalidEnvidoCall
    );
    assert_eq!(
        game.call_envido(P2, RealEnvido).unwrap_err(),
        DomainError::InvalidEnvidoCall
    );
    assert!(game.call_envido(P2, FaltaEnvido).is_ok());
}

#[test]
fn resolved_envido_cannot_be_reopened() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_envido(P1, Envido).unwrap();
    let game = game.answer_envido(P2, false).unwrap();
    assert_eq!(
        game.call_envido(P1, RealEnvido).unwrap_err(),
        DomainError::InvalidEnvidoCall
    );
}

#[test]
fn pending_envido_blocks_other_actions() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_envido(P1, Envido).unwrap();
    assert_eq!(
        game.throw_card(&mut super::test_support::rng(), P2, "4C".parse().unwrap())
            .unwrap_err(),
        DomainError::WaitingResponse
    );
    assert_eq!(
        game.call_truco(P2, super::truco::TrucoCall::Truco).unwrap_err(),
        DomainError::WaitingResponse
    );
    // And the caller cannot act while waiting either: it is not their turn.
    assert_eq!(
        game.answer_envido(P1, true).unwrap_err(),
        DomainError::NotYourTurn
    );
}

#[test]
fn answer_without_a_pending_call_is_rejected() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    assert_eq!(
        game.answer_envido(P1, true).unwrap_err(),
        DomainError::NotWaitingResponse
    );
}
