use super::test_support::{game_with_hands, rng, P1, P2};
use super::truco::TrucoCall::{Retruco, Truco, ValeCuatro};
use super::{DomainError, GameEvent};

#[test]
fn accepted_truco_raises_the_round_value_and_restores_the_turn() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_truco(P1, Truco).unwrap();
    assert!(game.state.truco.waiting_response);
    assert_eq!(game.state.player_turn, P2);
    assert_eq!(game.state.truco_points, 1);

    let game = game.answer_truco(&mut rng(), P2, true).unwrap();
    assert_eq!(game.state.truco_points, 2);
    assert!(!game.state.truco.waiting_response);
    // P1 was about to play before calling; the turn comes back.
    assert_eq!(game.state.player_turn, P1);
    assert!(matches!(
        game.events.last(),
        Some(GameEvent::TrucoAccept { accepted_by, call }) if *accepted_by == P2 && *call == Truco
    ));
}

#[test]
fn counter_raised_truco_declined_forfeits_at_the_accepted_value() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let start = game.events.len();

    let game = game.call_truco(P1, Truco).unwrap();
    // P2 answers the pending call by raising; the truco value locks in.
    let game = game.call_truco(P2, Retruco).unwrap();
    assert_eq!(game.state.truco_points, 2);
    assert!(game.state.truco.waiting_response);
    assert_eq!(game.state.player_turn, P1);

    let game = game.answer_truco(&mut rng(), P1, false).unwrap();
    assert_eq!(game.state.points_of(P2), 2);
    assert_eq!(game.state.points_of(P1), 0);

    let tail = game.events_since(start);
    assert_eq!(tail[0], GameEvent::TrucoCall { call: Truco, caller: P1 });
    assert_eq!(tail[1], GameEvent::TrucoCall { call: Retruco, caller: P2 });
    assert!(matches!(
        tail[2],
        GameEvent::TrucoDecline { declined_by, call } if declined_by == P1 && call == Retruco
    ));
    assert!(matches!(tail[3], GameEvent::RoundResult { winner, .. } if winner == P2));
    assert!(matches!(tail[4], GameEvent::NextRound { round: 2, .. }));
}

#[test]
fn declined_opening_truco_forfeits_a_single_point() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_truco(P1, Truco).unwrap();
    let game = game.answer_truco(&mut rng(), P2, false).unwrap();
    assert_eq!(game.state.points_of(P1), 1);
    assert_eq!(game.state.round, 2);
}

#[test]
fn only_the_opponent_of_the_accepted_caller_may_raise() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_truco(P1, Truco).unwrap();
    let game = game.answer_truco(&mut rng(), P2, true).unwrap();

    // P1 owns the accepted call and may not raise it.
    assert_eq!(game.call_truco(P1, Retruco).unwrap_err(), DomainError::InvalidTrucoCall);

    // P2 may, once the turn reaches them.
    let game = game
        .throw_card(&mut rng(), P1, "1E".parse().unwrap())
        .unwrap();
    let game = game.call_truco(P2, Retruco).unwrap();
    assert!(game.state.truco.waiting_response);
    let game = game.answer_truco(&mut rng(), P1, true).unwrap();
    assert_eq!(game.state.truco_points, 3);
    // P2 was about to respond to the thrown card; the turn returns there.
    assert_eq!(game.state.player_turn, P2);
}

#[test]
fn escalation_must_not_skip_levels() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    assert_eq!(game.call_truco(P1, Retruco).unwrap_err(), DomainError::InvalidTrucoCall);
    assert_eq!(game.call_truco(P1, ValeCuatro).unwrap_err(), DomainError::InvalidTrucoCall);

    let game = game.call_truco(P1, Truco).unwrap();
    // The responder cannot jump straight to vale cuatro either.
    assert_eq!(game.call_truco(P2, ValeCuatro).unwrap_err(), DomainError::InvalidTrucoCall);
}

#[test]
fn vale_cuatro_is_the_ceiling() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game
        .call_truco(P1, Truco)
        .unwrap()
        .call_truco(P2, Retruco)
        .unwrap()
        .call_truco(P1, ValeCuatro)
        .unwrap();
    assert_eq!(game.state.truco_points, 3);
    let game = game.answer_truco(&mut rng(), P2, true).unwrap();
    assert_eq!(game.state.truco_points, 4);
    // P1 holds the turn again and has nothing left to raise.
    assert_eq!(game.call_truco(P1, ValeCuatro).unwrap_err(), DomainError::InvalidTrucoCall);
}

#[test]
fn answer_without_a_pending_call_is_rejected() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    assert_eq!(
        game.answer_truco(&mut rng(), P1, true).unwrap_err(),
        DomainError::NotWaitingResponse
    );
}

#[test]
fn pending_truco_blocks_throws_and_envido() {
    let game = game_with_hands(&["1E", "2E", "3E"], &["4C", "5C", "6C"]);
    let game = game.call_truco(P1, Truco).unwrap();
    assert_eq!(
        game.throw_card(&mut rng(), P2, "4C".parse().unwrap()).unwrap_err(),
        DomainError::WaitingResponse
    );
    assert_eq!(
        game.call_envido(P2, super::envido::EnvidoCall::Envido).unwrap_err(),
        DomainError::WaitingResponse
    );
    assert_eq!(game.go_to_deck(&mut rng(), P2).unwrap_err(), DomainError::WaitingResponse);
}
