//! Fixed game parameters and the envido point tables.

use super::envido::EnvidoCall;

pub const PLAYERS: usize = 2;
pub const HAND_SIZE: usize = 3;
pub const TRICKS_PER_ROUND: usize = 3;

/// Regulation partida target. Overridable per game via `APP_MATCH_TARGET`.
pub const DEFAULT_MATCH_TARGET: u8 = 15;

/// Value of a round with no truco call.
pub const BASE_ROUND_POINTS: u8 = 1;

/// Hard ceiling a falta envido can pay out against.
pub const FALTA_CEILING: u8 = 30;

/// Falta envido payout: the loser still short of the match target concedes
/// the rest of it; a loser at or past the target concedes the rest of the
/// full 30-point partida.
pub fn falta_envido_points(loser_points: u8, target: u8) -> u8 {
    if loser_points < target {
        target - loser_points
    } else {
        FALTA_CEILING.saturating_sub(loser_points)
    }
}

/// Points one accepted envido call contributes to the chain total.
pub fn envido_call_points(call: EnvidoCall, loser_points: u8, target: u8) -> u8 {
    match call {
        EnvidoCall::Envido => 2,
        EnvidoCall::RealEnvido => 3,
        EnvidoCall::FaltaEnvido => falta_envido_points(loser_points, target),
    }
}
