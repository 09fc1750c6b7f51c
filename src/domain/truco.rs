//! Truco negotiation: calls, escalation, pending-response record.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

/// Truco bets in strict escalation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrucoCall {
    Truco,
    Retruco,
    ValeCuatro,
}

impl TrucoCall {
    /// Round value once this call is accepted.
    pub fn points(self) -> u8 {
        match self {
            TrucoCall::Truco => 2,
            TrucoCall::Retruco => 3,
            TrucoCall::ValeCuatro => 4,
        }
    }

    pub fn next(self) -> Option<TrucoCall> {
        match self {
            TrucoCall::Truco => Some(TrucoCall::Retruco),
            TrucoCall::Retruco => Some(TrucoCall::ValeCuatro),
            TrucoCall::ValeCuatro => None,
        }
    }
}

/// Whether `call` may extend the chain `calls`: exactly the next level,
/// each level at most once.
pub fn is_valid_truco_call(calls: &[TrucoCall], call: TrucoCall) -> bool {
    match calls.last() {
        None => call == TrucoCall::Truco,
        Some(last) => last.next() == Some(call),
    }
}

/// State of the truco sub-protocol for the current round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrucoState {
    /// Calls made this round, in order.
    pub calls: Vec<TrucoCall>,
    /// Caller of the most recent call.
    pub caller: Option<PlayerId>,
    /// Who accepted the most recent settled level, if any.
    pub accepted_by: Option<PlayerId>,
    /// True iff the last call has no answer yet.
    pub waiting_response: bool,
    /// Turn that was interrupted by the opening call of the pending chain;
    /// restored when the chain is accepted.
    pub interrupted_turn: Option<PlayerId>,
}

impl TrucoState {
    pub fn pending_call(&self) -> Option<TrucoCall> {
        if self.waiting_response {
            self.calls.last().copied()
        } else {
            None
        }
    }
}
