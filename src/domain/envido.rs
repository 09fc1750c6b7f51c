//! Envido negotiation: calls, escalation chain, resolution record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

/// Envido bets in escalation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvidoCall {
    Envido,
    RealEnvido,
    FaltaEnvido,
}

/// Whether `call` may extend the chain `calls`.
///
/// From an empty chain anything goes. ENVIDO may be repeated once; the
/// others appear at most once; the chain never de-escalates.
pub fn is_valid_envido_call(calls: &[EnvidoCall], call: EnvidoCall) -> bool {
    match calls.last() {
        None => true,
        Some(EnvidoCall::FaltaEnvido) => false,
        Some(EnvidoCall::RealEnvido) => call == EnvidoCall::FaltaEnvido,
        Some(EnvidoCall::Envido) => match call {
            EnvidoCall::Envido => calls.iter().filter(|c| **c == EnvidoCall::Envido).count() < 2,
            EnvidoCall::RealEnvido | EnvidoCall::FaltaEnvido => true,
        },
    }
}

/// State of the envido sub-protocol for the current round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvidoState {
    /// Calls made this round, in order.
    pub calls: Vec<EnvidoCall>,
    /// Who opened envido this round.
    pub first_caller: Option<PlayerId>,
    /// Most recent caller; wins outright if the chain is declined.
    pub last_caller: Option<PlayerId>,
    /// Who closed the chain with quiero / no quiero.
    pub answered_by: Option<PlayerId>,
    pub accepted: bool,
    /// Winner once resolved.
    pub winner: Option<PlayerId>,
    /// Points awarded per player once resolved.
    pub players_points: Option<HashMap<PlayerId, u8>>,
    /// True iff the last action was a call with no answer yet.
    pub waiting_response: bool,
}

impl EnvidoState {
    pub fn is_resolved(&self) -> bool {
        self.answered_by.is_some()
    }
}
