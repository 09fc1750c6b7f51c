//! Game events: the closed tagged union appended to every game's log.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::envido::EnvidoCall;
use super::state::PlayerId;
use super::truco::TrucoCall;

/// One externally observable state change.
///
/// Serialized with a `type` discriminator; `points` maps always carry the
/// cumulative match score per player. Adding a variant is a compile-time
/// break for every dispatch site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    Start,
    #[serde(rename_all = "camelCase")]
    NextRound {
        round: u32,
        /// Fresh deal, keyed per player. The transport must filter this map
        /// to the addressee before delivery.
        cards: HashMap<PlayerId, Vec<Card>>,
        next_player_id: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    ThrowCard {
        player_id: PlayerId,
        card: Card,
        next_player_id: PlayerId,
    },
    EnvidoCall {
        call: EnvidoCall,
        caller: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    EnvidoAccepted {
        accepted_by: PlayerId,
        points: HashMap<PlayerId, u8>,
    },
    #[serde(rename_all = "camelCase")]
    EnvidoDeclined {
        declined_by: PlayerId,
        points: HashMap<PlayerId, u8>,
    },
    TrucoCall {
        call: TrucoCall,
        caller: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    TrucoAccept {
        accepted_by: PlayerId,
        call: TrucoCall,
    },
    #[serde(rename_all = "camelCase")]
    TrucoDecline {
        declined_by: PlayerId,
        call: TrucoCall,
    },
    #[serde(rename_all = "camelCase")]
    ToDeck {
        player_id: PlayerId,
    },
    RoundResult {
        winner: PlayerId,
        points: HashMap<PlayerId, u8>,
    },
    Result {
        winner: PlayerId,
        points: HashMap<PlayerId, u8>,
    },
}

impl GameEvent {
    /// Copy of the event safe to deliver to `player`: a `NEXT_ROUND` deal is
    /// narrowed to the addressee's own hand, everything else passes as is.
    pub fn for_recipient(&self, player: PlayerId) -> GameEvent {
        match self {
            GameEvent::NextRound { round, cards, next_player_id } => {
                let own = cards
                    .get_key_value(&player)
                    .map(|(id, hand)| (*id, hand.clone()))
                    .into_iter()
                    .collect();
                GameEvent::NextRound {
                    round: *round,
                    cards: own,
                    next_player_id: *next_player_id,
                }
            }
            other => other.clone(),
        }
    }
}
