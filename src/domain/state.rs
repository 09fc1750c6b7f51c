//! The per-game state container.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::envido::EnvidoState;
use super::rules::BASE_ROUND_POINTS;
use super::truco::TrucoState;

pub type PlayerId = i64;

/// A player's answer to the rematch question.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RematchVote {
    #[default]
    Undecided,
    Wants,
    Refuses,
}

/// Full state of one match between two players.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub started: bool,
    /// Mano of the current round; leads it and wins tie-breaks. Alternates.
    pub first_player: PlayerId,
    /// Whose action is currently expected.
    pub player_turn: PlayerId,
    /// Set once the match is decided.
    pub winner: Option<PlayerId>,
    /// 1-based round counter.
    pub round: u32,
    /// Remaining hand per player.
    pub cards: HashMap<PlayerId, Vec<Card>>,
    /// Cards played face-up this round, in throw order.
    pub thrown_cards: HashMap<PlayerId, Vec<Card>>,
    /// Current value of the round (1..=4).
    pub truco_points: u8,
    /// Match score per player.
    pub points: HashMap<PlayerId, u8>,
    /// Match target; first to reach it wins.
    pub max_points: u8,
    pub envido: EnvidoState,
    pub truco: TrucoState,
    /// Post-match only.
    pub rematch: HashMap<PlayerId, RematchVote>,
}

impl GameState {
    pub fn new(creator: PlayerId, max_points: u8) -> Self {
        Self {
            started: false,
            first_player: creator,
            player_turn: creator,
            winner: None,
            round: 0,
            cards: HashMap::from([(creator, Vec::new())]),
            thrown_cards: HashMap::from([(creator, Vec::new())]),
            truco_points: BASE_ROUND_POINTS,
            points: HashMap::from([(creator, 0)]),
            max_points,
            envido: EnvidoState::default(),
            truco: TrucoState::default(),
            rematch: HashMap::from([(creator, RematchVote::Undecided)]),
        }
    }

    /// 1-based index of the current trick.
    pub fn step(&self) -> usize {
        self.thrown_cards.values().map(Vec::len).min().unwrap_or(0) + 1
    }

    pub fn thrown_count(&self, player: PlayerId) -> usize {
        self.thrown_cards.get(&player).map_or(0, Vec::len)
    }

    pub fn points_of(&self, player: PlayerId) -> u8 {
        self.points.get(&player).copied().unwrap_or(0)
    }

    /// Any call awaiting an answer blocks other actions.
    pub fn awaiting_response(&self) -> bool {
        self.envido.waiting_response || self.truco.waiting_response
    }
}
