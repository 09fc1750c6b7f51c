//! The Game aggregate: immutable container plus the transition methods.
//!
//! Every transition borrows the current game, validates, and returns a new
//! `Game` with at least one event appended; on failure the original is
//! untouched. The only non-determinism is the injected RNG used whenever a
//! transition deals a fresh round.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards_logic::envido_value;
use super::cards_types::Card;
use super::dealing::deal_hands;
use super::envido::{is_valid_envido_call, EnvidoCall, EnvidoState};
use super::errors::DomainError;
use super::events::GameEvent;
use super::rules::{envido_call_points, BASE_ROUND_POINTS, PLAYERS};
use super::state::{GameState, PlayerId, RematchVote};
use super::tricks::{round_winner, trick_outcome, TrickOutcome};
use super::truco::{is_valid_truco_call, TrucoCall, TrucoState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One match between two players, with its append-only event log.
///
/// `id == 0` means "not yet persisted"; the repository assigns a real id.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    /// Display name, taken from the creator.
    pub name: String,
    pub players: Vec<Player>,
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Game {
    pub fn new(creator: Player, max_points: u8) -> Game {
        let state = GameState::new(creator.id, max_points);
        Game {
            id: 0,
            name: creator.name.clone(),
            players: vec![creator],
            state,
            events: Vec::new(),
        }
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn is_player(&self, user_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == user_id)
    }

    /// Event-log tail appended after the first `n` events.
    pub fn events_since(&self, n: usize) -> &[GameEvent] {
        &self.events[n.min(self.events.len())..]
    }

    // ---- joining and starting ------------------------------------------

    pub fn can_join(&self, user_id: PlayerId) -> bool {
        !self.state.started && self.players.len() == 1 && self.players[0].id != user_id
    }

    /// Add the second player. Emits no event: the lobby observes joins
    /// through the repository.
    pub fn join(&self, user: Player) -> Result<Game, DomainError> {
        if self.state.started {
            return Err(DomainError::GameAlreadyStarted);
        }
        if self.is_player(user.id) {
            return Err(DomainError::AlreadyJoined);
        }
        if self.players.len() >= PLAYERS {
            return Err(DomainError::GameFull);
        }
        let mut next = self.clone();
        next.state.cards.insert(user.id, Vec::new());
        next.state.thrown_cards.insert(user.id, Vec::new());
        next.state.points.insert(user.id, 0);
        next.state.rematch.insert(user.id, RematchVote::Undecided);
        next.players.push(user);
        Ok(next)
    }

    /// Deal the first round. The creator is mano of round 1.
    pub fn start<R: Rng>(&self, rng: &mut R) -> Result<Game, DomainError> {
        if self.state.started {
            return Err(DomainError::GameAlreadyStarted);
        }
        if self.players.len() != PLAYERS {
            return Err(DomainError::GameNotStarted);
        }
        let mut next = self.clone();
        let (a, b) = next.player_pair()?;
        let mano = a;
        next.state.started = true;
        next.state.round = 1;
        next.state.first_player = mano;
        next.state.player_turn = mano;
        next.state.points = HashMap::from([(a, 0), (b, 0)]);
        let (hand_a, hand_b) = deal_hands(rng);
        let deal = HashMap::from([(a, hand_a), (b, hand_b)]);
        next.state.cards = deal.clone();
        next.state.thrown_cards = HashMap::from([(a, Vec::new()), (b, Vec::new())]);
        next.events.push(GameEvent::Start);
        next.events.push(GameEvent::NextRound {
            round: 1,
            cards: deal,
            next_player_id: mano,
        });
        Ok(next)
    }

    // ---- trick play ----------------------------------------------------

    /// Throw a card from the hand, advance the turn, and resolve the round
    /// if the tricks decide it.
    pub fn throw_card<R: Rng>(
        &self,
        rng: &mut R,
        user_id: PlayerId,
        card: Card,
    ) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        self.ensure_no_pending_response()?;
        let mut next = self.clone();
        let hand = next.state.cards.entry(user_id).or_default();
        let pos = hand
            .iter()
            .position(|c| *c == card)
            .ok_or(DomainError::InvalidCard)?;
        let thrown = hand.remove(pos);
        next.state.thrown_cards.entry(user_id).or_default().push(thrown);
        next.advance_turn_after_throw(user_id)?;
        next.events.push(GameEvent::ThrowCard {
            player_id: user_id,
            card,
            next_player_id: next.state.player_turn,
        });
        next.resolve_round(rng)
    }

    /// Abandon the round: the opponent takes it at its current value.
    pub fn go_to_deck<R: Rng>(&self, rng: &mut R, user_id: PlayerId) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        self.ensure_no_pending_response()?;
        let mut next = self.clone();
        let opponent = next.opponent_of(user_id)?;
        next.events.push(GameEvent::ToDeck { player_id: user_id });
        next.award_round(rng, opponent)
    }

    // ---- envido --------------------------------------------------------

    /// Open or escalate the envido chain. Only available while nobody has
    /// thrown a card this round.
    pub fn call_envido(&self, user_id: PlayerId, call: EnvidoCall) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        self.ensure_no_pending_response()?;
        if self.state.thrown_cards.values().any(|thrown| !thrown.is_empty()) {
            return Err(DomainError::InvalidStep);
        }
        if self.state.envido.is_resolved()
            || !is_valid_envido_call(&self.state.envido.calls, call)
        {
            return Err(DomainError::InvalidEnvidoCall);
        }
        let mut next = self.clone();
        let opponent = next.opponent_of(user_id)?;
        let envido = &mut next.state.envido;
        envido.calls.push(call);
        envido.first_caller.get_or_insert(user_id);
        envido.last_caller = Some(user_id);
        envido.waiting_response = true;
        next.state.player_turn = opponent;
        next.events.push(GameEvent::EnvidoCall { call, caller: user_id });
        Ok(next)
    }

    /// Answer the pending envido chain; resolves it, awards points, and
    /// returns the turn to the opening caller.
    pub fn answer_envido(&self, user_id: PlayerId, accepted: bool) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        if !self.state.envido.waiting_response {
            return Err(DomainError::NotWaitingResponse);
        }
        let mut next = self.clone();
        let last_caller = next
            .state
            .envido
            .last_caller
            .ok_or(DomainError::NotWaitingResponse)?;
        let first_caller = next.state.envido.first_caller.unwrap_or(last_caller);

        let (winner, awarded) = if accepted {
            let (a, b) = next.player_pair()?;
            let value_a = envido_value(&next.envido_cards(a));
            let value_b = envido_value(&next.envido_cards(b));
            let winner = match value_a.cmp(&value_b) {
                std::cmp::Ordering::Greater => a,
                std::cmp::Ordering::Less => b,
                std::cmp::Ordering::Equal => next.state.first_player,
            };
            let loser = if winner == a { b } else { a };
            let loser_points = next.state.points_of(loser);
            let awarded = next
                .state
                .envido
                .calls
                .iter()
                .map(|call| envido_call_points(*call, loser_points, next.state.max_points))
                .sum();
            (winner, awarded)
        } else {
            // Declining concedes one point per call on the chain.
            (last_caller, next.state.envido.calls.len() as u8)
        };
        let loser = next.opponent_of(winner)?;

        *next.state.points.entry(winner).or_insert(0) += awarded;
        let envido = &mut next.state.envido;
        envido.waiting_response = false;
        envido.answered_by = Some(user_id);
        envido.accepted = accepted;
        envido.winner = Some(winner);
        envido.players_points = Some(HashMap::from([(winner, awarded), (loser, 0)]));
        next.state.player_turn = first_caller;

        let points = next.state.points.clone();
        next.events.push(if accepted {
            GameEvent::EnvidoAccepted { accepted_by: user_id, points }
        } else {
            GameEvent::EnvidoDeclined { declined_by: user_id, points }
        });

        if let Some(champion) = next.match_winner() {
            next.state.winner = Some(champion);
            next.events.push(GameEvent::Result {
                winner: champion,
                points: next.state.points.clone(),
            });
        }
        Ok(next)
    }

    // ---- truco ---------------------------------------------------------

    /// Call or escalate truco. While a call is pending, the responder may
    /// counter-raise instead of accepting; that locks in the pending value.
    pub fn call_truco(&self, user_id: PlayerId, call: TrucoCall) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        if self.state.envido.waiting_response {
            return Err(DomainError::WaitingResponse);
        }
        let mut next = self.clone();
        let opponent = next.opponent_of(user_id)?;
        if let Some(pending) = next.state.truco.pending_call() {
            if pending.next() != Some(call) {
                return Err(DomainError::InvalidTrucoCall);
            }
            next.state.truco_points = pending.points();
            let truco = &mut next.state.truco;
            truco.calls.push(call);
            truco.caller = Some(user_id);
            truco.accepted_by = Some(user_id);
        } else {
            if !is_valid_truco_call(&next.state.truco.calls, call) {
                return Err(DomainError::InvalidTrucoCall);
            }
            // Once a level is accepted only the caller's opponent may raise.
            if next.state.truco.caller == Some(user_id) {
                return Err(DomainError::InvalidTrucoCall);
            }
            let truco = &mut next.state.truco;
            truco.calls.push(call);
            truco.caller = Some(user_id);
            truco.waiting_response = true;
            truco.interrupted_turn = Some(user_id);
        }
        next.state.player_turn = opponent;
        next.events.push(GameEvent::TrucoCall { call, caller: user_id });
        Ok(next)
    }

    /// Accept the pending truco call, or decline and forfeit the round at
    /// its last accepted value.
    pub fn answer_truco<R: Rng>(
        &self,
        rng: &mut R,
        user_id: PlayerId,
        accepted: bool,
    ) -> Result<Game, DomainError> {
        self.ensure_active()?;
        self.ensure_turn(user_id)?;
        let Some(pending) = self.state.truco.pending_call() else {
            return Err(DomainError::NotWaitingResponse);
        };
        let mut next = self.clone();
        if accepted {
            next.state.truco_points = pending.points();
            let resumed = next.state.truco.interrupted_turn.take();
            let truco = &mut next.state.truco;
            truco.waiting_response = false;
            truco.accepted_by = Some(user_id);
            if let Some(turn) = resumed {
                next.state.player_turn = turn;
            }
            next.events.push(GameEvent::TrucoAccept { accepted_by: user_id, call: pending });
            Ok(next)
        } else {
            let caller = next
                .state
                .truco
                .caller
                .ok_or(DomainError::NotWaitingResponse)?;
            next.state.truco.waiting_response = false;
            next.events.push(GameEvent::TrucoDecline { declined_by: user_id, call: pending });
            next.award_round(rng, caller)
        }
    }

    // ---- rematch -------------------------------------------------------

    pub fn play_again(&self, user_id: PlayerId) -> Result<Game, DomainError> {
        self.rematch_vote(user_id, RematchVote::Wants)
    }

    pub fn no_play_again(&self, user_id: PlayerId) -> Result<Game, DomainError> {
        self.rematch_vote(user_id, RematchVote::Refuses)
    }

    fn rematch_vote(&self, user_id: PlayerId, vote: RematchVote) -> Result<Game, DomainError> {
        if !self.state.started {
            return Err(DomainError::GameNotStarted);
        }
        if self.state.winner.is_none() {
            return Err(DomainError::GameNotFinished);
        }
        if !self.is_player(user_id) {
            return Err(DomainError::NotYourTurn);
        }
        let mut next = self.clone();
        next.state.rematch.insert(user_id, vote);
        Ok(next)
    }

    pub fn rematch_agreed(&self) -> bool {
        self.players
            .iter()
            .all(|p| self.state.rematch.get(&p.id) == Some(&RematchVote::Wants))
    }

    /// Both players have answered the rematch question.
    pub fn rematch_settled(&self) -> bool {
        self.players
            .iter()
            .all(|p| self.state.rematch.get(&p.id).is_some_and(|v| *v != RematchVote::Undecided))
    }

    // ---- shared checks and round plumbing ------------------------------

    fn ensure_active(&self) -> Result<(), DomainError> {
        if !self.state.started {
            return Err(DomainError::GameNotStarted);
        }
        if self.state.winner.is_some() {
            return Err(DomainError::GameFinished);
        }
        Ok(())
    }

    fn ensure_turn(&self, user_id: PlayerId) -> Result<(), DomainError> {
        if self.state.player_turn != user_id {
            return Err(DomainError::NotYourTurn);
        }
        Ok(())
    }

    fn ensure_no_pending_response(&self) -> Result<(), DomainError> {
        if self.state.awaiting_response() {
            return Err(DomainError::WaitingResponse);
        }
        Ok(())
    }

    fn player_pair(&self) -> Result<(PlayerId, PlayerId), DomainError> {
        match self.players.as_slice() {
            [a, b] => Ok((a.id, b.id)),
            _ => Err(DomainError::GameNotStarted),
        }
    }

    fn opponent_of(&self, user_id: PlayerId) -> Result<PlayerId, DomainError> {
        let (a, b) = self.player_pair()?;
        if user_id == a {
            Ok(b)
        } else {
            Ok(a)
        }
    }

    /// A player's six-card envido universe: still held plus already thrown.
    fn envido_cards(&self, player: PlayerId) -> Vec<Card> {
        self.state
            .cards
            .get(&player)
            .into_iter()
            .flatten()
            .chain(self.state.thrown_cards.get(&player).into_iter().flatten())
            .copied()
            .collect()
    }

    /// Turn handoff after a throw: an unfinished trick goes to whoever has
    /// thrown fewer cards, a finished one to its winner (or back across the
    /// table on a parda).
    fn advance_turn_after_throw(&mut self, thrower: PlayerId) -> Result<(), DomainError> {
        let (a, b) = self.player_pair()?;
        let empty = Vec::new();
        let thrown_a = self.state.thrown_cards.get(&a).unwrap_or(&empty);
        let thrown_b = self.state.thrown_cards.get(&b).unwrap_or(&empty);
        if thrown_a.len() == thrown_b.len() {
            if let (Some(&card_a), Some(&card_b)) = (thrown_a.last(), thrown_b.last()) {
                self.state.player_turn = match trick_outcome((a, card_a), (b, card_b)) {
                    TrickOutcome::Won(winner) => winner,
                    TrickOutcome::Parda => if thrower == a { b } else { a },
                };
            }
        } else if thrown_a.len() < thrown_b.len() {
            self.state.player_turn = a;
        } else {
            self.state.player_turn = b;
        }
        Ok(())
    }

    fn resolve_round<R: Rng>(self, rng: &mut R) -> Result<Game, DomainError> {
        let (a, b) = self.player_pair()?;
        match round_winner(self.state.first_player, (a, b), &self.state.thrown_cards) {
            Some(winner) => self.award_round(rng, winner),
            None => Ok(self),
        }
    }

    /// Award the round at its current value, then either finish the match
    /// or deal the next round.
    fn award_round<R: Rng>(mut self, rng: &mut R, winner: PlayerId) -> Result<Game, DomainError> {
        let value = self.state.truco_points;
        *self.state.points.entry(winner).or_insert(0) += value;
        self.events.push(GameEvent::RoundResult {
            winner,
            points: self.state.points.clone(),
        });
        if let Some(champion) = self.match_winner() {
            self.state.winner = Some(champion);
            self.events.push(GameEvent::Result {
                winner: champion,
                points: self.state.points.clone(),
            });
            Ok(self)
        } else {
            self.next_round(rng)
        }
    }

    fn next_round<R: Rng>(mut self, rng: &mut R) -> Result<Game, DomainError> {
        let (a, b) = self.player_pair()?;
        let mano = self.opponent_of(self.state.first_player)?;
        self.state.round += 1;
        self.state.first_player = mano;
        self.state.player_turn = mano;
        let (hand_a, hand_b) = deal_hands(rng);
        let deal = HashMap::from([(a, hand_a), (b, hand_b)]);
        self.state.cards = deal.clone();
        self.state.thrown_cards = HashMap::from([(a, Vec::new()), (b, Vec::new())]);
        self.state.truco_points = BASE_ROUND_POINTS;
        self.state.envido = EnvidoState::default();
        self.state.truco = TrucoState::default();
        self.events.push(GameEvent::NextRound {
            round: self.state.round,
            cards: deal,
            next_player_id: mano,
        });
        Ok(self)
    }

    /// First player at or past the target wins; ties go to the mano.
    fn match_winner(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .map(|p| p.id)
            .filter(|id| self.state.points_of(*id) >= self.state.max_points)
            .max_by_key(|id| (self.state.points_of(*id), *id == self.state.first_player))
    }
}
