//! Orchestration: apply pure transitions on behalf of requests and fan out
//! the resulting event tails to the game's participants.

use std::sync::Arc;

use rand::thread_rng;
use tracing::{debug, info};

use crate::domain::{
    Card, DomainError, EnvidoCall, Game, GameEvent, Player, PlayerId, TrucoCall,
};
use crate::repos::games::{GameRepo, GameSummary};
use crate::ws::hub::ConnectionRegistry;
use crate::ws::protocol::ServerMsg;

pub struct GameFlowService {
    repo: Arc<GameRepo>,
    registry: Arc<ConnectionRegistry>,
    match_target: u8,
}

impl GameFlowService {
    pub fn new(repo: Arc<GameRepo>, registry: Arc<ConnectionRegistry>, match_target: u8) -> Self {
        Self { repo, registry, match_target }
    }

    pub fn games_list(&self) -> Vec<GameSummary> {
        self.repo.joinable()
    }

    /// Create a single-player game waiting in the lobby.
    pub fn create_game(&self, user: Player) -> (i64, String, Vec<Player>) {
        let creator_id = user.id;
        let game = Game::new(user, self.match_target);
        let name = game.name.clone();
        let players = game.players.clone();
        let game_id = self.repo.insert(game);
        info!(game_id, user_id = creator_id, "Game created");
        (game_id, name, players)
    }

    /// Join as the second player and auto-start the match.
    pub fn join_game(&self, user: Player, game_id: i64) -> Result<(), DomainError> {
        let user_id = user.id;
        let (name, players, tail) = self.repo.with_game(game_id, |game| {
            let started = game.join(user)?.start(&mut thread_rng())?;
            let name = started.name.clone();
            let players = started.players.clone();
            let tail = started.events.clone();
            *game = started;
            Ok((name, players, tail))
        })?;
        info!(game_id, user_id, "Player joined, match started");
        for player in &players {
            self.registry.send_to(
                player.id,
                ServerMsg::GameJoined {
                    game_id,
                    name: name.clone(),
                    players: players.clone(),
                },
            );
        }
        self.push_events(game_id, &players, &tail);
        Ok(())
    }

    pub fn throw_card(&self, user_id: PlayerId, game_id: i64, card: Card) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.throw_card(&mut thread_rng(), user_id, card))
    }

    pub fn call_envido(
        &self,
        user_id: PlayerId,
        game_id: i64,
        call: EnvidoCall,
    ) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.call_envido(user_id, call))
    }

    pub fn answer_envido(
        &self,
        user_id: PlayerId,
        game_id: i64,
        accepted: bool,
    ) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.answer_envido(user_id, accepted))
    }

    pub fn call_truco(
        &self,
        user_id: PlayerId,
        game_id: i64,
        call: TrucoCall,
    ) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.call_truco(user_id, call))
    }

    pub fn answer_truco(
        &self,
        user_id: PlayerId,
        game_id: i64,
        accepted: bool,
    ) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.answer_truco(&mut thread_rng(), user_id, accepted))
    }

    pub fn go_to_deck(&self, user_id: PlayerId, game_id: i64) -> Result<(), DomainError> {
        self.apply(game_id, |game| game.go_to_deck(&mut thread_rng(), user_id))
    }

    /// Record a rematch acceptance; when both players want one, a fresh
    /// game with the same players replaces the finished one.
    pub fn play_again(&self, user_id: PlayerId, game_id: i64) -> Result<(), DomainError> {
        let (agreed, settled, players) = self.repo.with_game(game_id, |game| {
            let next = game.play_again(user_id)?;
            let agreed = next.rematch_agreed();
            let settled = next.rematch_settled();
            let players = next.players.clone();
            *game = next;
            Ok((agreed, settled, players))
        })?;
        if agreed {
            self.spawn_rematch(game_id, players)?;
        }
        if settled {
            self.repo.remove(game_id);
        }
        Ok(())
    }

    /// Record a rematch refusal; once both players have answered the game
    /// is terminal and leaves the store.
    pub fn no_play_again(&self, user_id: PlayerId, game_id: i64) -> Result<(), DomainError> {
        let settled = self.repo.with_game(game_id, |game| {
            let next = game.no_play_again(user_id)?;
            let settled = next.rematch_settled();
            *game = next;
            Ok(settled)
        })?;
        if settled {
            info!(game_id, "Rematch declined, game is terminal");
            self.repo.remove(game_id);
        }
        Ok(())
    }

    /// Run one pure transition under the game's lock and fan out the tail.
    fn apply(
        &self,
        game_id: i64,
        transition: impl FnOnce(&Game) -> Result<Game, DomainError>,
    ) -> Result<(), DomainError> {
        let (players, tail) = self.repo.with_game(game_id, |game| {
            let prior = game.events.len();
            let next = transition(game)?;
            let tail = next.events_since(prior).to_vec();
            let players = next.players.clone();
            *game = next;
            Ok((players, tail))
        })?;
        self.push_events(game_id, &players, &tail);
        Ok(())
    }

    fn push_events(&self, game_id: i64, players: &[Player], tail: &[GameEvent]) {
        if tail.is_empty() {
            return;
        }
        debug!(game_id, events = tail.len(), "Fanning out event tail");
        for player in players {
            let events: Vec<GameEvent> =
                tail.iter().map(|event| event.for_recipient(player.id)).collect();
            self.registry.send_to(player.id, ServerMsg::NewEvents { game_id, events });
        }
    }

    fn spawn_rematch(&self, old_game_id: i64, players: Vec<Player>) -> Result<(), DomainError> {
        let mut players = players.into_iter();
        let (Some(creator), Some(joiner)) = (players.next(), players.next()) else {
            return Err(DomainError::GameNotStarted);
        };
        let game = Game::new(creator, self.match_target)
            .join(joiner)?
            .start(&mut thread_rng())?;
        let name = game.name.clone();
        let players = game.players.clone();
        let tail = game.events.clone();
        let game_id = self.repo.insert(game);
        info!(old_game_id, game_id, "Rematch agreed, fresh match started");
        for player in &players {
            self.registry.send_to(
                player.id,
                ServerMsg::GameJoined {
                    game_id,
                    name: name.clone(),
                    players: players.clone(),
                },
            );
        }
        self.push_events(game_id, &players, &tail);
        Ok(())
    }
}
