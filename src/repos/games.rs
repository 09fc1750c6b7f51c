//! In-memory game repository.
//!
//! Games are stored by id behind a per-game mutex; `with_game` is the
//! single-flight section that serializes transitions for one game without
//! any global lock.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Game};

/// Lobby view of a joinable game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    pub name: String,
}

pub struct GameRepo {
    games: DashMap<i64, Arc<Mutex<Game>>>,
    next_id: AtomicI64,
}

impl GameRepo {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Store a fresh game, replacing its unpersisted id sentinel.
    pub fn insert(&self, mut game: Game) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        game.id = id;
        self.games.insert(id, Arc::new(Mutex::new(game)));
        id
    }

    /// Copy of the current aggregate.
    pub fn snapshot(&self, id: i64) -> Result<Game, DomainError> {
        self.with_game(id, |game| Ok(game.clone()))
    }

    /// Run `f` against the latest state of one game, serialized with every
    /// other access to the same id.
    pub fn with_game<T>(
        &self,
        id: i64,
        f: impl FnOnce(&mut Game) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let entry = self
            .games
            .get(&id)
            .map(|e| Arc::clone(e.value()))
            .ok_or(DomainError::GameNotFound)?;
        let mut guard = entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }

    /// Secondary index: games waiting for a second player.
    pub fn joinable(&self) -> Vec<GameSummary> {
        let mut summaries = Vec::new();
        for entry in self.games.iter() {
            let game = entry.value().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if !game.state.started && game.players.len() == 1 {
                summaries.push(GameSummary { id: game.id, name: game.name.clone() });
            }
        }
        summaries.sort_by_key(|s| s.id);
        summaries
    }

    pub fn remove(&self, id: i64) {
        self.games.remove(&id);
    }
}

impl Default for GameRepo {
    fn default() -> Self {
        Self::new()
    }
}
