//! Storage collaborator
//!
//! Key-indexed record store for games and plays. The engine computes a full
//! resolution before writing anything, and the pair write is atomic, so a
//! failed resolution leaves storage untouched.
//!
//! `MemoryStore` is the in-process implementation used by tests and local
//! play; production deployments supply their own `GameStore`.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::error::{GameError, Result};
use crate::models::{Game, GameId, Play, PlayId};

static SHARED_STORE: Lazy<MemoryStore> = Lazy::new(MemoryStore::new);

pub trait GameStore: Send + Sync {
    fn get_game(&self, id: GameId) -> Result<Option<Game>>;
    fn save_game(&self, game: &Game) -> Result<()>;

    /// The at-most-one unfinished play for a game.
    fn get_pending_play(&self, game_id: GameId) -> Result<Option<Play>>;
    /// The most recently finished play for a game.
    fn get_previous_finished_play(&self, game_id: GameId) -> Result<Option<Play>>;
    fn save_play(&self, play: &Play) -> Result<()>;
    fn delete_play(&self, id: PlayId) -> Result<()>;

    /// Atomic write of a resolved (game, play) pair.
    fn save_resolved(&self, game: &Game, play: &Play) -> Result<()>;
}

impl<T: GameStore> GameStore for &T {
    fn get_game(&self, id: GameId) -> Result<Option<Game>> {
        (**self).get_game(id)
    }
    fn save_game(&self, game: &Game) -> Result<()> {
        (**self).save_game(game)
    }
    fn get_pending_play(&self, game_id: GameId) -> Result<Option<Play>> {
        (**self).get_pending_play(game_id)
    }
    fn get_previous_finished_play(&self, game_id: GameId) -> Result<Option<Play>> {
        (**self).get_previous_finished_play(game_id)
    }
    fn save_play(&self, play: &Play) -> Result<()> {
        (**self).save_play(play)
    }
    fn delete_play(&self, id: PlayId) -> Result<()> {
        (**self).delete_play(id)
    }
    fn save_resolved(&self, game: &Game, play: &Play) -> Result<()> {
        (**self).save_resolved(game, play)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
    /// Plays per game in submission order.
    plays: RwLock<HashMap<GameId, Vec<Play>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store shared by all local games.
    pub fn shared() -> &'static MemoryStore {
        &SHARED_STORE
    }

    fn poisoned() -> GameError {
        GameError::Storage("store lock poisoned".into())
    }
}

impl GameStore for MemoryStore {
    fn get_game(&self, id: GameId) -> Result<Option<Game>> {
        let games = self.games.read().map_err(|_| Self::poisoned())?;
        Ok(games.get(&id).cloned())
    }

    fn save_game(&self, game: &Game) -> Result<()> {
        let mut games = self.games.write().map_err(|_| Self::poisoned())?;
        games.insert(game.id, game.clone());
        Ok(())
    }

    fn get_pending_play(&self, game_id: GameId) -> Result<Option<Play>> {
        let plays = self.plays.read().map_err(|_| Self::poisoned())?;
        Ok(plays
            .get(&game_id)
            .and_then(|list| list.iter().rev().find(|p| !p.finished))
            .cloned())
    }

    fn get_previous_finished_play(&self, game_id: GameId) -> Result<Option<Play>> {
        let plays = self.plays.read().map_err(|_| Self::poisoned())?;
        Ok(plays
            .get(&game_id)
            .and_then(|list| list.iter().rev().find(|p| p.finished))
            .cloned())
    }

    fn save_play(&self, play: &Play) -> Result<()> {
        let mut plays = self.plays.write().map_err(|_| Self::poisoned())?;
        let list = plays.entry(play.game_id).or_default();
        match list.iter_mut().find(|p| p.id == play.id) {
            Some(existing) => *existing = play.clone(),
            None => list.push(play.clone()),
        }
        Ok(())
    }

    fn delete_play(&self, id: PlayId) -> Result<()> {
        let mut plays = self.plays.write().map_err(|_| Self::poisoned())?;
        for list in plays.values_mut() {
            if let Some(pos) = list.iter().position(|p| p.id == id) {
                list.remove(pos);
                return Ok(());
            }
        }
        Err(GameError::PlayNotFound(id.to_string()))
    }

    fn save_resolved(&self, game: &Game, play: &Play) -> Result<()> {
        // Both locks held for the duration of the pair write.
        let mut games = self.games.write().map_err(|_| Self::poisoned())?;
        let mut plays = self.plays.write().map_err(|_| Self::poisoned())?;
        games.insert(game.id, game.clone());
        let list = plays.entry(play.game_id).or_default();
        match list.iter_mut().find(|p| p.id == play.id) {
            Some(existing) => *existing = play.clone(),
            None => list.push(play.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DefensivePlaybook, OffensivePlaybook, TeamProfile,
    };
    use chrono::Utc;

    fn game() -> Game {
        let profile = TeamProfile {
            offense: OffensivePlaybook::AirRaid,
            defense: DefensivePlaybook::ThreeFour,
        };
        Game::new(GameId::new(), profile, profile)
    }

    #[test]
    fn game_round_trip() {
        let store = MemoryStore::new();
        let game = game();
        store.save_game(&game).unwrap();
        assert_eq!(store.get_game(game.id).unwrap().unwrap().id, game.id);
        assert!(store.get_game(GameId::new()).unwrap().is_none());
    }

    #[test]
    fn pending_and_finished_lookups() {
        let store = MemoryStore::new();
        let game = game();
        store.save_game(&game).unwrap();

        let mut first = Play::pending(PlayId::new(), &game, "aaaa".into(), false, None, Utc::now());
        first.finished = true;
        store.save_play(&first).unwrap();

        let second = Play::pending(PlayId::new(), &game, "bbbb".into(), false, None, Utc::now());
        store.save_play(&second).unwrap();

        assert_eq!(store.get_pending_play(game.id).unwrap().unwrap().id, second.id);
        assert_eq!(
            store.get_previous_finished_play(game.id).unwrap().unwrap().id,
            first.id
        );

        store.delete_play(second.id).unwrap();
        assert!(store.get_pending_play(game.id).unwrap().is_none());
        assert!(store.delete_play(second.id).is_err());
    }
}
