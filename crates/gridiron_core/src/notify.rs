//! Notification collaborator
//!
//! Participant messaging and derived-statistics recomputation are
//! best-effort side effects: they run after the (game, play) pair is
//! committed and their failure never rolls a play back. The service layer
//! logs failures and moves on.

use crate::models::{Game, GameId, Play};

pub trait Notifier: Send + Sync {
    /// A play has been sealed and committed.
    fn play_sealed(&self, game: &Game, play: &Play) -> anyhow::Result<()>;

    /// The game reached FINAL.
    fn game_ended(&self, game: &Game) -> anyhow::Result<()>;

    /// Derived statistics for this game are stale (post-play and
    /// post-rollback).
    fn statistics_invalidated(&self, game_id: GameId) -> anyhow::Result<()>;
}

/// No-op notifier for tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn play_sealed(&self, _game: &Game, _play: &Play) -> anyhow::Result<()> {
        Ok(())
    }

    fn game_ended(&self, _game: &Game) -> anyhow::Result<()> {
        Ok(())
    }

    fn statistics_invalidated(&self, _game_id: GameId) -> anyhow::Result<()> {
        Ok(())
    }
}
