//! Per-down play record
//!
//! A play is created when the defense submits its hidden number and sealed
//! exactly once when the offense's submission resolves. The pre-play snapshot
//! is what makes rollback an exact inverse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calls::{PlayCall, PlayFamily, RunoffHint, TeamSide};
use super::game::{Game, GameId, GameStatus};
use super::outcome::{PlayResult, RawOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayId(pub Uuid);

impl PlayId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything rollback needs to restore the game as it stood at the snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub quarter: u8,
    pub clock_seconds: u16,
    pub clock_stopped: bool,
    pub possession: TeamSide,
    pub ball_location: u8,
    pub down: u8,
    pub yards_to_go: u8,
    pub home_score: u16,
    pub away_score: u16,
    pub home_timeouts: u8,
    pub away_timeouts: u8,
    pub play_family: PlayFamily,
    pub overtime_possessions: u8,
    pub overtime_first_possession: Option<TeamSide>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        Self {
            status: game.status,
            quarter: game.quarter,
            clock_seconds: game.clock_seconds,
            clock_stopped: game.clock_stopped,
            possession: game.possession,
            ball_location: game.ball_location,
            down: game.down,
            yards_to_go: game.yards_to_go,
            home_score: game.home_score,
            away_score: game.away_score,
            home_timeouts: game.home_timeouts,
            away_timeouts: game.away_timeouts,
            play_family: game.current_play_type,
            overtime_possessions: game.overtime_possessions,
            overtime_first_possession: game.overtime_first_possession,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub id: PlayId,
    pub game_id: GameId,
    pub pre: GameSnapshot,

    /// Defensive number, sealed at submission, opened only during resolution.
    pub sealed_defense: String,
    /// Plain defensive number, populated when the play is sealed.
    pub defense_number: Option<u16>,
    pub offense_number: Option<u16>,
    pub call: Option<PlayCall>,
    pub runoff_hint: Option<RunoffHint>,

    pub defense_timeout_called: bool,
    pub offense_timeout_called: bool,
    /// Side actually charged a timeout on this play, if any.
    pub timeout_charged: Option<TeamSide>,
    /// Side penalized on an administrative play (delay of game).
    pub penalized: Option<TeamSide>,

    pub raw_outcome: Option<RawOutcome>,
    pub result: Option<PlayResult>,
    pub yards: i16,
    pub duration_seconds: u16,
    pub runoff_seconds: u16,

    pub home_score_after: u16,
    pub away_score_after: u16,

    pub win_probability: f64,
    pub win_probability_delta: f64,

    /// Seconds the defense took to answer, when the game clock has started.
    pub response_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub finished: bool,
}

impl Play {
    /// A pending play: defensive number sealed, waiting on the offense.
    pub fn pending(
        id: PlayId,
        game: &Game,
        sealed_defense: String,
        defense_timeout_called: bool,
        response_seconds: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            game_id: game.id,
            pre: GameSnapshot::capture(game),
            sealed_defense,
            defense_number: None,
            offense_number: None,
            call: None,
            runoff_hint: None,
            defense_timeout_called,
            offense_timeout_called: false,
            timeout_charged: None,
            penalized: None,
            raw_outcome: None,
            result: None,
            yards: 0,
            duration_seconds: 0,
            runoff_seconds: 0,
            home_score_after: game.home_score,
            away_score_after: game.away_score,
            win_probability: 0.5,
            win_probability_delta: 0.0,
            response_seconds,
            created_at,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calls::{DefensivePlaybook, OffensivePlaybook, TeamProfile};

    fn game() -> Game {
        let profile = TeamProfile {
            offense: OffensivePlaybook::Spread,
            defense: DefensivePlaybook::ThreeFour,
        };
        Game::new(GameId::new(), profile, profile)
    }

    #[test]
    fn snapshot_mirrors_game_fields() {
        let mut game = game();
        game.quarter = 3;
        game.clock_seconds = 77;
        game.ball_location = 42;
        game.down = 3;
        game.yards_to_go = 7;
        game.home_score = 14;
        let snap = GameSnapshot::capture(&game);
        assert_eq!(snap.quarter, 3);
        assert_eq!(snap.clock_seconds, 77);
        assert_eq!(snap.ball_location, 42);
        assert_eq!(snap.down, 3);
        assert_eq!(snap.yards_to_go, 7);
        assert_eq!(snap.home_score, 14);
    }

    #[test]
    fn pending_play_is_unfinished() {
        let game = game();
        let play = Play::pending(PlayId::new(), &game, "00".into(), false, None, Utc::now());
        assert!(!play.finished);
        assert!(play.defense_number.is_none());
        assert_eq!(play.game_id, game.id);
    }
}
