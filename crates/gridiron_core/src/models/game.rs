//! Game root entity
//!
//! One mutable record per match. Field positions are always measured from
//! the possessing team's own goal line (0 = own goal, 100 = opponent goal),
//! so every possession flip mirrors the location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calls::{CoinSide, OvertimeChoice, PlayFamily, TeamProfile, TeamSide, TossChoice};
use super::play::PlayId;

/// Seconds in one quarter of regulation.
pub const QUARTER_SECONDS: u16 = 420;
/// Timeouts per side per regulation half.
pub const REGULATION_TIMEOUTS: u8 = 3;
/// Timeouts per side per overtime round.
pub const OVERTIME_TIMEOUTS: u8 = 1;
/// Kicking team spots the ball at its own 35 for a kickoff.
pub const KICKOFF_SPOT: u8 = 35;
/// Free kick after a safety comes from the 20.
pub const SAFETY_KICK_SPOT: u8 = 20;
/// Overtime possessions start at the opponent's 25.
pub const OVERTIME_SPOT: u8 = 75;
/// Point-after attempts snap from the opponent's 3.
pub const POINT_AFTER_SPOT: u8 = 97;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Game-level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Pregame,
    OpeningKickoff,
    InProgress,
    Halftime,
    EndOfRegulation,
    Overtime,
    Final,
}

impl GameStatus {
    /// Whether submissions are accepted in this phase.
    pub fn accepts_plays(self) -> bool {
        matches!(
            self,
            GameStatus::OpeningKickoff
                | GameStatus::InProgress
                | GameStatus::Halftime
                | GameStatus::Overtime
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,

    // Clock state. Quarter 5 is the first overtime round, 6 the second, and
    // so on; the clock reads 0 throughout overtime.
    pub quarter: u8,
    pub clock_seconds: u16,
    pub clock_stopped: bool,

    // Field state
    pub possession: TeamSide,
    pub waiting_on: TeamSide,
    pub ball_location: u8,
    pub down: u8,
    pub yards_to_go: u8,

    // Score
    pub home_score: u16,
    pub away_score: u16,

    // Resources
    pub home_timeouts: u8,
    pub away_timeouts: u8,
    pub home_delay_of_game: u8,
    pub away_delay_of_game: u8,

    // Turn markers
    pub current_play_type: PlayFamily,
    pub current_play_id: Option<PlayId>,

    // Coin tosses
    pub coin_toss_winner: Option<TeamSide>,
    pub coin_toss_choice: Option<TossChoice>,
    pub overtime_coin_toss_winner: Option<TeamSide>,
    pub overtime_coin_toss_choice: Option<OvertimeChoice>,
    /// Side that kicked the opening kickoff; receives to open the second half.
    pub opening_kicker: Option<TeamSide>,

    // Overtime bookkeeping
    pub overtime_first_possession: Option<TeamSide>,
    /// Possessions already completed in the current overtime round (0..=2).
    pub overtime_possessions: u8,

    // Observational flags, recomputed every play
    pub close_game: bool,
    pub upset_alert: bool,

    // Matchup context
    pub home_profile: TeamProfile,
    pub away_profile: TeamProfile,

    /// Timestamp of the last accepted submission, drives elapsed-response
    /// accounting. None until the opening toss choice is made.
    pub last_action_at: Option<DateTime<Utc>>,
    /// Last pegged coin-toss call, kept for the record.
    pub last_coin_call: Option<CoinSide>,
}

impl Game {
    /// A fresh game awaiting its coin toss.
    pub fn new(id: GameId, home_profile: TeamProfile, away_profile: TeamProfile) -> Self {
        Self {
            id,
            status: GameStatus::Pregame,
            quarter: 1,
            clock_seconds: QUARTER_SECONDS,
            clock_stopped: true,
            possession: TeamSide::Home,
            waiting_on: TeamSide::Away,
            ball_location: KICKOFF_SPOT,
            down: 1,
            yards_to_go: 10,
            home_score: 0,
            away_score: 0,
            home_timeouts: REGULATION_TIMEOUTS,
            away_timeouts: REGULATION_TIMEOUTS,
            home_delay_of_game: 0,
            away_delay_of_game: 0,
            current_play_type: PlayFamily::Kickoff,
            current_play_id: None,
            coin_toss_winner: None,
            coin_toss_choice: None,
            overtime_coin_toss_winner: None,
            overtime_coin_toss_choice: None,
            opening_kicker: None,
            overtime_first_possession: None,
            overtime_possessions: 0,
            close_game: false,
            upset_alert: false,
            home_profile,
            away_profile,
            last_action_at: None,
            last_coin_call: None,
        }
    }

    pub fn score_of(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn add_score(&mut self, side: TeamSide, points: u16) {
        match side {
            TeamSide::Home => self.home_score += points,
            TeamSide::Away => self.away_score += points,
        }
    }

    pub fn subtract_score(&mut self, side: TeamSide, points: u16) {
        match side {
            TeamSide::Home => self.home_score = self.home_score.saturating_sub(points),
            TeamSide::Away => self.away_score = self.away_score.saturating_sub(points),
        }
    }

    pub fn timeouts_of(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home_timeouts,
            TeamSide::Away => self.away_timeouts,
        }
    }

    pub fn use_timeout(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home_timeouts = self.home_timeouts.saturating_sub(1),
            TeamSide::Away => self.away_timeouts = self.away_timeouts.saturating_sub(1),
        }
    }

    pub fn reset_timeouts(&mut self, per_side: u8) {
        self.home_timeouts = per_side;
        self.away_timeouts = per_side;
    }

    /// Scheme pair of the given side.
    pub fn profile_of(&self, side: TeamSide) -> TeamProfile {
        match side {
            TeamSide::Home => self.home_profile,
            TeamSide::Away => self.away_profile,
        }
    }

    /// Side currently on defense (not in possession).
    pub fn defense(&self) -> TeamSide {
        self.possession.opponent()
    }

    pub fn is_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    pub fn leader(&self) -> Option<TeamSide> {
        use std::cmp::Ordering;
        match self.home_score.cmp(&self.away_score) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }

    pub fn is_overtime(&self) -> bool {
        self.quarter >= 5
    }
}
