//! Win-probability predictor collaborator
//!
//! A trained model invoked as a black box. Resolution never depends on it:
//! a failed prediction falls back to a neutral 0.5 with a zero delta.

use serde::{Deserialize, Serialize};

use crate::models::{Game, TeamSide};

/// Neutral probability used when the model is unavailable.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Feature vector handed to the model, derived from post-play game state.
/// Probability is always expressed as the home side's chance to win.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameFeatures {
    pub quarter: u8,
    pub clock_seconds: u16,
    pub score_margin: i32,
    pub home_has_ball: bool,
    pub ball_location: u8,
    pub down: u8,
    pub yards_to_go: u8,
    pub home_timeouts: u8,
    pub away_timeouts: u8,
}

impl GameFeatures {
    pub fn from_game(game: &Game) -> Self {
        Self {
            quarter: game.quarter,
            clock_seconds: game.clock_seconds,
            score_margin: game.home_score as i32 - game.away_score as i32,
            home_has_ball: game.possession == TeamSide::Home,
            ball_location: game.ball_location,
            down: game.down,
            yards_to_go: game.yards_to_go,
            home_timeouts: game.home_timeouts,
            away_timeouts: game.away_timeouts,
        }
    }
}

pub trait WinProbabilityModel: Send + Sync {
    /// Probability in [0,1] that the home side wins from this state.
    fn predict(&self, features: &GameFeatures) -> anyhow::Result<f64>;
}

/// Always-neutral model, useful when no trained model is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralModel;

impl WinProbabilityModel for NeutralModel {
    fn predict(&self, _features: &GameFeatures) -> anyhow::Result<f64> {
        Ok(NEUTRAL_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefensivePlaybook, GameId, OffensivePlaybook, TeamProfile};

    #[test]
    fn features_capture_margin_and_possession() {
        let profile = TeamProfile {
            offense: OffensivePlaybook::Option,
            defense: DefensivePlaybook::FiveTwo,
        };
        let mut game = Game::new(GameId::new(), profile, profile);
        game.home_score = 21;
        game.away_score = 24;
        game.possession = TeamSide::Away;
        let features = GameFeatures::from_game(&game);
        assert_eq!(features.score_margin, -3);
        assert!(!features.home_has_ball);
    }

    #[test]
    fn neutral_model_returns_half() {
        let profile = TeamProfile {
            offense: OffensivePlaybook::Pro,
            defense: DefensivePlaybook::FourThree,
        };
        let game = Game::new(GameId::new(), profile, profile);
        let p = NeutralModel.predict(&GameFeatures::from_game(&game)).unwrap();
        assert_eq!(p, NEUTRAL_PROBABILITY);
    }
}
