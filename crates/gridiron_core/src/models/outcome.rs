//! Raw table outcomes and canonical play results
//!
//! The outcome table speaks in `RawOutcome` codes; the resolvers map those
//! to a `PlayResult` plus concrete field/score/possession transforms. Keeping
//! the raw codes as a tagged union keeps the five family resolvers uniform
//! and testable in isolation.

use serde::{Deserialize, Serialize};

/// Outcome code returned by the outcome table (or forced by the clock).
///
/// Yardage-coded variants carry the distance the table rolled; spot-coded
/// kickoff variants carry the receiving team's yard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawOutcome {
    // Normal scrimmage family
    Gain { yards: i16 },
    Turnover { return_yards: i16 },
    TurnoverTouchdown,
    Safety,

    // Field goal family
    KickGood,
    KickNoGood,
    KickBlocked,
    /// Blocked kick scooped and returned all the way.
    KickBlockedReturned,

    // Punt family
    Punt { yards: i16 },
    PuntTouchback,
    /// Receiving team muffs the catch; kicking team recovers downfield.
    PuntMuffed { yards: i16 },
    PuntBlocked,
    PuntReturned,

    // Kickoff family
    KickoffReturnedTo { yard_line: u8 },
    KickoffTouchback,
    KickoffReturned,
    KickoffMuffed { yard_line: u8 },
    OnsideRecovered { yard_line: u8 },
    OnsideLost { yard_line: u8 },

    // Point-after family
    PatGood,
    PatNoGood,
    TwoPointGood,
    TwoPointNoGood,
    /// Defense takes the attempt back the other way for two.
    PointAfterReturned,

    /// Forced when the runoff exhausts the clock in quarter 2 or 4.
    EndOfHalf,
}

/// A table row: the rolled outcome plus how long the play itself took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOutcome {
    pub outcome: RawOutcome,
    pub duration_seconds: u16,
}

/// Canonical resolved result of a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayResult {
    Touchdown,
    Turnover,
    TurnoverTouchdown,
    FirstDown,
    Gain,
    NoGain,
    Loss,
    Safety,
    TurnoverOnDowns,
    KickGood,
    KickNoGood,
    Blocked,
    KickSix,
    Muffed,
    Touchback,
    PuntResult,
    KickoffResult,
    OnsideRecovery,
    PatGood,
    PatNoGood,
    TwoPointGood,
    TwoPointNoGood,
    DefensiveTwoPoint,
    Spike,
    Kneel,
    EndOfHalf,
    DelayOfGame,
}

impl PlayResult {
    /// Whether the game clock is stopped once this play is whistled dead.
    /// Scores, possession changes, kicks, first downs and clock plays all
    /// stop it; ordinary scrimmage yardage keeps it running.
    pub fn stops_clock(self) -> bool {
        !matches!(self, PlayResult::Gain | PlayResult::NoGain | PlayResult::Loss | PlayResult::Kneel)
    }

    /// Results that put six on the board and queue a point-after attempt.
    pub fn is_touchdown(self) -> bool {
        matches!(
            self,
            PlayResult::Touchdown | PlayResult::TurnoverTouchdown | PlayResult::KickSix
        )
    }

    /// Results that score for the side not in possession at the snap.
    pub fn is_defensive_score(self) -> bool {
        matches!(
            self,
            PlayResult::TurnoverTouchdown
                | PlayResult::KickSix
                | PlayResult::Safety
                | PlayResult::DefensiveTwoPoint
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrimmage_yardage_keeps_clock_running() {
        assert!(!PlayResult::Gain.stops_clock());
        assert!(!PlayResult::NoGain.stops_clock());
        assert!(!PlayResult::Loss.stops_clock());
        assert!(!PlayResult::Kneel.stops_clock());
    }

    #[test]
    fn dead_ball_results_stop_clock() {
        for r in [
            PlayResult::Touchdown,
            PlayResult::Turnover,
            PlayResult::FirstDown,
            PlayResult::Spike,
            PlayResult::PuntResult,
            PlayResult::EndOfHalf,
        ] {
            assert!(r.stops_clock(), "{r:?} should stop the clock");
        }
    }

    #[test]
    fn touchdown_classification() {
        assert!(PlayResult::KickSix.is_touchdown());
        assert!(PlayResult::TurnoverTouchdown.is_defensive_score());
        assert!(!PlayResult::Touchdown.is_defensive_score());
    }

    #[test]
    fn raw_outcomes_serialize_as_tagged_codes() {
        let json = serde_json::to_value(RawOutcome::Gain { yards: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({"code": "GAIN", "yards": 7}));
        let json = serde_json::to_value(RawOutcome::KickoffTouchback).unwrap();
        assert_eq!(json, serde_json::json!({"code": "KICKOFF_TOUCHBACK"}));
        let back: RawOutcome =
            serde_json::from_value(serde_json::json!({"code": "TURNOVER", "return_yards": 12}))
                .unwrap();
        assert_eq!(back, RawOutcome::Turnover { return_yards: 12 });
    }
}
