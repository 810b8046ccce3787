//! Call vocabulary shared by both sides of a game
//!
//! Play calls, playbooks, runoff hints and coin-toss choices. These are the
//! enumerations participants submit; everything derived from them lives in
//! the engine modules.

use serde::{Deserialize, Serialize};

/// Team identifier within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// The family of play a game is currently expecting.
///
/// Kickoffs follow scores and open halves, point-after attempts follow
/// touchdowns, everything else is a normal scrimmage snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayFamily {
    Kickoff,
    Normal,
    PointAfter,
}

/// A play call submitted by the offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayCall {
    Run,
    Pass,
    Spike,
    Kneel,
    FieldGoal,
    Punt,
    Kickoff,
    OnsideKick,
    SquibKick,
    PointAfter,
    TwoPoint,
}

impl PlayCall {
    pub fn family(self) -> PlayFamily {
        match self {
            PlayCall::Run
            | PlayCall::Pass
            | PlayCall::Spike
            | PlayCall::Kneel
            | PlayCall::FieldGoal
            | PlayCall::Punt => PlayFamily::Normal,
            PlayCall::Kickoff | PlayCall::OnsideKick | PlayCall::SquibKick => PlayFamily::Kickoff,
            PlayCall::PointAfter | PlayCall::TwoPoint => PlayFamily::PointAfter,
        }
    }

    /// Spike and kneel are clock plays with a canned outcome; no number is
    /// exchanged for them.
    pub fn requires_number(self) -> bool {
        !matches!(self, PlayCall::Spike | PlayCall::Kneel)
    }
}

/// Offensive pacing hint; selects the clock runoff band for normal plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunoffHint {
    Hurry,
    Normal,
    Final,
    Chew,
}

/// Offensive scheme. Determines the table matchup column and how many
/// seconds a `NORMAL`-paced play burns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffensivePlaybook {
    AirRaid,
    Spread,
    Pro,
    Option,
    Flexbone,
}

impl OffensivePlaybook {
    /// Seconds consumed by a normal-paced snap, faster schemes burn less.
    pub fn normal_runoff_seconds(self) -> u16 {
        match self {
            OffensivePlaybook::AirRaid => 10,
            OffensivePlaybook::Spread => 13,
            OffensivePlaybook::Pro => 15,
            OffensivePlaybook::Option => 17,
            OffensivePlaybook::Flexbone => 20,
        }
    }
}

/// Defensive scheme, table matchup row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefensivePlaybook {
    FourThree,
    ThreeFour,
    FiveTwo,
}

/// One side's scheme pair, fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub offense: OffensivePlaybook,
    pub defense: DefensivePlaybook,
}

/// Coin face named by the away side before the flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Pregame toss winner's election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TossChoice {
    Receive,
    Defer,
}

/// Overtime toss winner's election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OvertimeChoice {
    Offense,
    Defense,
}
