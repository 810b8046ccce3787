//! Family resolvers
//!
//! Each play family maps raw table outcomes to a [`Resolution`]: the
//! canonical result plus the field-position, score and possession
//! transforms, expressed as data so the five resolvers stay uniform and
//! testable in isolation. Resolvers are pure functions over the pre-play
//! snapshot; nothing here touches storage or the clock.

mod field_goal;
mod kickoff;
mod normal;
mod point_after;
mod punt;

pub use field_goal::{attempt_distance, resolve_field_goal};
pub use kickoff::resolve_kickoff;
pub use normal::resolve_normal;
pub use point_after::resolve_point_after;
pub use punt::resolve_punt;

use crate::error::Result;
use crate::models::{
    GameSnapshot, PlayCall, PlayFamily, PlayResult, RawOutcome, TeamSide,
};

/// Fully resolved transforms for one play. `ball_location`, `down` and
/// `yards_to_go` are from the post-play possessor's perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub family: PlayFamily,
    pub raw: RawOutcome,
    pub result: PlayResult,
    /// Recorded yardage (clipped at the goal line for scoring gains).
    pub yards: i16,
    pub possession: TeamSide,
    pub flipped: bool,
    pub ball_location: u8,
    pub down: u8,
    pub yards_to_go: u8,
    /// At most one side scores per play.
    pub score: Option<(TeamSide, u16)>,
    pub next_family: PlayFamily,
}

/// Dispatch a raw outcome through the resolver for the submitted call.
pub fn resolve(pre: &GameSnapshot, call: PlayCall, raw: RawOutcome) -> Result<Resolution> {
    // The clock can wipe any play regardless of family.
    if raw == RawOutcome::EndOfHalf {
        return Ok(end_of_half(pre));
    }
    match call {
        PlayCall::Run | PlayCall::Pass | PlayCall::Spike | PlayCall::Kneel => {
            resolve_normal(pre, call, raw)
        }
        PlayCall::FieldGoal => resolve_field_goal(pre, raw),
        PlayCall::Punt => resolve_punt(pre, raw),
        PlayCall::Kickoff | PlayCall::OnsideKick | PlayCall::SquibKick => {
            resolve_kickoff(pre, raw)
        }
        PlayCall::PointAfter | PlayCall::TwoPoint => resolve_point_after(pre, raw),
    }
}

/// The play is wiped; pre-play field state stands and the half is over.
fn end_of_half(pre: &GameSnapshot) -> Resolution {
    Resolution {
        family: pre.play_family,
        raw: RawOutcome::EndOfHalf,
        result: PlayResult::EndOfHalf,
        yards: 0,
        possession: pre.possession,
        flipped: false,
        ball_location: pre.ball_location,
        down: pre.down,
        yards_to_go: pre.yards_to_go,
        score: None,
        next_family: pre.play_family,
    }
}

/// First down at the given spot; goal-to-go inside the ten.
pub(crate) fn fresh_series(ball_location: u8) -> (u8, u8) {
    let to_goal = 100u8.saturating_sub(ball_location).max(1);
    (1, to_goal.min(10))
}

/// Mirror a location into the other team's frame of reference.
pub(crate) fn mirror(location: i16) -> i16 {
    100 - location
}
