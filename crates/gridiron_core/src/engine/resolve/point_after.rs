//! Point-after resolver: kicked PATs and two-point tries.
//!
//! No clock runs during these; the scoring team kicks off afterwards (the
//! phase controller overrides that in overtime).

use crate::error::{GameError, Result};
use crate::models::{GameSnapshot, PlayFamily, PlayResult, RawOutcome, TeamSide, KICKOFF_SPOT};

use super::Resolution;

pub fn resolve_point_after(pre: &GameSnapshot, raw: RawOutcome) -> Result<Resolution> {
    let attacker = pre.possession;
    let (result, score): (PlayResult, Option<(TeamSide, u16)>) = match raw {
        RawOutcome::PatGood => (PlayResult::PatGood, Some((attacker, 1))),
        RawOutcome::PatNoGood => (PlayResult::PatNoGood, None),
        RawOutcome::TwoPointGood => (PlayResult::TwoPointGood, Some((attacker, 2))),
        RawOutcome::TwoPointNoGood => (PlayResult::TwoPointNoGood, None),
        RawOutcome::PointAfterReturned => {
            (PlayResult::DefensiveTwoPoint, Some((attacker.opponent(), 2)))
        }
        other => {
            return Err(GameError::TableMiss(format!(
                "outcome {other:?} is not a point-after outcome"
            )))
        }
    };
    Ok(Resolution {
        family: PlayFamily::PointAfter,
        raw,
        result,
        yards: 0,
        possession: attacker,
        flipped: false,
        ball_location: KICKOFF_SPOT,
        down: 1,
        yards_to_go: 10,
        score,
        next_family: PlayFamily::Kickoff,
    })
}
