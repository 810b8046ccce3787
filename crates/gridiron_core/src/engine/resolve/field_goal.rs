//! Field goal resolver.

use crate::error::{GameError, Result};
use crate::models::{
    GameSnapshot, PlayFamily, PlayResult, RawOutcome, KICKOFF_SPOT, POINT_AFTER_SPOT,
};

use super::{fresh_series, mirror, Resolution};

/// Attempt distance in yards: field position plus the end zone and the snap.
pub fn attempt_distance(ball_location: u8) -> u8 {
    100 - ball_location + 17
}

pub fn resolve_field_goal(pre: &GameSnapshot, raw: RawOutcome) -> Result<Resolution> {
    let offense = pre.possession;
    match raw {
        RawOutcome::KickGood => Ok(Resolution {
            family: PlayFamily::Normal,
            raw,
            result: PlayResult::KickGood,
            yards: 0,
            possession: offense,
            flipped: false,
            ball_location: KICKOFF_SPOT,
            down: 1,
            yards_to_go: 10,
            score: Some((offense, 3)),
            next_family: PlayFamily::Kickoff,
        }),
        RawOutcome::KickNoGood | RawOutcome::KickBlocked => {
            // Defense takes over at the mirrored spot, no worse than its 20.
            let spot = (mirror(pre.ball_location as i16).max(20)).min(99) as u8;
            let (down, ytg) = fresh_series(spot);
            Ok(Resolution {
                family: PlayFamily::Normal,
                raw,
                result: if raw == RawOutcome::KickBlocked {
                    PlayResult::Blocked
                } else {
                    PlayResult::KickNoGood
                },
                yards: 0,
                possession: offense.opponent(),
                flipped: true,
                ball_location: spot,
                down,
                yards_to_go: ytg,
                score: None,
                next_family: PlayFamily::Normal,
            })
        }
        RawOutcome::KickBlockedReturned => Ok(Resolution {
            family: PlayFamily::Normal,
            raw,
            result: PlayResult::KickSix,
            yards: 0,
            possession: offense.opponent(),
            flipped: true,
            ball_location: POINT_AFTER_SPOT,
            down: 1,
            yards_to_go: 3,
            score: Some((offense.opponent(), 6)),
            next_family: PlayFamily::PointAfter,
        }),
        other => Err(GameError::TableMiss(format!(
            "outcome {other:?} is not a field goal outcome"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::snapshot;
    use super::*;
    use crate::models::TeamSide;

    #[test]
    fn distance_includes_end_zone_and_snap() {
        assert_eq!(attempt_distance(80), 37);
        assert_eq!(attempt_distance(97), 20);
    }

    #[test]
    fn good_kick_scores_three_and_kicks_off() {
        let pre = snapshot(75, 4, 6);
        let res = resolve_field_goal(&pre, RawOutcome::KickGood).unwrap();
        assert_eq!(res.result, PlayResult::KickGood);
        assert_eq!(res.score, Some((TeamSide::Home, 3)));
        assert_eq!(res.next_family, PlayFamily::Kickoff);
        assert!(!res.flipped);
    }

    #[test]
    fn miss_hands_over_the_mirrored_spot() {
        let pre = snapshot(65, 4, 3);
        let res = resolve_field_goal(&pre, RawOutcome::KickNoGood).unwrap();
        assert_eq!(res.result, PlayResult::KickNoGood);
        assert!(res.flipped);
        assert_eq!(res.ball_location, 35);
        assert_eq!(res.down, 1);
    }

    #[test]
    fn short_miss_is_floored_at_the_twenty() {
        let pre = snapshot(95, 4, 2);
        let res = resolve_field_goal(&pre, RawOutcome::KickNoGood).unwrap();
        assert_eq!(res.ball_location, 20);
    }

    #[test]
    fn block_return_is_a_kick_six() {
        let pre = snapshot(70, 4, 5);
        let res = resolve_field_goal(&pre, RawOutcome::KickBlockedReturned).unwrap();
        assert_eq!(res.result, PlayResult::KickSix);
        assert_eq!(res.score, Some((TeamSide::Away, 6)));
        assert_eq!(res.next_family, PlayFamily::PointAfter);
    }
}
