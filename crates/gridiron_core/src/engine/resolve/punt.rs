//! Punt resolver.

use crate::error::{GameError, Result};
use crate::models::{GameSnapshot, PlayFamily, PlayResult, RawOutcome, POINT_AFTER_SPOT};

use super::{fresh_series, mirror, Resolution};

pub fn resolve_punt(pre: &GameSnapshot, raw: RawOutcome) -> Result<Resolution> {
    let offense = pre.possession;
    let receiver = offense.opponent();
    match raw {
        RawOutcome::Punt { yards } => {
            let landing = pre.ball_location as i16 + yards;
            // Into the end zone: touchback at the receiver's 20.
            if landing >= 100 {
                return Ok(touchback(pre, raw));
            }
            let spot = mirror(landing).clamp(1, 99) as u8;
            let (down, ytg) = fresh_series(spot);
            Ok(Resolution {
                family: PlayFamily::Normal,
                raw,
                result: PlayResult::PuntResult,
                yards,
                possession: receiver,
                flipped: true,
                ball_location: spot,
                down,
                yards_to_go: ytg,
                score: None,
                next_family: PlayFamily::Normal,
            })
        }
        RawOutcome::PuntTouchback => Ok(touchback(pre, raw)),
        RawOutcome::PuntMuffed { yards } => {
            let landing = pre.ball_location as i16 + yards;
            // Muffed in the end zone and recovered: touchdown the hard way.
            if landing >= 100 {
                return Ok(Resolution {
                    family: PlayFamily::Normal,
                    raw,
                    result: PlayResult::Touchdown,
                    yards,
                    possession: offense,
                    flipped: false,
                    ball_location: POINT_AFTER_SPOT,
                    down: 1,
                    yards_to_go: 3,
                    score: Some((offense, 6)),
                    next_family: PlayFamily::PointAfter,
                });
            }
            let spot = landing.clamp(1, 99) as u8;
            let (down, ytg) = fresh_series(spot);
            Ok(Resolution {
                family: PlayFamily::Normal,
                raw,
                result: PlayResult::Muffed,
                yards,
                possession: offense,
                flipped: false,
                ball_location: spot,
                down,
                yards_to_go: ytg,
                score: None,
                next_family: PlayFamily::Normal,
            })
        }
        RawOutcome::PuntBlocked => {
            let spot = mirror(pre.ball_location as i16).clamp(1, 99) as u8;
            let (down, ytg) = fresh_series(spot);
            Ok(Resolution {
                family: PlayFamily::Normal,
                raw,
                result: PlayResult::Blocked,
                yards: 0,
                possession: receiver,
                flipped: true,
                ball_location: spot,
                down,
                yards_to_go: ytg,
                score: None,
                next_family: PlayFamily::Normal,
            })
        }
        RawOutcome::PuntReturned => Ok(Resolution {
            family: PlayFamily::Normal,
            raw,
            result: PlayResult::KickSix,
            yards: 0,
            possession: receiver,
            flipped: true,
            ball_location: POINT_AFTER_SPOT,
            down: 1,
            yards_to_go: 3,
            score: Some((receiver, 6)),
            next_family: PlayFamily::PointAfter,
        }),
        other => Err(GameError::TableMiss(format!(
            "outcome {other:?} is not a punt outcome"
        ))),
    }
}

fn touchback(pre: &GameSnapshot, raw: RawOutcome) -> Resolution {
    Resolution {
        family: PlayFamily::Normal,
        raw,
        result: PlayResult::Touchback,
        yards: 0,
        possession: pre.possession.opponent(),
        flipped: true,
        ball_location: 20,
        down: 1,
        yards_to_go: 10,
        score: None,
        next_family: PlayFamily::Normal,
    }
}
