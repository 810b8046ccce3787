//! Normal scrimmage resolver: runs, passes, spikes and kneels.

use crate::error::{GameError, Result};
use crate::models::{GameSnapshot, PlayCall, PlayFamily, PlayResult, RawOutcome, TeamSide};

use super::{fresh_series, mirror, Resolution};

pub fn resolve_normal(pre: &GameSnapshot, call: PlayCall, raw: RawOutcome) -> Result<Resolution> {
    match raw {
        RawOutcome::Gain { yards } => Ok(gain(pre, call, yards)),
        RawOutcome::Turnover { return_yards } => Ok(turnover(pre, return_yards)),
        RawOutcome::TurnoverTouchdown => Ok(defensive_touchdown(pre)),
        RawOutcome::Safety => Ok(safety(pre)),
        other => Err(GameError::TableMiss(format!(
            "outcome {other:?} is not a scrimmage outcome"
        ))),
    }
}

fn gain(pre: &GameSnapshot, call: PlayCall, yards: i16) -> Resolution {
    let offense = pre.possession;
    let reached = pre.ball_location as i16 + yards;

    // Goal line clipping: the recorded gain stops exactly at the goal.
    if reached >= 100 {
        let clipped = 100 - pre.ball_location as i16;
        return touchdown(pre, offense, false, clipped);
    }

    // Driven back across the offense's own goal line.
    if reached <= 0 {
        return safety(pre);
    }

    let location = reached as u8;
    if yards >= pre.yards_to_go as i16 {
        let (down, ytg) = fresh_series(location);
        return Resolution {
            family: PlayFamily::Normal,
            raw: RawOutcome::Gain { yards },
            result: PlayResult::FirstDown,
            yards,
            possession: offense,
            flipped: false,
            ball_location: location,
            down,
            yards_to_go: ytg,
            score: None,
            next_family: PlayFamily::Normal,
        };
    }

    // Short of the sticks on fourth down: ball goes over on downs.
    if pre.down >= 4 {
        let spot = mirror(reached).clamp(1, 99) as u8;
        let (down, ytg) = fresh_series(spot);
        return Resolution {
            family: PlayFamily::Normal,
            raw: RawOutcome::Gain { yards },
            result: PlayResult::TurnoverOnDowns,
            yards,
            possession: offense.opponent(),
            flipped: true,
            ball_location: spot,
            down,
            yards_to_go: ytg,
            score: None,
            next_family: PlayFamily::Normal,
        };
    }

    let result = match call {
        PlayCall::Spike => PlayResult::Spike,
        PlayCall::Kneel => PlayResult::Kneel,
        _ => match yards.cmp(&0) {
            std::cmp::Ordering::Greater => PlayResult::Gain,
            std::cmp::Ordering::Equal => PlayResult::NoGain,
            std::cmp::Ordering::Less => PlayResult::Loss,
        },
    };
    Resolution {
        family: PlayFamily::Normal,
        raw: RawOutcome::Gain { yards },
        result,
        yards,
        possession: offense,
        flipped: false,
        ball_location: location,
        down: pre.down + 1,
        yards_to_go: (pre.yards_to_go as i16 - yards) as u8,
        score: None,
        next_family: PlayFamily::Normal,
    }
}

fn turnover(pre: &GameSnapshot, return_yards: i16) -> Resolution {
    let taker = pre.possession.opponent();
    let spot = mirror(pre.ball_location as i16) + return_yards;

    // Returned all the way: upgrade to a turnover touchdown.
    if spot >= 100 {
        return touchdown(pre, taker, true, 0);
    }

    // Carried back into the taker's own end zone: touchback at the 20.
    let location = if spot <= 0 { 20 } else { spot as u8 };
    let (down, ytg) = fresh_series(location);
    Resolution {
        family: PlayFamily::Normal,
        raw: RawOutcome::Turnover { return_yards },
        result: PlayResult::Turnover,
        yards: 0,
        possession: taker,
        flipped: true,
        ball_location: location,
        down,
        yards_to_go: ytg,
        score: None,
        next_family: PlayFamily::Normal,
    }
}

fn defensive_touchdown(pre: &GameSnapshot) -> Resolution {
    touchdown(pre, pre.possession.opponent(), true, 0)
}

fn safety(pre: &GameSnapshot) -> Resolution {
    Resolution {
        family: PlayFamily::Normal,
        raw: RawOutcome::Safety,
        result: PlayResult::Safety,
        yards: -(pre.ball_location as i16),
        possession: pre.possession,
        flipped: false,
        // Conceding team free-kicks from its own 20.
        ball_location: crate::models::SAFETY_KICK_SPOT,
        down: 1,
        yards_to_go: 10,
        score: Some((pre.possession.opponent(), 2)),
        next_family: PlayFamily::Kickoff,
    }
}

fn touchdown(pre: &GameSnapshot, scorer: TeamSide, flipped: bool, yards: i16) -> Resolution {
    Resolution {
        family: PlayFamily::Normal,
        raw: if flipped {
            RawOutcome::TurnoverTouchdown
        } else {
            RawOutcome::Gain { yards }
        },
        result: if flipped {
            PlayResult::TurnoverTouchdown
        } else {
            PlayResult::Touchdown
        },
        yards,
        possession: scorer,
        flipped,
        ball_location: crate::models::POINT_AFTER_SPOT,
        down: 1,
        yards_to_go: 3,
        score: Some((scorer, 6)),
        next_family: PlayFamily::PointAfter,
    }
}
