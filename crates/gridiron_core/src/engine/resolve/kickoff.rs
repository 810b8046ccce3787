//! Kickoff resolver (normal, onside and squib kicks).
//!
//! At the snap the kicking team is the possessor; most outcomes flip the
//! ball to the receiving side. Spot-coded outcomes carry the yard line from
//! the recovering team's own goal.

use crate::error::{GameError, Result};
use crate::models::{GameSnapshot, PlayFamily, PlayResult, RawOutcome, POINT_AFTER_SPOT};

use super::{fresh_series, Resolution};

/// Receiving team starts at its 25 after a kickoff touchback.
const KICKOFF_TOUCHBACK_SPOT: u8 = 25;

pub fn resolve_kickoff(pre: &GameSnapshot, raw: RawOutcome) -> Result<Resolution> {
    let kicker = pre.possession;
    let receiver = kicker.opponent();
    match raw {
        RawOutcome::KickoffReturnedTo { yard_line } => {
            Ok(handoff(pre, raw, receiver, true, yard_line, PlayResult::KickoffResult))
        }
        RawOutcome::KickoffTouchback => Ok(handoff(
            pre,
            raw,
            receiver,
            true,
            KICKOFF_TOUCHBACK_SPOT,
            PlayResult::Touchback,
        )),
        RawOutcome::KickoffReturned => Ok(Resolution {
            family: PlayFamily::Kickoff,
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
        RawOutcome::KickoffMuffed { yard_line } => {
            // Receiver drops it; kicking team takes over at the spot, which
            // arrives in the receiver's frame.
            let spot = (100u8.saturating_sub(yard_line)).clamp(1, 99);
            Ok(handoff(pre, raw, kicker, false, spot, PlayResult::Muffed))
        }
        RawOutcome::OnsideRecovered { yard_line } => {
            Ok(handoff(pre, raw, kicker, false, yard_line, PlayResult::OnsideRecovery))
        }
        RawOutcome::OnsideLost { yard_line } => {
            Ok(handoff(pre, raw, receiver, true, yard_line, PlayResult::KickoffResult))
        }
        other => Err(GameError::TableMiss(format!(
            "outcome {other:?} is not a kickoff outcome"
        ))),
    }
}

fn handoff(
    _pre: &GameSnapshot,
    raw: RawOutcome,
    to: crate::models::TeamSide,
    flipped: bool,
    spot: u8,
    result: PlayResult,
) -> Resolution {
    let spot = spot.clamp(1, 99);
    let (down, ytg) = fresh_series(spot);
    Resolution {
        family: PlayFamily::Kickoff,
        raw,
        result,
        yards: 0,
        possession: to,
        flipped,
        ball_location: spot,
        down,
        yards_to_go: ytg,
        score: None,
        next_family: PlayFamily::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DefensivePlaybook, Game, GameId, GameStatus, OffensivePlaybook, TeamProfile, TeamSide,
        KICKOFF_SPOT,
    };

    fn kickoff_snapshot() -> GameSnapshot {
        let profile = TeamProfile {
            offense: OffensivePlaybook::Spread,
            defense: DefensivePlaybook::FourThree,
        };
        let mut game = Game::new(GameId::new(), profile, profile);
        game.status = GameStatus::OpeningKickoff;
        game.ball_location = KICKOFF_SPOT;
        crate::models::GameSnapshot::capture(&game)
    }

    #[test]
    fn return_spots_the_receiver() {
        let pre = kickoff_snapshot();
        let res =
            resolve_kickoff(&pre, RawOutcome::KickoffReturnedTo { yard_line: 31 }).unwrap();
        assert_eq!(res.possession, TeamSide::Away);
        assert_eq!(res.ball_location, 31);
        assert_eq!(res.next_family, PlayFamily::Normal);
    }

    #[test]
    fn touchback_spots_the_twenty_five() {
        let pre = kickoff_snapshot();
        let res = resolve_kickoff(&pre, RawOutcome::KickoffTouchback).unwrap();
        assert_eq!(res.result, PlayResult::Touchback);
        assert_eq!(res.ball_location, 25);
    }

    #[test]
    fn muff_keeps_the_kicking_team_alive() {
        let pre = kickoff_snapshot();
        let res = resolve_kickoff(&pre, RawOutcome::KickoffMuffed { yard_line: 30 }).unwrap();
        assert_eq!(res.possession, TeamSide::Home);
        assert!(!res.flipped);
        assert_eq!(res.ball_location, 70);
    }

    #[test]
    fn onside_outcomes_split_possession() {
        let pre = kickoff_snapshot();
        let kept =
            resolve_kickoff(&pre, RawOutcome::OnsideRecovered { yard_line: 45 }).unwrap();
        assert_eq!(kept.possession, TeamSide::Home);
        assert_eq!(kept.result, PlayResult::OnsideRecovery);
        let lost = resolve_kickoff(&pre, RawOutcome::OnsideLost { yard_line: 55 }).unwrap();
        assert_eq!(lost.possession, TeamSide::Away);
        assert_eq!(lost.ball_location, 55);
    }

    #[test]
    fn return_touchdown_queues_a_point_after() {
        let pre = kickoff_snapshot();
        let res = resolve_kickoff(&pre, RawOutcome::KickoffReturned).unwrap();
        assert_eq!(res.result, PlayResult::KickSix);
        assert_eq!(res.score, Some((TeamSide::Away, 6)));
        assert_eq!(res.next_family, PlayFamily::PointAfter);
    }
}
