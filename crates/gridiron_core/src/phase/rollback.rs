//! Exact-inverse rollback of a mistaken submission
//!
//! Reverses the score delta by canonical result, restores everything else
//! from the play's pre-play snapshot, and leaves the game expecting the same
//! down to be replayed. Deleting the play and re-deriving `current_play_id`
//! is the service layer's half of the operation.

use crate::error::{GameError, Result};
use crate::models::{Game, Play, PlayResult, TeamSide};

/// Points forfeited by a delay-of-game charge.
pub const DELAY_OF_GAME_POINTS: u16 = 8;

pub fn rollback_play(game: &mut Game, play: &Play) -> Result<()> {
    if !play.finished {
        return Err(GameError::RollbackUnavailable(
            "play is still pending".into(),
        ));
    }

    reverse_score(game, play)?;

    let snap = play.pre;
    game.status = snap.status;
    game.quarter = snap.quarter;
    game.clock_seconds = snap.clock_seconds;
    game.clock_stopped = snap.clock_stopped;
    game.possession = snap.possession;
    game.ball_location = snap.ball_location;
    game.down = snap.down;
    game.yards_to_go = snap.yards_to_go;
    game.home_timeouts = snap.home_timeouts;
    game.away_timeouts = snap.away_timeouts;
    game.overtime_possessions = snap.overtime_possessions;
    game.overtime_first_possession = snap.overtime_first_possession;
    game.current_play_type = play.call.map(|c| c.family()).unwrap_or(snap.play_family);
    // The down is replayed: the defense resubmits first.
    game.waiting_on = snap.possession.opponent();
    super::transitions::recompute_flags(game);
    Ok(())
}

fn reverse_score(game: &mut Game, play: &Play) -> Result<()> {
    let result = play
        .result
        .ok_or_else(|| GameError::RollbackUnavailable("play has no result".into()))?;
    let offense = play.pre.possession;
    let defense = offense.opponent();
    match result {
        PlayResult::Touchdown => game.subtract_score(offense, 6),
        PlayResult::TurnoverTouchdown | PlayResult::KickSix => game.subtract_score(defense, 6),
        PlayResult::Safety | PlayResult::DefensiveTwoPoint => game.subtract_score(defense, 2),
        PlayResult::KickGood => game.subtract_score(offense, 3),
        PlayResult::PatGood => game.subtract_score(offense, 1),
        PlayResult::TwoPointGood => game.subtract_score(offense, 2),
        PlayResult::DelayOfGame => {
            let offender = play.penalized.ok_or_else(|| {
                GameError::RollbackUnavailable("delay-of-game play without an offender".into())
            })?;
            game.subtract_score(offender.opponent(), DELAY_OF_GAME_POINTS);
            match offender {
                TeamSide::Home => {
                    game.home_delay_of_game = game.home_delay_of_game.saturating_sub(1)
                }
                TeamSide::Away => {
                    game.away_delay_of_game = game.away_delay_of_game.saturating_sub(1)
                }
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DefensivePlaybook, GameId, GameSnapshot, GameStatus, OffensivePlaybook, PlayCall, PlayId,
        TeamProfile,
    };
    use chrono::Utc;

    fn game() -> Game {
        let profile = TeamProfile {
            offense: OffensivePlaybook::Option,
            defense: DefensivePlaybook::ThreeFour,
        };
        let mut g = Game::new(GameId::new(), profile, profile);
        g.status = GameStatus::InProgress;
        g.current_play_type = crate::models::PlayFamily::Normal;
        g
    }

    fn finished_play(g: &Game, call: PlayCall, result: PlayResult) -> Play {
        let mut play = Play::pending(PlayId::new(), g, "0000".into(), false, None, Utc::now());
        play.call = Some(call);
        play.result = Some(result);
        play.finished = true;
        play
    }

    #[test]
    fn touchdown_rollback_takes_the_six_back() {
        let mut g = game();
        g.ball_location = 80;
        g.down = 2;
        g.yards_to_go = 5;
        let play = finished_play(&g, PlayCall::Run, PlayResult::Touchdown);
        g.add_score(TeamSide::Home, 6);
        g.ball_location = 97;
        g.current_play_type = crate::models::PlayFamily::PointAfter;

        rollback_play(&mut g, &play).unwrap();
        assert_eq!(g.home_score, 0);
        assert_eq!(g.ball_location, 80);
        assert_eq!(g.down, 2);
        assert_eq!(g.yards_to_go, 5);
        assert_eq!(g.current_play_type, crate::models::PlayFamily::Normal);
        assert_eq!(g.waiting_on, TeamSide::Away);
    }

    #[test]
    fn delay_of_game_rollback_decrements_the_counter() {
        let mut g = game();
        let mut play = finished_play(&g, PlayCall::Run, PlayResult::DelayOfGame);
        play.call = None;
        play.penalized = Some(TeamSide::Home);
        g.add_score(TeamSide::Away, DELAY_OF_GAME_POINTS);
        g.home_delay_of_game = 1;

        rollback_play(&mut g, &play).unwrap();
        assert_eq!(g.away_score, 0);
        assert_eq!(g.home_delay_of_game, 0);
    }

    #[test]
    fn pending_play_cannot_be_rolled_back_here() {
        let mut g = game();
        let play = Play::pending(PlayId::new(), &g, "0000".into(), false, None, Utc::now());
        assert!(matches!(
            rollback_play(&mut g, &play),
            Err(GameError::RollbackUnavailable(_))
        ));
    }

    #[test]
    fn snapshot_restores_a_final_game() {
        let mut g = game();
        g.quarter = 4;
        g.clock_seconds = 10;
        g.home_score = 20;
        g.away_score = 21;
        let snap_game = g.clone();
        let mut play = finished_play(&g, PlayCall::FieldGoal, PlayResult::KickGood);
        play.pre = GameSnapshot::capture(&snap_game);
        g.add_score(TeamSide::Home, 3);
        g.clock_seconds = 0;
        g.status = GameStatus::Final;

        rollback_play(&mut g, &play).unwrap();
        assert_eq!(g.status, GameStatus::InProgress);
        assert_eq!(g.home_score, 20);
        assert_eq!(g.clock_seconds, 10);
    }

    mod round_trip {
        use super::*;
        use crate::engine::{
            begin_play, resolve_play, DefensiveSubmission, OffensiveSubmission,
        };
        use crate::models::{
            OffensivePlaybook as Off, RawOutcome, RunoffHint, TableOutcome,
        };
        use crate::table::OutcomeTable;
        use proptest::prelude::*;

        struct StubTable(TableOutcome);

        impl OutcomeTable for StubTable {
            fn lookup_normal(
                &self,
                _: PlayCall,
                _: Off,
                _: DefensivePlaybook,
                _: u16,
            ) -> crate::error::Result<TableOutcome> {
                Ok(self.0)
            }
            fn lookup_field_goal(&self, _: u8, _: u16) -> crate::error::Result<TableOutcome> {
                Ok(self.0)
            }
            fn lookup_punt(&self, _: u8, _: u16) -> crate::error::Result<TableOutcome> {
                Ok(self.0)
            }
            fn lookup_non_normal(&self, _: PlayCall, _: u16) -> crate::error::Result<TableOutcome> {
                Ok(self.0)
            }
        }

        fn scrimmage_outcome() -> impl Strategy<Value = RawOutcome> {
            prop_oneof![
                (-12i16..=40).prop_map(|yards| RawOutcome::Gain { yards }),
                (0i16..=40).prop_map(|return_yards| RawOutcome::Turnover { return_yards }),
                Just(RawOutcome::TurnoverTouchdown),
                Just(RawOutcome::Safety),
            ]
        }

        proptest! {
            // Rollback is an exact left inverse of resolution for every
            // scrimmage play, including ones that end a half or a game.
            #[test]
            fn resolve_then_rollback_restores_the_snapshot(
                quarter in 1u8..=4,
                clock in 1u16..=420,
                stopped in proptest::bool::ANY,
                ball in 5u8..=95,
                down in 1u8..=4,
                ytg in 1u8..=10,
                home in 0u16..=40,
                away in 0u16..=40,
                d_num in 1u16..=1500,
                o_num in 1u16..=1500,
                is_pass in proptest::bool::ANY,
                hint in prop_oneof![
                    Just(RunoffHint::Hurry),
                    Just(RunoffHint::Normal),
                    Just(RunoffHint::Final),
                    Just(RunoffHint::Chew),
                ],
                outcome in scrimmage_outcome(),
                duration in 1u16..=40,
            ) {
                let mut g = game();
                g.opening_kicker = Some(TeamSide::Home);
                g.quarter = quarter;
                g.clock_seconds = clock;
                g.clock_stopped = stopped;
                g.ball_location = ball;
                g.down = down;
                g.yards_to_go = ytg;
                g.home_score = home;
                g.away_score = away;
                g.waiting_on = TeamSide::Away;
                let before = g.clone();

                let mut play = begin_play(
                    &mut g,
                    &DefensiveSubmission {
                        submitter: TeamSide::Away,
                        number: d_num,
                        timeout_called: false,
                    },
                    Utc::now(),
                )
                .unwrap();
                let call = if is_pass { PlayCall::Pass } else { PlayCall::Run };
                resolve_play(
                    &mut g,
                    &mut play,
                    &OffensiveSubmission {
                        submitter: TeamSide::Home,
                        number: Some(o_num),
                        call,
                        runoff_hint: hint,
                        timeout_called: false,
                    },
                    &StubTable(TableOutcome { outcome, duration_seconds: duration }),
                    Utc::now(),
                )
                .unwrap();

                rollback_play(&mut g, &play).unwrap();
                prop_assert_eq!(g.status, before.status);
                prop_assert_eq!(g.quarter, before.quarter);
                prop_assert_eq!(g.clock_seconds, before.clock_seconds);
                prop_assert_eq!(g.clock_stopped, before.clock_stopped);
                prop_assert_eq!(g.possession, before.possession);
                prop_assert_eq!(g.ball_location, before.ball_location);
                prop_assert_eq!(g.down, before.down);
                prop_assert_eq!(g.yards_to_go, before.yards_to_go);
                prop_assert_eq!(g.home_score, before.home_score);
                prop_assert_eq!(g.away_score, before.away_score);
                prop_assert_eq!(g.home_timeouts, before.home_timeouts);
                prop_assert_eq!(g.away_timeouts, before.away_timeouts);
                prop_assert_eq!(g.current_play_type, before.current_play_type);
                prop_assert_eq!(g.waiting_on, before.waiting_on);
            }
        }
    }
}
