//! Game-level transitions folded in after each resolved play
//!
//! Quarter and half boundaries, overtime possession accounting, game end,
//! and the observational close-game flag. The per-play field/score/clock
//! arithmetic has already been applied by the time these run.

use crate::engine::resolve::Resolution;
use crate::models::{
    Game, GameStatus, PlayFamily, PlayResult, TeamSide, KICKOFF_SPOT, OVERTIME_SPOT,
    OVERTIME_TIMEOUTS, QUARTER_SECONDS, REGULATION_TIMEOUTS,
};

/// Margin at or under which a late game counts as close.
const CLOSE_GAME_MARGIN: i32 = 8;
/// Clock at or under which a late game counts as close.
const CLOSE_GAME_CLOCK: u16 = 210;

/// Fold a resolved play into game-level state.
pub fn advance_after_play(game: &mut Game, res: &Resolution) {
    // A resolved kickoff puts the half in motion.
    if res.family == PlayFamily::Kickoff
        && matches!(game.status, GameStatus::OpeningKickoff | GameStatus::Halftime)
        && res.result != PlayResult::EndOfHalf
    {
        game.status = GameStatus::InProgress;
    }

    if game.status == GameStatus::Overtime {
        advance_overtime(game, res);
    } else if !res.result.is_touchdown() && game.clock_seconds == 0 && game.quarter <= 4 {
        // Touchdowns leave the boundary to the upcoming point-after.
        end_of_quarter(game);
    }

    recompute_flags(game);
    game.waiting_on = game.possession.opponent();
}

fn end_of_quarter(game: &mut Game) {
    match game.quarter {
        1 | 3 => {
            game.quarter += 1;
            game.clock_seconds = QUARTER_SECONDS;
            game.clock_stopped = true;
        }
        2 => halftime(game),
        4 => {
            if game.is_tied() {
                // Awaiting the overtime coin toss.
                game.quarter = 5;
                game.clock_seconds = 0;
                game.clock_stopped = true;
                game.status = GameStatus::EndOfRegulation;
            } else {
                game.status = GameStatus::Final;
            }
        }
        _ => {}
    }
}

fn halftime(game: &mut Game) {
    game.quarter = 3;
    game.clock_seconds = QUARTER_SECONDS;
    game.clock_stopped = true;
    game.status = GameStatus::Halftime;
    game.reset_timeouts(REGULATION_TIMEOUTS);
    // The opening receiver kicks off the second half.
    let kicker = game
        .opening_kicker
        .map(TeamSide::opponent)
        .unwrap_or(game.possession);
    game.possession = kicker;
    game.current_play_type = PlayFamily::Kickoff;
    game.ball_location = KICKOFF_SPOT;
    game.down = 1;
    game.yards_to_go = 10;
}

fn advance_overtime(game: &mut Game, res: &Resolution) {
    // Any defensive score ends an overtime game outright.
    if res.result.is_defensive_score() {
        game.status = GameStatus::Final;
        return;
    }

    if res.result.is_touchdown() {
        // A decisive touchdown on the round's second possession ends the
        // game without the try; otherwise the point-after keeps the
        // possession alive.
        if game.overtime_possessions == 1 && game.leader() == Some(game.possession) {
            game.status = GameStatus::Final;
        }
        return;
    }

    let score_completed = matches!(
        res.result,
        PlayResult::KickGood
            | PlayResult::PatGood
            | PlayResult::PatNoGood
            | PlayResult::TwoPointGood
            | PlayResult::TwoPointNoGood
    );
    if !(res.flipped || score_completed) {
        return;
    }

    game.overtime_possessions += 1;
    if game.overtime_possessions >= 2 {
        if game.is_tied() {
            new_overtime_round(game);
        } else {
            game.status = GameStatus::Final;
        }
        return;
    }

    let second = game
        .overtime_first_possession
        .map(TeamSide::opponent)
        .unwrap_or_else(|| game.possession.opponent());
    start_overtime_possession(game, second);
}

fn new_overtime_round(game: &mut Game) {
    game.quarter += 1;
    game.overtime_possessions = 0;
    // Initial possession alternates between rounds.
    let first = game
        .overtime_first_possession
        .map(TeamSide::opponent)
        .unwrap_or(game.possession);
    game.overtime_first_possession = Some(first);
    game.reset_timeouts(OVERTIME_TIMEOUTS);
    start_overtime_possession(game, first);
}

pub(crate) fn start_overtime_possession(game: &mut Game, side: TeamSide) {
    game.possession = side;
    game.ball_location = OVERTIME_SPOT;
    game.down = 1;
    game.yards_to_go = 10;
    game.current_play_type = PlayFamily::Normal;
    game.clock_seconds = 0;
    game.clock_stopped = true;
}

/// Observational flags, recomputed every play. They never influence
/// resolution.
pub fn recompute_flags(game: &mut Game) {
    let margin = (game.home_score as i32 - game.away_score as i32).abs();
    game.close_game =
        margin <= CLOSE_GAME_MARGIN && game.quarter >= 4 && game.clock_seconds <= CLOSE_GAME_CLOCK;
    // TODO: wire a pregame-favorite source so this can actually assert;
    // until then the alert is pinned false.
    game.upset_alert = false;
}
