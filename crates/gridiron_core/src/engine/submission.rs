//! The two halves of a down
//!
//! The defense submits first: its number is sealed and a pending play
//! snapshots the game. The offense's submission then opens the seal,
//! consults the outcome table and resolves the play. Both functions mutate
//! owned copies only; the caller persists on success, so a failure commits
//! nothing.

use chrono::{DateTime, Utc};

use crate::error::{GameError, Result};
use crate::models::{
    Game, Play, PlayCall, PlayFamily, PlayId, RawOutcome, RunoffHint, TableOutcome, TeamSide,
};
use crate::secrecy;
use crate::table::OutcomeTable;

use super::resolve::{self, attempt_distance, Resolution};
use super::{clock, closeness};

#[derive(Debug, Clone, Copy)]
pub struct DefensiveSubmission {
    pub submitter: TeamSide,
    pub number: u16,
    pub timeout_called: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct OffensiveSubmission {
    pub submitter: TeamSide,
    /// Absent only for spike and kneel.
    pub number: Option<u16>,
    pub call: PlayCall,
    pub runoff_hint: RunoffHint,
    pub timeout_called: bool,
}

/// Accept the defensive number and open a pending play.
pub fn begin_play(game: &mut Game, sub: &DefensiveSubmission, now: DateTime<Utc>) -> Result<Play> {
    if !game.status.accepts_plays() {
        return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
    }
    if sub.submitter != game.waiting_on {
        return Err(GameError::WrongSubmitter {
            expected: game.waiting_on,
            got: sub.submitter,
        });
    }
    closeness::check_number(sub.number)?;

    let id = PlayId::new();
    let sealed = secrecy::seal(&id, sub.number);
    let response_seconds = game.last_action_at.map(|t| (now - t).num_seconds());
    let play = Play::pending(id, game, sealed, sub.timeout_called, response_seconds, now);

    game.current_play_id = Some(id);
    game.waiting_on = game.possession;
    game.last_action_at = Some(now);
    Ok(play)
}

/// Accept the offensive submission and resolve the pending play.
pub fn resolve_play(
    game: &mut Game,
    play: &mut Play,
    sub: &OffensiveSubmission,
    table: &dyn OutcomeTable,
    now: DateTime<Utc>,
) -> Result<Resolution> {
    if sub.call.family() != game.current_play_type {
        return Err(GameError::PhaseViolation {
            expected: game.current_play_type,
            call: sub.call,
        });
    }
    if sub.submitter != game.possession {
        return Err(GameError::WrongSubmitter {
            expected: game.possession,
            got: sub.submitter,
        });
    }

    let defense_number = secrecy::open(&play.id, &play.sealed_defense)?;
    let offense_number = if sub.call.requires_number() {
        let n = sub.number.ok_or(GameError::MissingNumber(sub.call))?;
        closeness::check_number(n)?;
        Some(n)
    } else {
        sub.number
    };
    let diff = offense_number
        .map(|n| closeness::closeness(n, defense_number))
        .unwrap_or(0);

    // Timeout accounting: only a running clock consumes one, and the
    // defense committed its call first.
    let mut charged = None;
    if !game.clock_stopped {
        let defense = game.defense();
        if play.defense_timeout_called && game.timeouts_of(defense) > 0 {
            charged = Some(defense);
        } else if sub.timeout_called && game.timeouts_of(game.possession) > 0 {
            charged = Some(game.possession);
        }
    }

    let offense_playbook = game.profile_of(game.possession).offense;
    let defense_playbook = game.profile_of(game.defense()).defense;
    let row = match sub.call {
        // Canned outcomes; the table is never consulted.
        PlayCall::Spike => TableOutcome {
            outcome: RawOutcome::Gain { yards: 0 },
            duration_seconds: 0,
        },
        PlayCall::Kneel => TableOutcome {
            outcome: RawOutcome::Gain { yards: -1 },
            duration_seconds: 0,
        },
        PlayCall::Run | PlayCall::Pass => {
            table.lookup_normal(sub.call, offense_playbook, defense_playbook, diff)?
        }
        PlayCall::FieldGoal => {
            table.lookup_field_goal(attempt_distance(game.ball_location), diff)?
        }
        PlayCall::Punt => table.lookup_punt(game.ball_location, diff)?,
        PlayCall::Kickoff
        | PlayCall::OnsideKick
        | PlayCall::SquibKick
        | PlayCall::PointAfter
        | PlayCall::TwoPoint => table.lookup_non_normal(sub.call, diff)?,
    };

    // Only scrimmage plays consume game clock; kickoffs and point-after
    // attempts use the reduced transition with no in-play runoff.
    let in_regulation = !game.is_overtime();
    let runoff = if in_regulation && sub.call.family() == PlayFamily::Normal {
        clock::runoff_seconds(
            sub.call,
            sub.runoff_hint,
            offense_playbook,
            game.clock_seconds,
            game.clock_stopped,
            charged.is_some(),
        )
    } else {
        0
    };
    let raw = if in_regulation && clock::exhausts_half(game.clock_seconds, runoff, game.quarter) {
        RawOutcome::EndOfHalf
    } else {
        row.outcome
    };

    if let Some(side) = charged {
        game.use_timeout(side);
    }

    let res = resolve::resolve(&play.pre, sub.call, raw)?;

    // Fold the resolution into the game.
    let spent = runoff.min(game.clock_seconds);
    if in_regulation {
        game.clock_seconds -= spent;
    }
    if let Some((side, points)) = res.score {
        game.add_score(side, points);
    }
    game.possession = res.possession;
    game.ball_location = res.ball_location;
    game.down = res.down;
    game.yards_to_go = res.yards_to_go;
    game.current_play_type = res.next_family;
    game.clock_stopped =
        res.result.stops_clock() || charged.is_some() || game.clock_seconds == 0;
    crate::phase::transitions::advance_after_play(game, &res);
    game.last_action_at = Some(now);

    // Seal the play record.
    play.defense_number = Some(defense_number);
    play.offense_number = offense_number;
    play.call = Some(sub.call);
    play.runoff_hint = Some(sub.runoff_hint);
    play.offense_timeout_called = sub.timeout_called;
    play.timeout_charged = charged;
    play.raw_outcome = Some(raw);
    play.result = Some(res.result);
    play.yards = res.yards;
    play.duration_seconds = if raw == RawOutcome::EndOfHalf {
        0
    } else {
        row.duration_seconds
    };
    play.runoff_seconds = spent;
    play.home_score_after = game.home_score;
    play.away_score_after = game.away_score;
    play.finished = true;
    Ok(res)
}
