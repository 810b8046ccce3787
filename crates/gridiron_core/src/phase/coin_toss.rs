//! Coin tosses and their choices
//!
//! The pregame toss decides who receives the opening kickoff; the overtime
//! toss decides who takes the first overtime possession. Both are a uniform
//! two-outcome draw compared against the caller's face.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{GameError, Result};
use crate::models::{
    CoinSide, Game, GameStatus, OvertimeChoice, PlayFamily, TeamSide, TossChoice, KICKOFF_SPOT,
    OVERTIME_TIMEOUTS, QUARTER_SECONDS,
};

use super::transitions::start_overtime_possession;

pub fn flip(rng: &mut impl Rng) -> CoinSide {
    if rng.gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

pub fn toss_winner(caller: TeamSide, call: CoinSide, landed: CoinSide) -> TeamSide {
    if call == landed {
        caller
    } else {
        caller.opponent()
    }
}

/// Run the pregame toss. The winner still owes a receive/defer choice.
pub fn run_pregame_toss(
    game: &mut Game,
    caller: TeamSide,
    call: CoinSide,
    rng: &mut impl Rng,
) -> Result<TeamSide> {
    if game.status != GameStatus::Pregame {
        return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
    }
    if game.coin_toss_winner.is_some() {
        return Err(GameError::InvalidStatus("coin toss already run".into()));
    }
    let landed = flip(rng);
    let winner = toss_winner(caller, call, landed);
    game.coin_toss_winner = Some(winner);
    game.last_coin_call = Some(call);
    Ok(winner)
}

/// Winner elects to receive or defer; the opening kickoff is now live.
pub fn apply_pregame_choice(
    game: &mut Game,
    chooser: TeamSide,
    choice: TossChoice,
    now: DateTime<Utc>,
) -> Result<()> {
    if game.status != GameStatus::Pregame {
        return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
    }
    let winner = game
        .coin_toss_winner
        .ok_or_else(|| GameError::InvalidStatus("coin toss not yet run".into()))?;
    if chooser != winner {
        return Err(GameError::WrongSubmitter {
            expected: winner,
            got: chooser,
        });
    }
    if game.coin_toss_choice.is_some() {
        return Err(GameError::InvalidStatus("toss choice already made".into()));
    }

    let receiver = match choice {
        TossChoice::Receive => chooser,
        TossChoice::Defer => chooser.opponent(),
    };
    let kicker = receiver.opponent();
    game.coin_toss_choice = Some(choice);
    game.opening_kicker = Some(kicker);
    game.possession = kicker;
    game.waiting_on = receiver;
    game.status = GameStatus::OpeningKickoff;
    game.current_play_type = PlayFamily::Kickoff;
    game.ball_location = KICKOFF_SPOT;
    game.down = 1;
    game.yards_to_go = 10;
    game.quarter = 1;
    game.clock_seconds = QUARTER_SECONDS;
    game.clock_stopped = true;
    game.last_action_at = Some(now);
    Ok(())
}

/// Run the overtime toss once regulation ends tied.
pub fn run_overtime_toss(
    game: &mut Game,
    caller: TeamSide,
    call: CoinSide,
    rng: &mut impl Rng,
) -> Result<TeamSide> {
    if game.status != GameStatus::EndOfRegulation {
        return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
    }
    if game.overtime_coin_toss_winner.is_some() {
        return Err(GameError::InvalidStatus("overtime toss already run".into()));
    }
    let landed = flip(rng);
    let winner = toss_winner(caller, call, landed);
    game.overtime_coin_toss_winner = Some(winner);
    game.last_coin_call = Some(call);
    Ok(winner)
}

/// Winner elects offense or defense; the first overtime possession starts.
pub fn apply_overtime_choice(
    game: &mut Game,
    chooser: TeamSide,
    choice: OvertimeChoice,
    now: DateTime<Utc>,
) -> Result<()> {
    if game.status != GameStatus::EndOfRegulation {
        return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
    }
    let winner = game
        .overtime_coin_toss_winner
        .ok_or_else(|| GameError::InvalidStatus("overtime toss not yet run".into()))?;
    if chooser != winner {
        return Err(GameError::WrongSubmitter {
            expected: winner,
            got: chooser,
        });
    }
    if game.overtime_coin_toss_choice.is_some() {
        return Err(GameError::InvalidStatus(
            "overtime toss choice already made".into(),
        ));
    }

    let first = match choice {
        OvertimeChoice::Offense => chooser,
        OvertimeChoice::Defense => chooser.opponent(),
    };
    game.overtime_coin_toss_choice = Some(choice);
    game.overtime_first_possession = Some(first);
    game.overtime_possessions = 0;
    game.status = GameStatus::Overtime;
    game.reset_timeouts(OVERTIME_TIMEOUTS);
    start_overtime_possession(game, first);
    game.waiting_on = first.opponent();
    game.last_action_at = Some(now);
    Ok(())
}
