//! Request surface and per-game serialization
//!
//! `GameService` wires the engine and phase controller to the storage,
//! outcome-table, predictor and notification collaborators. All mutating
//! operations for one game are serialized behind a per-game lock; different
//! games proceed independently. Every operation either fully commits or
//! leaves storage untouched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::engine::{begin_play, resolve_play, DefensiveSubmission, OffensiveSubmission};
use crate::error::{GameError, Result};
use crate::models::{
    CoinSide, Game, GameId, GameStatus, OvertimeChoice, Play, PlayId, PlayResult, TeamProfile,
    TeamSide, TossChoice,
};
use crate::notify::Notifier;
use crate::phase::{
    apply_overtime_choice, apply_pregame_choice, recompute_flags, rollback_play,
    run_overtime_toss, run_pregame_toss, DELAY_OF_GAME_POINTS,
};
use crate::predictor::{GameFeatures, WinProbabilityModel, NEUTRAL_PROBABILITY};
use crate::storage::GameStore;
use crate::table::OutcomeTable;

/// Caller mistakes are routine; infrastructure failures are not.
fn trace_rejection(game_id: GameId, err: &GameError) {
    if err.is_caller_error() {
        debug!(game_id = %game_id, error = %err, "submission rejected");
    } else {
        warn!(game_id = %game_id, error = %err, "submission failed");
    }
}

pub struct GameService<S, T, P, N> {
    store: S,
    table: T,
    model: P,
    notifier: N,
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
    rng: Mutex<ChaCha8Rng>,
}

impl<S, T, P, N> GameService<S, T, P, N>
where
    S: GameStore,
    T: OutcomeTable,
    P: WinProbabilityModel,
    N: Notifier,
{
    pub fn new(store: S, table: T, model: P, notifier: N) -> Self {
        Self::with_rng(store, table, model, notifier, ChaCha8Rng::from_entropy())
    }

    /// Seeded constructor for deterministic coin tosses in tests.
    pub fn with_rng(store: S, table: T, model: P, notifier: N, rng: ChaCha8Rng) -> Self {
        Self {
            store,
            table,
            model,
            notifier,
            locks: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn create_game(&self, home: TeamProfile, away: TeamProfile) -> Result<Game> {
        let game = Game::new(GameId::new(), home, away);
        self.store.save_game(&game)?;
        info!(game_id = %game.id, "game created");
        Ok(game)
    }

    pub fn get_game(&self, game_id: GameId) -> Result<Game> {
        self.store
            .get_game(game_id)?
            .ok_or_else(|| GameError::GameNotFound(game_id.to_string()))
    }

    /// Defensive number submission: creates the pending play.
    pub fn submit_defensive_number(
        &self,
        game_id: GameId,
        sub: DefensiveSubmission,
    ) -> Result<Play> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        if self.store.get_pending_play(game_id)?.is_some() {
            return Err(GameError::PendingPlayExists);
        }
        let play = begin_play(&mut game, &sub, Utc::now()).map_err(|err| {
            trace_rejection(game_id, &err);
            err
        })?;
        self.store.save_resolved(&game, &play)?;
        debug!(game_id = %game_id, play_id = %play.id, "defensive number sealed");
        Ok(play)
    }

    /// Offensive submission: resolves the pending play.
    pub fn submit_offensive_number(
        &self,
        game_id: GameId,
        sub: OffensiveSubmission,
    ) -> Result<Play> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        let mut play = self
            .store
            .get_pending_play(game_id)?
            .ok_or(GameError::NoPendingPlay)?;

        let previous = self.store.get_previous_finished_play(game_id)?;
        let res = resolve_play(&mut game, &mut play, &sub, &self.table, Utc::now()).map_err(
            |err| {
                trace_rejection(game_id, &err);
                err
            },
        )?;

        // The predictor must never fail a play.
        let features = GameFeatures::from_game(&game);
        let (probability, delta) = match self.model.predict(&features) {
            Ok(p) => {
                let p = p.clamp(0.0, 1.0);
                let base = previous
                    .as_ref()
                    .map(|q| q.win_probability)
                    .unwrap_or(NEUTRAL_PROBABILITY);
                (p, p - base)
            }
            Err(err) => {
                warn!(game_id = %game_id, error = %err, "predictor failed, using neutral");
                (NEUTRAL_PROBABILITY, 0.0)
            }
        };
        play.win_probability = probability;
        play.win_probability_delta = delta;

        self.store.save_resolved(&game, &play)?;
        info!(
            game_id = %game_id,
            play_id = %play.id,
            result = ?res.result,
            yards = res.yards,
            "play resolved"
        );

        // Post-commit, best-effort side effects.
        if let Err(err) = self.notifier.play_sealed(&game, &play) {
            warn!(game_id = %game_id, error = %err, "play notification failed");
        }
        if game.status == GameStatus::Final {
            // Completed games never submit again; their lock entry can go.
            self.evict_lock(game_id);
            if let Err(err) = self.notifier.game_ended(&game) {
                warn!(game_id = %game_id, error = %err, "game-end notification failed");
            }
        }
        if let Err(err) = self.notifier.statistics_invalidated(game_id) {
            warn!(game_id = %game_id, error = %err, "statistics trigger failed");
        }
        Ok(play)
    }

    /// Undo the most recent submission. A pending play is simply discarded;
    /// a finished play is reversed exactly and deleted.
    pub fn rollback(&self, game_id: GameId) -> Result<Game> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;

        if let Some(pending) = self.store.get_pending_play(game_id)? {
            self.store.delete_play(pending.id)?;
            game.waiting_on = game.possession.opponent();
            game.current_play_id = self
                .store
                .get_previous_finished_play(game_id)?
                .map(|p| p.id);
            self.store.save_game(&game)?;
            info!(game_id = %game_id, play_id = %pending.id, "pending play discarded");
            return Ok(game);
        }

        let play = self
            .store
            .get_previous_finished_play(game_id)?
            .ok_or_else(|| GameError::RollbackUnavailable("no play to roll back".into()))?;
        rollback_play(&mut game, &play)?;
        self.store.delete_play(play.id)?;
        game.current_play_id = self
            .store
            .get_previous_finished_play(game_id)?
            .map(|p| p.id);
        self.store.save_game(&game)?;
        info!(game_id = %game_id, play_id = %play.id, "play rolled back");

        if let Err(err) = self.notifier.statistics_invalidated(game_id) {
            warn!(game_id = %game_id, error = %err, "statistics trigger failed");
        }
        Ok(game)
    }

    /// Pregame or overtime coin toss, depending on phase.
    pub fn run_coin_toss(
        &self,
        game_id: GameId,
        caller: TeamSide,
        call: CoinSide,
    ) -> Result<TeamSide> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let winner = match game.status {
            GameStatus::Pregame => run_pregame_toss(&mut game, caller, call, &mut *rng)?,
            GameStatus::EndOfRegulation => run_overtime_toss(&mut game, caller, call, &mut *rng)?,
            _ => return Err(GameError::InvalidStatus(format!("{:?}", game.status))),
        };
        self.store.save_game(&game)?;
        info!(game_id = %game_id, winner = ?winner, "coin toss run");
        Ok(winner)
    }

    pub fn make_coin_toss_choice(
        &self,
        game_id: GameId,
        chooser: TeamSide,
        choice: TossChoice,
    ) -> Result<Game> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        apply_pregame_choice(&mut game, chooser, choice, Utc::now())?;
        self.store.save_game(&game)?;
        info!(game_id = %game_id, choice = ?choice, "opening toss choice made");
        Ok(game)
    }

    pub fn make_overtime_coin_toss_choice(
        &self,
        game_id: GameId,
        chooser: TeamSide,
        choice: OvertimeChoice,
    ) -> Result<Game> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        apply_overtime_choice(&mut game, chooser, choice, Utc::now())?;
        self.store.save_game(&game)?;
        info!(game_id = %game_id, choice = ?choice, "overtime toss choice made");
        Ok(game)
    }

    /// Charge a non-responding side: eight points to the opponent, recorded
    /// as a finished administrative play. A pending play blocks the charge;
    /// roll the stalled submission back first.
    pub fn charge_delay_of_game(&self, game_id: GameId, offender: TeamSide) -> Result<Game> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut game = self.get_game(game_id)?;
        if game.status == GameStatus::Final {
            return Err(GameError::InvalidStatus(format!("{:?}", game.status)));
        }
        if self.store.get_pending_play(game_id)?.is_some() {
            return Err(GameError::PendingPlayExists);
        }

        let id = PlayId::new();
        let mut play = Play::pending(id, &game, String::new(), false, None, Utc::now());
        game.add_score(offender.opponent(), DELAY_OF_GAME_POINTS);
        match offender {
            TeamSide::Home => game.home_delay_of_game += 1,
            TeamSide::Away => game.away_delay_of_game += 1,
        }
        game.current_play_id = Some(id);
        recompute_flags(&mut game);

        play.result = Some(PlayResult::DelayOfGame);
        play.penalized = Some(offender);
        play.home_score_after = game.home_score;
        play.away_score_after = game.away_score;
        play.finished = true;

        self.store.save_resolved(&game, &play)?;
        info!(game_id = %game_id, offender = ?offender, "delay of game charged");
        if let Err(err) = self.notifier.statistics_invalidated(game_id) {
            warn!(game_id = %game_id, error = %err, "statistics trigger failed");
        }
        Ok(game)
    }

    fn lock_for(&self, game_id: GameId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(game_id).or_default().clone()
    }

    fn evict_lock(&self, game_id: GameId) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.remove(&game_id);
    }

    #[cfg(test)]
    fn lock_count(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.len()
    }
}
