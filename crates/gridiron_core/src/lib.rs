//! # gridiron_core - Turn-Based Football Duel Engine
//!
//! This library runs persistent, turn-based football games between two
//! remote participants. Each down both sides commit a hidden number; the
//! closeness of the two numbers drives a table lookup that decides the play.
//!
//! ## Features
//! - Sealed defensive submissions (the offense can never read them early)
//! - Five play families: scrimmage, field goal, punt, kickoff, point-after
//! - Full phase control: coin tosses, halves, multi-round overtime
//! - Exact-inverse rollback of any mistaken submission
//! - Pluggable storage, outcome-table, predictor and notifier collaborators

// Game state APIs carry many fields by nature
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod phase;
pub mod predictor;
pub mod secrecy;
pub mod service;
pub mod storage;
pub mod table;

pub use engine::{begin_play, resolve_play, DefensiveSubmission, OffensiveSubmission};
pub use error::{GameError, Result};
pub use models::{
    CoinSide, Game, GameId, GameStatus, OvertimeChoice, Play, PlayCall, PlayFamily, PlayId,
    PlayResult, RawOutcome, RunoffHint, TableOutcome, TeamProfile, TeamSide, TossChoice,
};
pub use notify::{Notifier, NullNotifier};
pub use predictor::{GameFeatures, NeutralModel, WinProbabilityModel};
pub use service::GameService;
pub use storage::{GameStore, MemoryStore};
pub use table::OutcomeTable;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
