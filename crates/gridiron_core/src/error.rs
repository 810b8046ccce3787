use thiserror::Error;

use crate::models::{PlayCall, PlayFamily, TeamSide};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Play not found: {0}")]
    PlayNotFound(String),

    #[error("Phase violation: {call:?} submitted while expecting a {expected:?} play")]
    PhaseViolation { expected: PlayFamily, call: PlayCall },

    #[error("Phase violation: game is in {0}")]
    InvalidStatus(String),

    #[error("Number required for {0:?}")]
    MissingNumber(PlayCall),

    #[error("Number out of range: {0}")]
    InvalidNumber(u16),

    #[error("A pending play already exists for this game")]
    PendingPlayExists,

    #[error("No pending play exists for this game")]
    NoPendingPlay,

    #[error("Submission expected from {expected:?}, got {got:?}")]
    WrongSubmitter { expected: TeamSide, got: TeamSide },

    #[error("Outcome table miss: {0}")]
    TableMiss(String),

    #[error("Nothing to roll back: {0}")]
    RollbackUnavailable(String),

    #[error("Sealed number is unreadable: {0}")]
    Codec(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl GameError {
    /// Errors the submitter can fix by correcting the request.
    /// Everything else indicates a configuration or infrastructure defect.
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            GameError::TableMiss(_) | GameError::Codec(_) | GameError::Storage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
