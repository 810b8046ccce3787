//! Game Phase Controller
//!
//! State not local to a single play: coin tosses, quarter/half/overtime
//! transitions, observational flags, and the exact-inverse rollback.

pub mod coin_toss;
pub mod rollback;
pub mod transitions;

pub use coin_toss::{
    apply_overtime_choice, apply_pregame_choice, run_overtime_toss, run_pregame_toss,
};
pub use rollback::{rollback_play, DELAY_OF_GAME_POINTS};
pub use transitions::{advance_after_play, recompute_flags};
