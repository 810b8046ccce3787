//! Play Resolution Engine
//!
//! Turns a (defensive number, offensive number, play call) triple plus
//! pre-play game state into a fully resolved play: closeness scoring, clock
//! runoff, family-specific outcome mapping, and score/field/possession
//! updates. Game-level phase changes live in [`crate::phase`].

pub mod clock;
pub mod closeness;
pub mod resolve;
pub mod submission;

pub use closeness::{closeness, FOLD_LIMIT, NUMBER_MAX};
pub use resolve::Resolution;
pub use submission::{begin_play, resolve_play, DefensiveSubmission, OffensiveSubmission};
