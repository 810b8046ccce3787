//! Outcome table collaborator
//!
//! The table maps play context plus a closeness score to a raw outcome code
//! and a play duration. Its contents are configuration data maintained
//! outside the engine; a missing row is a configuration defect and is
//! surfaced as [`GameError::TableMiss`](crate::error::GameError::TableMiss),
//! never silently defaulted.

use crate::error::Result;
use crate::models::{DefensivePlaybook, OffensivePlaybook, PlayCall, TableOutcome};

pub trait OutcomeTable: Send + Sync {
    /// Normal scrimmage plays key off the call and the scheme matchup.
    fn lookup_normal(
        &self,
        call: PlayCall,
        offense: OffensivePlaybook,
        defense: DefensivePlaybook,
        closeness: u16,
    ) -> Result<TableOutcome>;

    /// Field goals key off attempt distance (`100 - ball_location + 17`).
    fn lookup_field_goal(&self, distance: u8, closeness: u16) -> Result<TableOutcome>;

    /// Punts key off the raw ball location.
    fn lookup_punt(&self, ball_location: u8, closeness: u16) -> Result<TableOutcome>;

    /// Kickoffs and point-after attempts key off closeness alone.
    fn lookup_non_normal(&self, call: PlayCall, closeness: u16) -> Result<TableOutcome>;
}
