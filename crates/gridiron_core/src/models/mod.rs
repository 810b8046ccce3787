pub mod calls;
pub mod game;
pub mod outcome;
pub mod play;

pub use calls::{
    CoinSide, DefensivePlaybook, OffensivePlaybook, OvertimeChoice, PlayCall, PlayFamily,
    RunoffHint, TeamProfile, TeamSide, TossChoice,
};
pub use game::{
    Game, GameId, GameStatus, KICKOFF_SPOT, OVERTIME_SPOT, OVERTIME_TIMEOUTS, POINT_AFTER_SPOT,
    QUARTER_SECONDS, REGULATION_TIMEOUTS, SAFETY_KICK_SPOT,
};
pub use outcome::{PlayResult, RawOutcome, TableOutcome};
pub use play::{GameSnapshot, Play, PlayId};
