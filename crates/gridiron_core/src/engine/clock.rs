//! Clock runoff accounting
//!
//! Runoff is the game-clock cost of a play, separate from the play's own
//! duration. It depends on the call, the offense's pacing hint, whether the
//! clock was already stopped at the snap, and whether a timeout was charged.

use crate::models::{OffensivePlaybook, PlayCall, RunoffHint};

/// Seconds a hurry-up snap burns.
const HURRY_RUNOFF: u16 = 7;
/// Seconds a clock-chewing snap burns.
const CHEW_RUNOFF: u16 = 30;
/// Spike against a running clock.
const SPIKE_RUNOFF: u16 = 3;
/// Spike against a stopped clock (the snap itself still takes a beat).
const SPIKE_STOPPED_RUNOFF: u16 = 1;
/// A kneel drains the full play clock.
const KNEEL_RUNOFF: u16 = 40;

/// Game-clock seconds consumed by a play.
///
/// `clock_was_stopped` reflects the pre-snap clock; `timeout_charged` means a
/// timeout was consumed on this play (which freezes the clock regardless).
pub fn runoff_seconds(
    call: PlayCall,
    hint: RunoffHint,
    playbook: OffensivePlaybook,
    clock_seconds: u16,
    clock_was_stopped: bool,
    timeout_charged: bool,
) -> u16 {
    if clock_was_stopped || timeout_charged {
        return match call {
            PlayCall::Spike => SPIKE_STOPPED_RUNOFF,
            _ => 0,
        };
    }
    match call {
        PlayCall::Spike => SPIKE_RUNOFF,
        PlayCall::Kneel => KNEEL_RUNOFF,
        _ => match hint {
            RunoffHint::Hurry => HURRY_RUNOFF,
            RunoffHint::Chew => CHEW_RUNOFF,
            RunoffHint::Final => clock_seconds.clamp(1, 30),
            RunoffHint::Normal => playbook.normal_runoff_seconds(),
        },
    }
}

/// Whether a runoff would carry the clock past zero, which in quarters 2 and
/// 4 wipes the play and forces an end-of-half outcome.
pub fn exhausts_half(clock_seconds: u16, runoff: u16, quarter: u8) -> bool {
    runoff > clock_seconds && (quarter == 2 || quarter == 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PB: OffensivePlaybook = OffensivePlaybook::Pro;

    #[test]
    fn stopped_clock_burns_nothing() {
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Normal, PB, 300, true, false),
            0
        );
        assert_eq!(
            runoff_seconds(PlayCall::Kneel, RunoffHint::Chew, PB, 300, true, false),
            0
        );
        // except the spike snap itself
        assert_eq!(
            runoff_seconds(PlayCall::Spike, RunoffHint::Normal, PB, 300, true, false),
            1
        );
    }

    #[test]
    fn timeout_freezes_the_clock() {
        assert_eq!(
            runoff_seconds(PlayCall::Pass, RunoffHint::Chew, PB, 300, false, true),
            0
        );
    }

    #[test]
    fn running_clock_runoffs() {
        assert_eq!(
            runoff_seconds(PlayCall::Spike, RunoffHint::Normal, PB, 300, false, false),
            3
        );
        assert_eq!(
            runoff_seconds(PlayCall::Kneel, RunoffHint::Normal, PB, 300, false, false),
            40
        );
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Hurry, PB, 300, false, false),
            7
        );
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Chew, PB, 300, false, false),
            30
        );
    }

    #[test]
    fn final_hint_drains_up_to_thirty() {
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Final, PB, 12, false, false),
            12
        );
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Final, PB, 200, false, false),
            30
        );
        // never zero, even at 0 on the clock
        assert_eq!(
            runoff_seconds(PlayCall::Run, RunoffHint::Final, PB, 0, false, false),
            1
        );
    }

    #[test]
    fn end_of_half_only_in_even_quarters() {
        assert!(exhausts_half(5, 10, 2));
        assert!(exhausts_half(5, 10, 4));
        assert!(!exhausts_half(5, 10, 1));
        assert!(!exhausts_half(5, 10, 3));
        // exactly reaching zero lets the play stand
        assert!(!exhausts_half(10, 10, 4));
    }

    proptest! {
        /// Property: with a running clock, no timeout and a NORMAL hint, the
        /// runoff is exactly the playbook constant, never zero.
        #[test]
        fn prop_normal_runoff_is_playbook_constant(clock in 0u16..=420) {
            for pb in [
                OffensivePlaybook::AirRaid,
                OffensivePlaybook::Spread,
                OffensivePlaybook::Pro,
                OffensivePlaybook::Option,
                OffensivePlaybook::Flexbone,
            ] {
                let runoff =
                    runoff_seconds(PlayCall::Run, RunoffHint::Normal, pb, clock, false, false);
                prop_assert_eq!(runoff, pb.normal_runoff_seconds());
                prop_assert!([10, 13, 15, 17, 20].contains(&runoff));
            }
        }
    }
}
