//! Closeness scoring
//!
//! Both sides submit a number in [1, 1500]. The folded absolute difference
//! measures how close the offense's guess came to the hidden defensive
//! number on a circular scale, so 1 and 1500 are neighbors.

use crate::error::{GameError, Result};

/// Largest submittable number; the scale wraps past it.
pub const NUMBER_MAX: u16 = 1500;
/// Folded differences land in [0, FOLD_LIMIT].
pub const FOLD_LIMIT: u16 = 750;

/// Validate a submitted number.
pub fn check_number(number: u16) -> Result<u16> {
    if number == 0 || number > NUMBER_MAX {
        return Err(GameError::InvalidNumber(number));
    }
    Ok(number)
}

/// Symmetric folded difference between the two submitted numbers.
pub fn closeness(offense: u16, defense: u16) -> u16 {
    let diff = offense.abs_diff(defense);
    if diff > FOLD_LIMIT {
        NUMBER_MAX - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn folding_wraps_large_differences() {
        // 1400 vs 100: raw 1300 folds to 200.
        assert_eq!(closeness(1400, 100), 200);
        assert_eq!(closeness(1, 1500), 1);
        assert_eq!(closeness(1, 751), 750);
        assert_eq!(closeness(600, 600), 0);
    }

    #[test]
    fn range_check() {
        assert!(check_number(0).is_err());
        assert!(check_number(1501).is_err());
        assert_eq!(check_number(1).unwrap(), 1);
        assert_eq!(check_number(1500).unwrap(), 1500);
    }

    proptest! {
        /// Property: closeness is symmetric and bounded by the fold limit.
        #[test]
        fn prop_closeness_symmetric_and_bounded(
            a in 1u16..=NUMBER_MAX,
            b in 1u16..=NUMBER_MAX,
        ) {
            prop_assert_eq!(closeness(a, b), closeness(b, a));
            prop_assert!(closeness(a, b) <= FOLD_LIMIT);
        }
    }
}
