//! Weekday sets

use std::fmt;

use jiff::civil::Weekday;
use serde::{Deserialize, Serialize};

use super::DispatchError;

/// A set of weekdays, numbered 0 (Sunday) through 6 (Saturday).
///
/// Serialised as a sorted list of day numbers, e.g. `[2, 4]` for Tuesday and Thursday.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Build a set from Sunday-zero day numbers.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidWeekday`]: a day number is greater than 6.
    /// - [`DispatchError::EmptyWeekdays`]: no days were given.
    pub fn from_days(days: impl IntoIterator<Item = u8>) -> Result<Self, DispatchError> {
        let bits = days.into_iter().try_fold(0_u8, |bits, day| {
            if day > 6 {
                return Err(DispatchError::InvalidWeekday(day));
            }

            Ok(bits | (1 << day))
        })?;

        if bits == 0 {
            return Err(DispatchError::EmptyWeekdays);
        }

        Ok(Self(bits))
    }

    /// Monday through Friday.
    pub const fn weekdays() -> Self {
        Self(0b0011_1110)
    }

    /// Whether `weekday` is part of the set.
    pub fn contains(self, weekday: Weekday) -> bool {
        u8::try_from(weekday.to_sunday_zero_offset()).is_ok_and(|day| self.0 & (1 << day) != 0)
    }

    /// Day numbers in the set, ascending.
    pub fn days(self) -> impl Iterator<Item = u8> {
        (0..7_u8).filter(move |day| self.0 & (1 << day) != 0)
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = DispatchError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.days().collect()
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.days()).finish()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn contains_uses_sunday_zero_numbering() -> TestResult {
        let set = WeekdaySet::from_days([0, 4])?;

        assert!(set.contains(Weekday::Sunday));
        assert!(set.contains(Weekday::Thursday));
        assert!(!set.contains(Weekday::Monday));
        assert!(!set.contains(Weekday::Saturday));

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_days() {
        let result = WeekdaySet::from_days([1, 7]);

        assert!(matches!(result, Err(DispatchError::InvalidWeekday(7))));
    }

    #[test]
    fn rejects_empty_sets() {
        let no_days: [u8; 0] = [];

        let result = WeekdaySet::from_days(no_days);

        assert!(matches!(result, Err(DispatchError::EmptyWeekdays)));
    }

    #[test]
    fn working_week_excludes_weekend() {
        let set = WeekdaySet::weekdays();

        assert_eq!(set.days().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn deserialises_from_day_list() -> TestResult {
        let set: WeekdaySet = serde_norway::from_str("[4, 2, 4]")?;

        assert_eq!(Vec::from(set), vec![2, 4]);

        Ok(())
    }
}
