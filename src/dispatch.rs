//! Dispatch scheduling
//!
//! Goods leave the warehouse only on specific weekdays, which depend on the product
//! category. A [`DispatchRules`] table maps category keywords to a [`DispatchRule`], and
//! the rule resolves the next date a purchase made at a given local time can be dispatched.

use std::{io, path::PathBuf};

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod format;
pub mod rules;
pub mod weekdays;

pub use format::{format_dispatch_date, format_window};
pub use rules::{DispatchRule, DispatchRules, TimeWindow};
pub use weekdays::WeekdaySet;

/// How many days the resolver walks forward before giving up.
pub const MAX_LOOKAHEAD_DAYS: u8 = 14;

/// Errors raised while loading dispatch rules or resolving dispatch dates.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A rule was configured without any dispatch weekday.
    #[error("dispatch rule has no weekdays")]
    EmptyWeekdays,

    /// A weekday outside `0..=6` was configured.
    #[error("invalid weekday {0}; expected 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday(u8),

    /// A keyed rule was configured with an empty key.
    #[error("dispatch rule keys cannot be empty")]
    EmptyKey,

    /// An hour outside `0..=23` was configured.
    #[error("rule `{key}` has invalid hour {hour}")]
    InvalidHour {
        /// Rule key
        key: String,
        /// Offending hour
        hour: i8,
    },

    /// The dispatch window does not start before it ends.
    #[error("rule `{key}` window must start before it ends ({start}..{end})")]
    InvalidWindow {
        /// Rule key
        key: String,
        /// Window start hour
        start: i8,
        /// Window end hour
        end: i8,
    },

    /// No eligible weekday was found within the lookahead bound.
    #[error("rule `{key}` produced no dispatch day within {days} days")]
    NoEligibleDay {
        /// Rule key
        key: String,
        /// Days searched
        days: u8,
    },

    /// Walking forward ran off the end of the supported calendar.
    #[error("dispatch date out of range")]
    DateOverflow(#[source] jiff::Error),

    /// Rules file could not be read.
    #[error("failed to read dispatch rules from {path}")]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Rules file is not valid YAML for the rules schema.
    #[error("failed to parse dispatch rules: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// A resolved dispatch slot for a product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchQuote {
    /// Key of the rule that matched (`default` for the fallback rule)
    pub rule_key: String,

    /// Calendar date the goods leave the warehouse
    pub date: Date,

    /// Informational dispatch window
    pub window: TimeWindow,
}

impl DispatchQuote {
    /// Human-readable label, e.g. `jueves 22 de octubre, 09:00 – 13:00`.
    pub fn label(&self) -> String {
        format!(
            "{}, {}",
            format_dispatch_date(self.date),
            format_window(self.window)
        )
    }
}

impl DispatchRules {
    /// Resolve the next dispatch date for a free-text category label.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if the matched rule cannot produce a date within
    /// [`MAX_LOOKAHEAD_DAYS`], which only happens for unvalidated rule tables.
    pub fn next_dispatch_date(&self, category: &str, now: DateTime) -> Result<Date, DispatchError> {
        self.rule_for(category).next_date(now)
    }

    /// Resolve a full [`DispatchQuote`] for a category.
    ///
    /// # Errors
    ///
    /// See [`DispatchRules::next_dispatch_date`].
    pub fn quote(&self, category: &str, now: DateTime) -> Result<DispatchQuote, DispatchError> {
        let rule = self.rule_for(category);

        Ok(DispatchQuote {
            rule_key: rule.key.clone(),
            date: rule.next_date(now)?,
            window: rule.window,
        })
    }
}

impl DispatchRule {
    /// Next date on or after `now` on which this rule dispatches.
    ///
    /// Today only qualifies when it is an allowed weekday, a cutoff hour is configured, and
    /// `now` is before that cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoEligibleDay`] when no allowed weekday exists within
    /// [`MAX_LOOKAHEAD_DAYS`], or [`DispatchError::DateOverflow`] at the end of the calendar.
    pub fn next_date(&self, now: DateTime) -> Result<Date, DispatchError> {
        let today = now.date();

        if self.weekdays.contains(today.weekday()) && self.accepts_same_day(now.hour()) {
            return Ok(today);
        }

        let mut candidate = today;

        for _ in 0..MAX_LOOKAHEAD_DAYS {
            candidate = candidate.tomorrow().map_err(DispatchError::DateOverflow)?;

            if self.weekdays.contains(candidate.weekday()) {
                return Ok(candidate);
            }
        }

        Err(DispatchError::NoEligibleDay {
            key: self.key.clone(),
            days: MAX_LOOKAHEAD_DAYS,
        })
    }

    fn accepts_same_day(&self, hour: i8) -> bool {
        self.cutoff_hour.is_some_and(|cutoff| hour < cutoff)
    }
}
