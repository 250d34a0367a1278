//! Dispatch scheduling in the store's local time.

use std::sync::Arc;

use alero::dispatch::{DispatchError, DispatchQuote, DispatchRules};
use jiff::{Timestamp, tz::TimeZone};

/// Default store time zone.
pub const DEFAULT_TIME_ZONE: &str = "America/Santiago";

/// Resolves dispatch quotes against the configured rule table.
#[derive(Debug, Clone)]
pub struct DispatchService {
    rules: Arc<DispatchRules>,
    time_zone: TimeZone,
}

impl DispatchService {
    #[must_use]
    pub fn new(rules: DispatchRules, time_zone: TimeZone) -> Self {
        Self {
            rules: Arc::new(rules),
            time_zone,
        }
    }

    /// Quote the next dispatch slot for `category` as seen at instant `at`.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the matched rule cannot produce a date.
    pub fn quote(&self, category: &str, at: Timestamp) -> Result<DispatchQuote, DispatchError> {
        let now = at.to_zoned(self.time_zone.clone()).datetime();

        self.rules.quote(category, now)
    }

    #[must_use]
    pub fn rules(&self) -> &DispatchRules {
        &self.rules
    }

    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }
}

impl Default for DispatchService {
    fn default() -> Self {
        Self::new(
            DispatchRules::standard(),
            TimeZone::get(DEFAULT_TIME_ZONE).unwrap_or(TimeZone::UTC),
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn service() -> Result<DispatchService, jiff::Error> {
        Ok(DispatchService::new(
            DispatchRules::standard(),
            TimeZone::get(DEFAULT_TIME_ZONE)?,
        ))
    }

    #[test]
    fn converts_instant_to_store_local_time() -> TestResult {
        // 13:00 UTC on Wed 21 Oct 2026 is 10:00 in Santiago (UTC-3).
        let at: Timestamp = "2026-10-21T13:00:00Z".parse()?;

        let quote = service()?.quote("Policarbonato Alveolar", at)?;

        assert_eq!(quote.rule_key, "policarbonato");
        assert_eq!(quote.date, date(2026, 10, 22));

        Ok(())
    }

    #[test]
    fn thursday_morning_local_is_same_day() -> TestResult {
        // 11:00 local on Thu 22 Oct 2026, before the 12:00 cutoff.
        let at: Timestamp = "2026-10-22T14:00:00Z".parse()?;

        let quote = service()?.quote("policarbonato compacto", at)?;

        assert_eq!(quote.date, date(2026, 10, 22));

        Ok(())
    }

    #[test]
    fn cutoff_is_checked_against_local_hour() -> TestResult {
        // 13:00 UTC on Thu 22 Oct is 10:00 in Santiago: before the perfil cutoff locally,
        // past it in UTC.
        let at: Timestamp = "2026-10-22T13:00:00Z".parse()?;

        let local = service()?.quote("Perfil U", at)?;
        let utc = DispatchService::new(DispatchRules::standard(), TimeZone::UTC)
            .quote("Perfil U", at)?;

        assert_eq!(local.rule_key, "perfil");
        assert_eq!(local.date, date(2026, 10, 22));
        assert_eq!(utc.date, date(2026, 10, 27));

        Ok(())
    }

    #[test]
    fn unknown_category_uses_default_rule() -> TestResult {
        let at: Timestamp = "2026-10-18T15:00:00Z".parse()?;

        let quote = service()?.quote("Herramientas", at)?;

        assert_eq!(quote.rule_key, "default");
        assert_eq!(quote.date, date(2026, 10, 22));

        Ok(())
    }
}
