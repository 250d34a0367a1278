//! Dispatch rule table

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{DispatchError, WeekdaySet};

/// Key reported for the fallback rule.
pub const DEFAULT_RULE_KEY: &str = "default";

/// Informational dispatch window, in whole local hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First hour of the window
    pub start_hour: i8,

    /// Hour the window closes
    pub end_hour: i8,
}

impl TimeWindow {
    /// Create a new window.
    pub const fn new(start_hour: i8, end_hour: i8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }
}

/// Dispatch rule for one product category keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRule {
    /// Keyword matched (case-insensitively) against category labels
    pub key: String,

    /// Weekdays goods in this category leave the warehouse
    pub weekdays: WeekdaySet,

    /// Window shown to the customer
    pub window: TimeWindow,

    /// Same-day dispatch is offered only before this hour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_hour: Option<i8>,
}

impl DispatchRule {
    fn validate(&self) -> Result<(), DispatchError> {
        let hours = [
            Some(self.window.start_hour),
            Some(self.window.end_hour),
            self.cutoff_hour,
        ];

        if let Some(hour) = hours.into_iter().flatten().find(|h| !(0..=23).contains(h)) {
            return Err(DispatchError::InvalidHour {
                key: self.key.clone(),
                hour,
            });
        }

        if self.window.start_hour >= self.window.end_hour {
            return Err(DispatchError::InvalidWindow {
                key: self.key.clone(),
                start: self.window.start_hour,
                end: self.window.end_hour,
            });
        }

        Ok(())
    }

    fn matches(&self, category: &str) -> bool {
        category.contains(&self.key.to_lowercase())
    }
}

/// Ordered dispatch rules with a mandatory fallback.
///
/// Built once at start-up and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRules {
    rules: Vec<DispatchRule>,
    default: DispatchRule,
}

impl DispatchRules {
    /// Create a validated rule table.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if any rule has an empty key or invalid hours.
    pub fn new(rules: Vec<DispatchRule>, default: DispatchRule) -> Result<Self, DispatchError> {
        let table = Self { rules, default };

        table.validate()?;

        Ok(table)
    }

    /// The built-in rule table.
    ///
    /// Accessories ship on working days, profiles twice a week, and sheeting (and
    /// anything unrecognised) on Thursdays with a noon cutoff.
    pub fn standard() -> Self {
        let thursday = WeekdaySet::from_days([4]).unwrap_or(WeekdaySet::weekdays());
        let tuesday_thursday = WeekdaySet::from_days([2, 4]).unwrap_or(thursday);

        Self {
            rules: vec![
                DispatchRule {
                    key: "accesorio".to_string(),
                    weekdays: WeekdaySet::weekdays(),
                    window: TimeWindow::new(9, 18),
                    cutoff_hour: Some(14),
                },
                DispatchRule {
                    key: "perfil".to_string(),
                    weekdays: tuesday_thursday,
                    window: TimeWindow::new(9, 13),
                    cutoff_hour: Some(12),
                },
                DispatchRule {
                    key: "policarbonato".to_string(),
                    weekdays: thursday,
                    window: TimeWindow::new(9, 13),
                    cutoff_hour: Some(12),
                },
            ],
            default: DispatchRule {
                key: DEFAULT_RULE_KEY.to_string(),
                weekdays: thursday,
                window: TimeWindow::new(9, 13),
                cutoff_hour: Some(12),
            },
        }
    }

    /// Parse and validate a rule table from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Yaml`] for malformed documents, or a validation error.
    pub fn from_yaml(yaml: &str) -> Result<Self, DispatchError> {
        let table: Self = serde_norway::from_str(yaml)?;

        table.validate()?;

        Ok(table)
    }

    /// Load a rule table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Io`] if the file cannot be read, otherwise as
    /// [`DispatchRules::from_yaml`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DispatchError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| DispatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&contents)
    }

    /// The rule for a category label: first keyed rule whose key is contained in the
    /// label (ignoring case), otherwise the fallback.
    pub fn rule_for(&self, category: &str) -> &DispatchRule {
        let category = category.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&category))
            .unwrap_or(&self.default)
    }

    /// Keyed rules, in match order.
    pub fn rules(&self) -> &[DispatchRule] {
        &self.rules
    }

    /// The fallback rule.
    pub fn default_rule(&self) -> &DispatchRule {
        &self.default
    }

    fn validate(&self) -> Result<(), DispatchError> {
        for rule in &self.rules {
            if rule.key.trim().is_empty() {
                return Err(DispatchError::EmptyKey);
            }

            rule.validate()?;
        }

        self.default.validate()
    }
}

impl Default for DispatchRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const RULES_YAML: &str = r"
rules:
  - key: Alveolar
    weekdays: [1, 4]
    window: { start_hour: 8, end_hour: 12 }
    cutoff_hour: 10
  - key: policarbonato
    weekdays: [4]
    window: { start_hour: 9, end_hour: 13 }
default:
  key: default
  weekdays: [5]
  window: { start_hour: 9, end_hour: 17 }
";

    #[test]
    fn first_matching_key_wins() -> TestResult {
        let rules = DispatchRules::from_yaml(RULES_YAML)?;

        assert_eq!(rules.rule_for("Policarbonato ALVEOLAR 6mm").key, "Alveolar");
        assert_eq!(rules.rule_for("Policarbonato compacto").key, "policarbonato");

        Ok(())
    }

    #[test]
    fn unmatched_category_uses_default() -> TestResult {
        let rules = DispatchRules::from_yaml(RULES_YAML)?;

        let rule = rules.rule_for("Tornillos");

        assert_eq!(rule.key, DEFAULT_RULE_KEY);
        assert_eq!(rule.cutoff_hour, None);

        Ok(())
    }

    #[test]
    fn empty_category_uses_default() {
        let rules = DispatchRules::standard();

        assert_eq!(rules.rule_for("").key, DEFAULT_RULE_KEY);
    }

    #[test]
    fn standard_table_is_valid() -> TestResult {
        let standard = DispatchRules::standard();

        let rebuilt = DispatchRules::new(standard.rules().to_vec(), standard.default_rule().clone())?;

        assert_eq!(rebuilt, standard);

        Ok(())
    }

    #[test]
    fn rejects_invalid_hours() {
        let yaml = RULES_YAML.replace("cutoff_hour: 10", "cutoff_hour: 24");

        let result = DispatchRules::from_yaml(&yaml);

        assert!(
            matches!(result, Err(DispatchError::InvalidHour { hour: 24, .. })),
            "expected InvalidHour, got {result:?}"
        );
    }

    #[test]
    fn rejects_inverted_window() {
        let yaml = RULES_YAML.replace("start_hour: 8, end_hour: 12", "start_hour: 12, end_hour: 8");

        let result = DispatchRules::from_yaml(&yaml);

        assert!(matches!(result, Err(DispatchError::InvalidWindow { .. })));
    }

    #[test]
    fn rejects_empty_weekdays() {
        let yaml = RULES_YAML.replace("weekdays: [5]", "weekdays: []");

        assert!(DispatchRules::from_yaml(&yaml).is_err());
    }

    #[test]
    fn rejects_blank_keys() {
        let yaml = RULES_YAML.replace("key: policarbonato", "key: \"  \"");

        let result = DispatchRules::from_yaml(&yaml);

        assert!(matches!(result, Err(DispatchError::EmptyKey)));
    }

    #[test]
    fn missing_file_reports_path() {
        let result = DispatchRules::from_path("./does/not/exist.yaml");

        assert!(matches!(result, Err(DispatchError::Io { .. })));
    }
}
