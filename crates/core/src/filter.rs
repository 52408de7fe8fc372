//! Episode filter: substring matches on month, color and subject.

use serde::{Deserialize, Serialize};

/// How filter categories combine with each other.
///
/// Values inside one category are always OR-ed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    And,
    Or,
}

impl FilterMode {
    /// Interpret the `mode` query parameter.
    ///
    /// Absent means `And`. Anything other than `and` (case-insensitive) falls back to `Or`.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Self::And,
            Some(v) if v.trim().eq_ignore_ascii_case("and") => Self::And,
            Some(v) => {
                if !v.trim().eq_ignore_ascii_case("or") {
                    tracing::debug!(mode = %v, "unrecognized filter mode, using OR");
                }
                Self::Or
            },
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Selection of episodes by month name, color name and subject name substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeFilter {
    pub months: Vec<String>,
    pub colors: Vec<String>,
    pub subjects: Vec<String>,
    pub mode: FilterMode,
}

impl EpisodeFilter {
    #[must_use]
    pub fn new(mode: FilterMode) -> Self {
        Self { mode, ..Self::default() }
    }

    #[must_use]
    pub fn month(mut self, value: impl Into<String>) -> Self {
        push_value(&mut self.months, value.into());
        self
    }

    #[must_use]
    pub fn color(mut self, value: impl Into<String>) -> Self {
        push_value(&mut self.colors, value.into());
        self
    }

    #[must_use]
    pub fn subject(mut self, value: impl Into<String>) -> Self {
        push_value(&mut self.subjects, value.into());
        self
    }

    /// No category selected: every episode matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty() && self.colors.is_empty() && self.subjects.is_empty()
    }
}

/// Blank values would match everything; they are dropped.
fn push_value(values: &mut Vec<String>, value: String) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        values.push(trimmed.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_and_when_absent() {
        assert_eq!(FilterMode::from_param(None), FilterMode::And);
    }

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!(FilterMode::from_param(Some("AND")), FilterMode::And);
        assert_eq!(FilterMode::from_param(Some("Or")), FilterMode::Or);
    }

    #[test]
    fn unrecognized_mode_falls_back_to_or() {
        assert_eq!(FilterMode::from_param(Some("xor")), FilterMode::Or);
        assert_eq!(FilterMode::from_param(Some("")), FilterMode::Or);
    }

    #[test]
    fn builder_drops_blank_values() {
        let filter = EpisodeFilter::new(FilterMode::Or).month(" January ").month("  ").color("blue");
        assert_eq!(filter.months, vec!["January"]);
        assert_eq!(filter.colors, vec!["blue"]);
        assert!(filter.subjects.is_empty());
        assert!(!filter.is_empty());
        assert!(EpisodeFilter::default().is_empty());
    }
}
