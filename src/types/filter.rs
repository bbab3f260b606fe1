//! Label-based duration filters.
//!
//! A [`DurationFilter`] picks one label of a [`Duration`] (start or end) and
//! tests it against a [`MatchCondition`]. Evaluation is a pure function of
//! the filter and the duration.
//!
//! Filters also have a compact text form, `<target>:<condition>:<value>`,
//! convenient for command-line flags:
//!
//! ```rust
//! use execution_timer::{Duration, DurationFilter};
//!
//! let filter: DurationFilter = "start:regex:^quick.*sort$".parse().unwrap();
//! assert!(filter.matches(&Duration::new(0.1, "quick sort", "")));
//! assert_eq!(filter.to_string(), "start:regex:^quick.*sort$");
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};

use super::Duration;
use crate::error::TimerError;

/// How a label is tested.
#[derive(Debug, Clone)]
pub enum MatchCondition {
    /// Label starts with the string.
    Prefix(String),
    /// Label ends with the string.
    Suffix(String),
    /// Label equals the string.
    Exact(String),
    /// The pattern matches somewhere in the label (search, not full match).
    Regex(Regex),
}

impl MatchCondition {
    /// Compile `pattern` into a [`MatchCondition::Regex`].
    ///
    /// A malformed pattern is reported here, never at match time.
    pub fn regex(pattern: &str) -> Result<Self, TimerError> {
        Ok(MatchCondition::Regex(Regex::new(pattern)?))
    }

    pub fn is_match(&self, label: &str) -> bool {
        match self {
            MatchCondition::Prefix(prefix) => label.starts_with(prefix.as_str()),
            MatchCondition::Suffix(suffix) => label.ends_with(suffix.as_str()),
            MatchCondition::Exact(exact) => label == exact.as_str(),
            MatchCondition::Regex(re) => re.is_match(label),
        }
    }

    fn strategy(&self) -> &'static str {
        match self {
            MatchCondition::Prefix(_) => "prefix",
            MatchCondition::Suffix(_) => "suffix",
            MatchCondition::Exact(_) => "exact",
            MatchCondition::Regex(_) => "regex",
        }
    }

    fn value(&self) -> &str {
        match self {
            MatchCondition::Prefix(s) | MatchCondition::Suffix(s) | MatchCondition::Exact(s) => s,
            MatchCondition::Regex(re) => re.as_str(),
        }
    }
}

// Regexes compare by their source pattern.
impl PartialEq for MatchCondition {
    fn eq(&self, other: &Self) -> bool {
        self.strategy() == other.strategy() && self.value() == other.value()
    }
}

impl Eq for MatchCondition {}

/// Which label of a [`Duration`] a filter looks at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LabelTarget {
    Start,
    End,
}

/// Selects durations by one of their labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationFilter {
    pub condition: MatchCondition,
    pub target: LabelTarget,
}

impl DurationFilter {
    pub fn new(condition: MatchCondition, target: LabelTarget) -> Self {
        DurationFilter { condition, target }
    }

    /// Filter on the label of the mark that opens the duration.
    pub fn start_label(condition: MatchCondition) -> Self {
        Self::new(condition, LabelTarget::Start)
    }

    /// Filter on the label of the mark that closes the duration.
    pub fn end_label(condition: MatchCondition) -> Self {
        Self::new(condition, LabelTarget::End)
    }

    pub fn matches(&self, duration: &Duration) -> bool {
        let label = match self.target {
            LabelTarget::Start => &duration.start_label,
            LabelTarget::End => &duration.end_label,
        };
        self.condition.is_match(label)
    }
}

impl Display for DurationFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}:{}:{}",
            self.target,
            self.condition.strategy(),
            self.condition.value()
        )
    }
}

impl FromStr for DurationFilter {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(target), Some(strategy), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TimerError::InvalidFilter(format!(
                "expected <start|end>:<prefix|suffix|exact|regex>:<value>, got {s:?}"
            )));
        };

        let target: LabelTarget = target
            .parse()
            .map_err(|_| TimerError::InvalidFilter(format!("unknown label target {target:?}")))?;

        let condition = match strategy.to_ascii_lowercase().as_str() {
            "prefix" => MatchCondition::Prefix(value.to_string()),
            "suffix" => MatchCondition::Suffix(value.to_string()),
            "exact" => MatchCondition::Exact(value.to_string()),
            "regex" => MatchCondition::regex(value)?,
            other => {
                return Err(TimerError::InvalidFilter(format!(
                    "unknown match condition {other:?}"
                )));
            }
        };

        Ok(DurationFilter::new(condition, target))
    }
}
