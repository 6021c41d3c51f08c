use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for registered systems.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemId(pub String);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Community-assessed security posture of a registered system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Critical,
    Moderate,
    Secure,
}

impl SystemStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SystemStatus::Critical => "critical",
            SystemStatus::Moderate => "moderate",
            SystemStatus::Secure => "secure",
        }
    }
}

/// One registered legacy-system entry.
///
/// Records are immutable values supplied by the data source; the filter engine
/// only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub id: SystemId,
    pub name: String,
    pub vendor: String,
    pub installation_year: u16,
    pub platform: String,
    pub purpose: String,
    pub last_patch: NaiveDate,
    #[serde(default)]
    pub known_issues: Vec<String>,
    pub fix_count: u32,
    pub status: SystemStatus,
    pub institution: String,
}

/// The "all"-or-specific choice backing one categorical filter control.
///
/// Serialized as the literal string `"all"` or the selected value, matching
/// the query-parameter shape the directory view submits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact, case-sensitive match against a candidate field value.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == "all" {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::All => serializer.serialize_str("all"),
            Selection::Only(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Selection::from(raw.as_str()))
    }
}

/// The combined set of currently active search/filter inputs.
///
/// Owned by the active view session; the engine receives it as a read-only
/// snapshot so filtering stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub vendor: Selection,
    #[serde(default)]
    pub status: Selection,
    #[serde(default)]
    pub year: Selection,
}

impl FilterCriteria {
    /// True when every field sits at its default, i.e. the view is in its
    /// idle state and must show the full collection.
    pub fn is_idle(&self) -> bool {
        self.search_text.is_empty()
            && self.vendor.is_all()
            && self.status.is_all()
            && self.year.is_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_are_idle() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_idle());
    }

    #[test]
    fn any_field_write_leaves_idle() {
        let criteria = FilterCriteria {
            vendor: Selection::only("Greenstone"),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_idle());

        let criteria = FilterCriteria {
            search_text: "archive".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_idle());
    }

    #[test]
    fn selection_round_trips_through_serde() {
        let all: Selection = serde_json::from_str("\"all\"").expect("all parses");
        assert_eq!(all, Selection::All);

        let vendor: Selection = serde_json::from_str("\"Greenstone\"").expect("vendor parses");
        assert_eq!(vendor, Selection::only("Greenstone"));

        assert_eq!(
            serde_json::to_string(&Selection::All).expect("serializes"),
            "\"all\""
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&SystemStatus::Critical).expect("serializes");
        assert_eq!(json, "\"critical\"");
        assert_eq!(SystemStatus::Secure.label(), "secure");
    }
}
