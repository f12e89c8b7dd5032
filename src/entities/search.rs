use serde::{Deserialize, Serialize};

use crate::entities::{LocationRecord, SearchRole};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "candidates", rename_all = "snake_case")]
pub enum ResultList {
    Candidates(Vec<LocationRecord>),
    NoResults,
}

impl ResultList {
    pub const NO_RESULTS_TITLE: &'static str = "No locations found";
    pub const NO_RESULTS_HINT: &'static str = "Try a different search term";

    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        match records.is_empty() {
            true => Self::NoResults,
            false => Self::Candidates(records),
        }
    }

    /// Selectable entries; the placeholder has none.
    pub fn candidates(&self) -> &[LocationRecord] {
        match self {
            Self::Candidates(records) => records,
            Self::NoResults => &[],
        }
    }

    pub fn candidate(&self, index: usize) -> Option<&LocationRecord> {
        self.candidates().get(index)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Searching { request: u64 },
    ResultsShown { results: ResultList },
    Selected { record: LocationRecord },
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

impl Phase {
    pub fn name(&self) -> String {
        match self {
            Self::Idle => "idle".into(),
            Self::Searching { request: _ } => "searching".into(),
            Self::ResultsShown { results: _ } => "results_shown".into(),
            Self::Selected { record: _ } => "selected".into(),
        }
    }

    pub fn results(&self) -> Option<&ResultList> {
        match self {
            Self::ResultsShown { results } => Some(results),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub role: SearchRole,
    pub name: String,
}

impl Confirmation {
    pub fn message(&self) -> String {
        format!("📍 {} set to {}", self.role, self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
    Warning,
}
