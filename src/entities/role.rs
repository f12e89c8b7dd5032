use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchRole {
    Pickup,
    Destination,
}

impl SearchRole {
    pub const ALL: [SearchRole; 2] = [SearchRole::Pickup, SearchRole::Destination];

    /// Stable key of the role's input and results anchor.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Destination => "destination",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Pickup => 0,
            Self::Destination => 1,
        }
    }
}

impl fmt::Display for SearchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key().to_uppercase())
    }
}
