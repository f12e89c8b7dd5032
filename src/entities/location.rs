use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Landmark,
    Park,
    Airport,
    Transit,
    Area,
    Current,
}

impl Category {
    /// Icon name shown next to a candidate. Categories without a dedicated
    /// icon get the generic marker.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Landmark => "landmark",
            Self::Park => "tree",
            Self::Airport => "plane",
            Self::Transit => "train",
            Self::Area | Self::Current => "map-marker-alt",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub category: Category,
    pub coordinates: Option<Coordinates>,
}

impl LocationRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        category: Category,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            category,
            coordinates,
        }
    }

    /// Synthetic candidate offered when a lookup fails.
    pub fn use_current_location() -> Self {
        Self::new(
            "current",
            "Use Current Location",
            "Detect your current position",
            Category::Current,
            None,
        )
    }

    /// `needle` is expected in lower case already.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }
}
