//! Point of interest model

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::category::{self, CategoryInfo};

/// A point of interest returned by a radius query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub name: String,
    pub coordinate: Coordinate,
    /// Provider content type id
    pub category_id: u32,
}

impl Poi {
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: Coordinate, category_id: u32) -> Self {
        Self {
            name: name.into(),
            coordinate,
            category_id,
        }
    }

    /// Display metadata for this POI's category
    #[must_use]
    pub fn category(&self) -> CategoryInfo {
        category::classify(self.category_id)
    }
}

/// A POI paired with its category metadata, ready for list and map display
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedPoi {
    #[serde(flatten)]
    pub poi: Poi,
    pub category: CategoryInfo,
}

impl From<Poi> for ClassifiedPoi {
    fn from(poi: Poi) -> Self {
        let category = poi.category();
        Self { poi, category }
    }
}
