//! POI category classification
//!
//! Maps provider content type ids to display metadata. Ids outside the
//! table are kept and classified into a neutral `Uncategorized` bucket, so
//! every fetched POI shows up in lists, map markers, the legend and grouped
//! counts alike.

use serde::Serialize;

/// Content type id the provider uses for lodging. Competing lodging is never
/// treated as a point of interest.
pub const OTHER_LODGING: u32 = 80;

pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
const UNCATEGORIZED_COLOR: &str = "#808080";
const UNCATEGORIZED_ICON: &str = "question-sign";

/// Display metadata for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: u32,
    pub display_name: &'static str,
    /// Marker color as a hex string
    pub color: &'static str,
    /// Font Awesome icon name
    pub icon: &'static str,
}

impl CategoryInfo {
    const fn known(
        id: u32,
        display_name: &'static str,
        color: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id,
            display_name,
            color,
            icon,
        }
    }

    /// Whether this entry is the fallback bucket
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.display_name == UNCATEGORIZED_NAME
    }
}

const CATEGORIES: [CategoryInfo; 8] = [
    CategoryInfo::known(75, "Leports", "#32CD32", "fire"),
    CategoryInfo::known(76, "Tourist attraction", "#1E90FF", "flag"),
    CategoryInfo::known(77, "Transportation", "#00CED1", "plane"),
    CategoryInfo::known(78, "Cultural facility", "#9370DB", "camera"),
    CategoryInfo::known(79, "Shopping", "#FFB347", "shopping-cart"),
    CategoryInfo::known(OTHER_LODGING, "Other lodging", "#A9A9A9", "home"),
    CategoryInfo::known(82, "Restaurant", "#FF69B4", "cutlery"),
    CategoryInfo::known(85, "Festival/performance/event", "#4682B4", "music"),
];

/// Look up a category id, falling back to the uncategorized bucket
#[must_use]
pub fn classify(category_id: u32) -> CategoryInfo {
    CATEGORIES
        .iter()
        .find(|info| info.id == category_id)
        .copied()
        .unwrap_or(CategoryInfo {
            id: category_id,
            display_name: UNCATEGORIZED_NAME,
            color: UNCATEGORIZED_COLOR,
            icon: UNCATEGORIZED_ICON,
        })
}

/// The known categories in table order, for map legends
#[must_use]
pub fn legend() -> &'static [CategoryInfo] {
    &CATEGORIES
}
