//! POI fetching with fail-soft semantics
//!
//! A radius query either yields the POIs that parsed cleanly, or, when the
//! provider cannot be reached or answers with garbage, a typed
//! [`PoiLookup::Unavailable`]. Callers that only care about the list use
//! [`PoiLookup::into_pois`], which maps both to a plain (possibly empty)
//! sequence. Only programmer-error input is reported as an `Err`.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::category::OTHER_LODGING;
use crate::models::{Coordinate, Poi};
use crate::tourism::{NumericField, TourItem, TourismProvider};
use crate::{HotelScopeError, Result};

/// Outcome of one radius query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PoiLookup {
    /// The provider answered; the list may be empty
    Found(Vec<Poi>),
    /// The lookup failed and is degraded to no data
    Unavailable { reason: String },
}

impl PoiLookup {
    #[must_use]
    pub fn pois(&self) -> &[Poi] {
        match self {
            PoiLookup::Found(pois) => pois,
            PoiLookup::Unavailable { .. } => &[],
        }
    }

    #[must_use]
    pub fn into_pois(self) -> Vec<Poi> {
        match self {
            PoiLookup::Found(pois) => pois,
            PoiLookup::Unavailable { .. } => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, PoiLookup::Found(_))
    }
}

/// Reject input that can never form a valid radius query
pub fn validate_query(center: &Coordinate, radius_m: u32) -> Result<()> {
    center.validate()?;
    if radius_m == 0 {
        return Err(HotelScopeError::validation("radius must be greater than 0 meters"));
    }
    Ok(())
}

/// Issues radius queries and turns raw records into POIs
pub struct PoiFetcher {
    provider: Arc<dyn TourismProvider>,
    excluded_category: u32,
}

impl PoiFetcher {
    /// Fetcher that drops the provider's "other lodging" records
    pub fn new(provider: Arc<dyn TourismProvider>) -> Self {
        Self {
            provider,
            excluded_category: OTHER_LODGING,
        }
    }

    #[must_use]
    pub fn excluded_category(&self) -> u32 {
        self.excluded_category
    }

    /// One radius query, never retried
    pub async fn lookup(&self, center: Coordinate, radius_m: u32) -> Result<PoiLookup> {
        validate_query(&center, radius_m)?;

        let items = match self.provider.nearby_items(center, radius_m).await {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "POI lookup around ({}) r={}m failed, treating as empty: {}",
                    center.format_coordinates(),
                    radius_m,
                    e
                );
                return Ok(PoiLookup::Unavailable {
                    reason: e.to_string(),
                });
            }
        };

        let received = items.len();
        let mut skipped = 0usize;
        let mut pois = Vec::with_capacity(received);
        for item in &items {
            match poi_from_item(item) {
                Some(poi) if poi.category_id == self.excluded_category => {}
                Some(poi) => pois.push(poi),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed POI records", skipped);
        }
        info!(
            "Found {} POIs within {}m of ({}) from {} records",
            pois.len(),
            radius_m,
            center.format_coordinates(),
            received
        );

        Ok(PoiLookup::Found(pois))
    }

    /// POIs within `radius_m` of `center`; empty when the lookup failed
    pub async fn fetch_pois(&self, center: Coordinate, radius_m: u32) -> Result<Vec<Poi>> {
        Ok(self.lookup(center, radius_m).await?.into_pois())
    }
}

/// Convert one raw record; `None` when a numeric field is present but unparseable
fn poi_from_item(item: &TourItem) -> Option<Poi> {
    let longitude = NumericField::parse(item.mapx.as_ref()).or_default(0.0)?;
    let latitude = NumericField::parse(item.mapy.as_ref()).or_default(0.0)?;
    let category = NumericField::parse(item.contenttypeid.as_ref()).or_default(0.0)?;

    if category < 0.0 || category.fract() != 0.0 || category > f64::from(u32::MAX) {
        debug!("Record has non-integer content type {}", category);
        return None;
    }

    Some(Poi {
        name: item.title.clone().unwrap_or_default(),
        coordinate: Coordinate::new(latitude, longitude),
        category_id: category as u32,
    })
}
