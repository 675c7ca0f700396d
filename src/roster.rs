//! Regional hotel roster loading
//!
//! The provider's stay search supplies names, positions and content ids.
//! It carries no prices or ratings, so those are filled with placeholder
//! values in the ranges the comparison view expects.

use rand::RngExt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::ResultCache;
use crate::models::{Coordinate, Hotel, Region};
use crate::tourism::types::id_text;
use crate::tourism::{NumericField, TourItem, TourismProvider};
use crate::{HotelScopeError, Result};

const PRICE_RANGE_KRW: std::ops::Range<u32> = 150_000..300_000;
const RATING_RANGE: std::ops::RangeInclusive<f64> = 3.0..=5.0;

/// Loads and caches the hotel roster per region
pub struct RosterLoader {
    provider: Arc<dyn TourismProvider>,
    cache: ResultCache<u32, Arc<Vec<Hotel>>>,
    roster_size: u32,
}

impl RosterLoader {
    pub fn new(
        provider: Arc<dyn TourismProvider>,
        cache: ResultCache<u32, Arc<Vec<Hotel>>>,
        roster_size: u32,
    ) -> Self {
        Self {
            provider,
            cache,
            roster_size,
        }
    }

    /// Hotels for `region`. Provider failures are returned, not cached.
    pub async fn hotels(&self, region: Region) -> Result<Arc<Vec<Hotel>>> {
        let area_code = region.area_code();
        self.cache
            .try_get_or_compute(area_code, move || async move {
                let items = self
                    .provider
                    .stays(area_code, self.roster_size)
                    .await
                    .map_err(|source| HotelScopeError::Roster { region, source })?;

                let received = items.len();
                let hotels: Vec<Hotel> = items.iter().filter_map(hotel_from_item).collect();
                info!(
                    "Loaded {} hotels for {} ({} records dropped)",
                    hotels.len(),
                    region,
                    received - hotels.len()
                );
                Ok(Arc::new(hotels))
            })
            .await
    }
}

/// Rows without usable coordinates or content id are dropped
fn hotel_from_item(item: &TourItem) -> Option<Hotel> {
    let name = item.title.clone().unwrap_or_default();
    let latitude = NumericField::parse(item.mapy.as_ref()).value();
    let longitude = NumericField::parse(item.mapx.as_ref()).value();
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        debug!("Dropping stay '{}' without usable coordinates", name);
        return None;
    };
    let Some(content_id) = id_text(item.contentid.as_ref()) else {
        debug!("Dropping stay '{}' without content id", name);
        return None;
    };

    let (price, rating) = placeholder_listing();
    Some(Hotel::new(
        name,
        Coordinate::new(latitude, longitude),
        content_id,
        price,
        rating,
    ))
}

/// Price in KRW and a one-decimal rating
fn placeholder_listing() -> (u32, f64) {
    let mut rng = rand::rng();
    let price = rng.random_range(PRICE_RANGE_KRW);
    let rating = (rng.random_range(RATING_RANGE) * 10.0).round() / 10.0;
    (price, rating)
}
