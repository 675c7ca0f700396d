//! Proximity aggregation over cached radius queries

use futures::{StreamExt, stream};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fetcher::{PoiFetcher, PoiLookup, validate_query};
use super::keys::{RosterKey, SearchKey};
use crate::cache::ResultCache;
use crate::category;
use crate::models::{Coordinate, Hotel, Poi};
use crate::{HotelScopeError, Result};

/// Per-hotel nearby-POI counts keyed by hotel id
pub type RosterCounts = HashMap<String, usize>;

/// Computes nearby-POI metrics, serving every remote lookup through its caches
pub struct ProximityAggregator {
    fetcher: PoiFetcher,
    poi_cache: ResultCache<SearchKey, PoiLookup>,
    roster_cache: ResultCache<RosterKey, Arc<RosterCounts>>,
    concurrency: usize,
}

impl ProximityAggregator {
    /// Aggregator that looks hotels up one at a time
    pub fn new(
        fetcher: PoiFetcher,
        poi_cache: ResultCache<SearchKey, PoiLookup>,
        roster_cache: ResultCache<RosterKey, Arc<RosterCounts>>,
    ) -> Self {
        Self {
            fetcher,
            poi_cache,
            roster_cache,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` per-hotel lookups in flight during roster aggregation
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn fetcher(&self) -> &PoiFetcher {
        &self.fetcher
    }

    #[must_use]
    pub fn poi_cache(&self) -> &ResultCache<SearchKey, PoiLookup> {
        &self.poi_cache
    }

    /// Cached radius query
    pub async fn lookup(&self, center: Coordinate, radius_m: u32) -> Result<PoiLookup> {
        validate_query(&center, radius_m)?;

        let key = SearchKey::new(&center, radius_m);
        let lookup = self
            .poi_cache
            .get_or_compute(key, move || async move {
                self.fetcher
                    .lookup(center, radius_m)
                    .await
                    .unwrap_or_else(|e| PoiLookup::Unavailable {
                        reason: e.to_string(),
                    })
            })
            .await;
        Ok(lookup)
    }

    /// Cached POI list for a radius query; empty when the lookup failed
    pub async fn pois_near(&self, center: Coordinate, radius_m: u32) -> Result<Vec<Poi>> {
        Ok(self.lookup(center, radius_m).await?.into_pois())
    }

    /// Number of POIs within `radius_m` of `center`
    pub async fn count_nearby(&self, center: Coordinate, radius_m: u32) -> Result<usize> {
        Ok(self.lookup(center, radius_m).await?.pois().len())
    }

    /// Nearby-POI count for every hotel in the roster.
    ///
    /// A hotel whose lookup fails counts as zero; the aggregate itself only
    /// fails for a zero radius.
    #[tracing::instrument(skip(self, hotels), fields(hotels = hotels.len()))]
    pub async fn aggregate_roster(&self, hotels: &[Hotel], radius_m: u32) -> Result<RosterCounts> {
        if radius_m == 0 {
            return Err(HotelScopeError::validation(
                "radius must be greater than 0 meters",
            ));
        }

        let key = RosterKey::new(hotels, radius_m);
        let counts = self
            .roster_cache
            .get_or_compute(key, move || async move {
                let counted: Vec<(String, usize)> = stream::iter(hotels)
                    .map(|hotel| async move {
                        let count = match self.count_nearby(hotel.coordinate, radius_m).await {
                            Ok(count) => count,
                            Err(e) => {
                                warn!("Counting POIs for hotel {} failed: {}", hotel.id(), e);
                                0
                            }
                        };
                        debug!("Hotel {} has {} POIs nearby", hotel.id(), count);
                        (hotel.id().to_string(), count)
                    })
                    .buffered(self.concurrency)
                    .collect()
                    .await;

                info!(
                    "Aggregated POI counts for {} hotels at {}m",
                    counted.len(),
                    radius_m
                );
                Arc::new(counted.into_iter().collect::<RosterCounts>())
            })
            .await;

        Ok(counts.as_ref().clone())
    }
}

/// The `n` POIs closest to `origin`, skipping `exclude_category`.
///
/// Distance is planar in degree space, good for ranking within one search
/// radius only. Equal distances keep their input order.
#[must_use]
pub fn nearest(pois: &[Poi], origin: &Coordinate, exclude_category: u32, n: usize) -> Vec<Poi> {
    let mut ranked: Vec<(f64, &Poi)> = pois
        .iter()
        .filter(|poi| poi.category_id != exclude_category)
        .map(|poi| (origin.degree_distance(&poi.coordinate), poi))
        .collect();

    // stable
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked
        .into_iter()
        .take(n)
        .map(|(_, poi)| poi.clone())
        .collect()
}

/// POI count per category display name
#[must_use]
pub fn group_counts(pois: &[Poi]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for poi in pois {
        *counts
            .entry(category::classify(poi.category_id).display_name)
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{OTHER_LODGING, UNCATEGORIZED_NAME};

    fn poi(name: &str, lat: f64, lng: f64, category_id: u32) -> Poi {
        Poi::new(name, Coordinate::new(lat, lng), category_id)
    }

    #[test]
    fn test_nearest_breaks_ties_by_input_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let pois = vec![
            poi("P1", 5.0, 0.0, 76),
            poi("P2", 1.0, 0.0, 76),
            poi("P3", 0.0, 1.0, 76),
        ];

        let names: Vec<String> = nearest(&pois, &origin, OTHER_LODGING, 2)
            .into_iter()
            .map(|poi| poi.name)
            .collect();
        assert_eq!(names, vec!["P2", "P3"]);
    }

    #[test]
    fn test_nearest_tie_does_not_sort_by_name() {
        let origin = Coordinate::new(0.0, 0.0);
        let pois = vec![poi("Zoo", 0.0, 1.0, 76), poi("Aquarium", 1.0, 0.0, 76)];

        let ranked = nearest(&pois, &origin, OTHER_LODGING, 2);
        assert_eq!(ranked[0].name, "Zoo");
        assert_eq!(ranked[1].name, "Aquarium");
    }

    #[test]
    fn test_nearest_excludes_category_and_caps_length() {
        let origin = Coordinate::new(37.5, 127.0);
        let pois = vec![
            poi("Guesthouse", 37.5001, 127.0, OTHER_LODGING),
            poi("Market", 37.502, 127.0, 79),
            poi("Palace", 37.51, 127.0, 76),
            poi("Station", 37.503, 127.0, 77),
        ];

        let ranked = nearest(&pois, &origin, OTHER_LODGING, 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|poi| poi.category_id != OTHER_LODGING));
        assert_eq!(ranked[0].name, "Market");
        assert_eq!(ranked[1].name, "Station");

        let distances: Vec<f64> = nearest(&pois, &origin, OTHER_LODGING, 10)
            .iter()
            .map(|poi| origin.degree_distance(&poi.coordinate))
            .collect();
        assert_eq!(distances.len(), 3);
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_nearest_handles_empty_and_zero() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(nearest(&[], &origin, OTHER_LODGING, 5).is_empty());
        assert!(nearest(&[poi("A", 0.0, 0.0, 76)], &origin, OTHER_LODGING, 0).is_empty());
    }

    #[test]
    fn test_group_counts() {
        let pois = vec![
            poi("A", 0.0, 0.0, 76),
            poi("B", 0.0, 0.0, 76),
            poi("C", 0.0, 0.0, 82),
            poi("D", 0.0, 0.0, 99),
        ];

        let counts = group_counts(&pois);
        assert_eq!(counts.get("Tourist attraction"), Some(&2));
        assert_eq!(counts.get("Restaurant"), Some(&1));
        assert_eq!(counts.get(UNCATEGORIZED_NAME), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), pois.len());
        assert!(group_counts(&[]).is_empty());
    }
}
