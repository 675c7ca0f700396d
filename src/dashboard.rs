//! Hotel Dashboard Module
//!
//! This module assembles the data behind the dashboard's three views (a
//! single hotel's overview, the points of interest around it, and the
//! regional comparison) from the roster loader and the proximity
//! aggregator. Everything returned here is plain, serializable data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{Clock, ResultCache, SystemClock};
use crate::category::{self, CategoryInfo};
use crate::config::HotelScopeConfig;
use crate::models::hotel::apply_tourist_counts;
use crate::models::{ClassifiedPoi, Hotel, Poi, Region};
use crate::proximity::{PoiFetcher, ProximityAggregator, group_counts, nearest};
use crate::roster::RosterLoader;
use crate::tourism::TourismProvider;
use crate::{HotelScopeError, Result};

/// The selected hotel with its nearby count and photos
#[derive(Debug, Clone, Serialize)]
pub struct HotelOverview {
    pub region: Region,
    pub radius_m: u32,
    pub hotel: Hotel,
    /// Original image URLs, empty when none could be loaded
    pub image_urls: Vec<String>,
}

/// Points of interest around the selected hotel
#[derive(Debug, Clone, Serialize)]
pub struct NearbyView {
    pub region: Region,
    pub radius_m: u32,
    pub hotel: Hotel,
    /// False when the radius query failed and the lists are empty for that reason
    pub data_available: bool,
    pub pois: Vec<ClassifiedPoi>,
    pub category_counts: BTreeMap<&'static str, usize>,
    pub nearest: Vec<Poi>,
    pub legend: Vec<CategoryInfo>,
    pub generated_at: DateTime<Utc>,
}

/// Every roster hotel with its nearby count
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub region: Region,
    pub radius_m: u32,
    pub hotels: Vec<Hotel>,
    pub generated_at: DateTime<Utc>,
}

/// Dashboard data service
pub struct HotelDashboard {
    provider: Arc<dyn TourismProvider>,
    roster: RosterLoader,
    aggregator: ProximityAggregator,
    nearest_count: usize,
}

impl HotelDashboard {
    /// Wire a dashboard from configuration, with one cache generation per
    /// process on the wall clock
    pub fn from_config(provider: Arc<dyn TourismProvider>, config: &HotelScopeConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        provider: Arc<dyn TourismProvider>,
        config: &HotelScopeConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl = config.cache.ttl();
        let roster = RosterLoader::new(
            Arc::clone(&provider),
            ResultCache::with_clock(ttl, Arc::clone(&clock)),
            config.provider.roster_size,
        );
        let aggregator = ProximityAggregator::new(
            PoiFetcher::new(Arc::clone(&provider)),
            ResultCache::with_clock(ttl, Arc::clone(&clock)),
            ResultCache::with_clock(ttl, clock),
        )
        .with_concurrency(config.defaults.roster_concurrency);

        Self {
            provider,
            roster,
            aggregator,
            nearest_count: config.defaults.nearest_count,
        }
    }

    #[must_use]
    pub fn aggregator(&self) -> &ProximityAggregator {
        &self.aggregator
    }

    pub async fn hotels(&self, region: Region) -> Result<Arc<Vec<Hotel>>> {
        self.roster.hotels(region).await
    }

    /// First roster hotel with exactly this name
    pub async fn select_hotel(&self, region: Region, name: &str) -> Result<Hotel> {
        self.hotels(region)
            .await?
            .iter()
            .find(|hotel| hotel.name == name)
            .cloned()
            .ok_or_else(|| HotelScopeError::HotelNotFound {
                region,
                name: name.to_string(),
            })
    }

    pub async fn overview(&self, region: Region, name: &str, radius_m: u32) -> Result<HotelOverview> {
        let hotel = self.select_hotel(region, name).await?;
        let count = self
            .aggregator
            .count_nearby(hotel.coordinate, radius_m)
            .await?;

        let image_urls = match self.provider.images(hotel.id()).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Image lookup for hotel {} failed: {}", hotel.id(), e);
                Vec::new()
            }
        };

        Ok(HotelOverview {
            region,
            radius_m,
            hotel: hotel.with_tourist_count(count),
            image_urls,
        })
    }

    pub async fn nearby(&self, region: Region, name: &str, radius_m: u32) -> Result<NearbyView> {
        let hotel = self.select_hotel(region, name).await?;
        let lookup = self.aggregator.lookup(hotel.coordinate, radius_m).await?;
        let data_available = lookup.is_available();
        let pois = lookup.into_pois();

        let nearest = nearest(
            &pois,
            &hotel.coordinate,
            self.aggregator.fetcher().excluded_category(),
            self.nearest_count,
        );
        let category_counts = group_counts(&pois);
        info!(
            "{} POIs around {} across {} categories",
            pois.len(),
            hotel.name,
            category_counts.len()
        );

        Ok(NearbyView {
            region,
            radius_m,
            hotel: hotel.with_tourist_count(pois.len()),
            data_available,
            pois: pois.into_iter().map(ClassifiedPoi::from).collect(),
            category_counts,
            nearest,
            legend: category::legend().to_vec(),
            generated_at: Utc::now(),
        })
    }

    pub async fn comparison(&self, region: Region, radius_m: u32) -> Result<ComparisonView> {
        let roster = self.hotels(region).await?;
        let counts = self.aggregator.aggregate_roster(&roster, radius_m).await?;

        let mut hotels = roster.as_ref().clone();
        apply_tourist_counts(&mut hotels, &counts);

        Ok(ComparisonView {
            region,
            radius_m,
            hotels,
            generated_at: Utc::now(),
        })
    }
}
