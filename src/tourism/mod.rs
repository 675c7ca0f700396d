//! Tourism provider integration
//!
//! The provider is an opaque HTTP JSON API with three endpoints used here:
//! radius search, stay (hotel) search by area, and content images.
//! [`TourismProvider`] is the seam the rest of the crate talks to;
//! [`TourApiClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

use crate::models::Coordinate;

pub use client::TourApiClient;
pub use error::{ProviderError, ProviderResult};
pub use types::{ImageItem, NumericField, TourItem};

#[async_trait]
pub trait TourismProvider: Send + Sync {
    /// Raw records within `radius_m` meters of `center`
    async fn nearby_items(&self, center: Coordinate, radius_m: u32)
    -> ProviderResult<Vec<TourItem>>;

    /// Raw stay records for a provider area code
    async fn stays(&self, area_code: u32, rows: u32) -> ProviderResult<Vec<TourItem>>;

    /// Original image URLs for a content id
    async fn images(&self, content_id: &str) -> ProviderResult<Vec<String>>;
}
