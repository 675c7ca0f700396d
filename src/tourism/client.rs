use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::{ProviderError, ProviderResult};
use super::types::{Envelope, ImageItem, Page, TourItem};
use super::TourismProvider;
use crate::config::ProviderConfig;
use crate::models::Coordinate;
use crate::{HotelScopeError, Result};

const LOCATION_ENDPOINT: &str = "locationBasedList2";
const STAY_ENDPOINT: &str = "searchStay2";
const IMAGE_ENDPOINT: &str = "detailImage2";

/// HTTP client for the Korea Tourism Organization English service
pub struct TourApiClient {
    client: Client,
    service_key: String,
    base_url: String,
    mobile_app: String,
    page_size: u32,
}

impl TourApiClient {
    /// Create a new client; a service key is required
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let service_key = config
            .service_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                HotelScopeError::config(
                    "provider.service_key is not set (HOTELSCOPE_PROVIDER__SERVICE_KEY)",
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("HotelScope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HotelScopeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            service_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mobile_app: config.mobile_app.clone(),
            page_size: config.page_size,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<Page<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Tourism API request: {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("MobileOS", "ETC"),
                ("MobileApp", self.mobile_app.as_str()),
                ("_type", "json"),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => ProviderError::Authentication("Invalid or unregistered service key".to_string()),
                429 => ProviderError::RateLimited("Tourism API rate limit exceeded".to_string()),
                code => ProviderError::Status { status: code, body },
            });
        }

        let text = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            warn!(
                "Failed to parse {} response: {}. Body starts with: {:.200}",
                endpoint, e, text
            );
            ProviderError::from(e)
        })?;

        envelope.into_page()
    }
}

#[async_trait]
impl TourismProvider for TourApiClient {
    #[tracing::instrument(name = "nearby_items", skip(self))]
    async fn nearby_items(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> ProviderResult<Vec<TourItem>> {
        let page: Page<TourItem> = self
            .get_page(
                LOCATION_ENDPOINT,
                &[
                    ("mapX", center.longitude.to_string()),
                    ("mapY", center.latitude.to_string()),
                    ("radius", radius_m.to_string()),
                    ("numOfRows", self.page_size.to_string()),
                    ("pageNo", "1".to_string()),
                    ("arrange", "A".to_string()),
                ],
            )
            .await?;

        if let Some(total) = page.total_count {
            if total > page.items.len() as u64 {
                warn!(
                    "Radius query matched {} records, only {} returned",
                    total,
                    page.items.len()
                );
            }
        }

        debug!("Received {} nearby records", page.items.len());
        Ok(page.items)
    }

    #[tracing::instrument(name = "stays", skip(self))]
    async fn stays(&self, area_code: u32, rows: u32) -> ProviderResult<Vec<TourItem>> {
        let page: Page<TourItem> = self
            .get_page(
                STAY_ENDPOINT,
                &[
                    ("areaCode", area_code.to_string()),
                    ("numOfRows", rows.to_string()),
                    ("pageNo", "1".to_string()),
                    ("arrange", "A".to_string()),
                ],
            )
            .await?;

        info!("Found {} stays for area code {}", page.items.len(), area_code);
        Ok(page.items)
    }

    #[tracing::instrument(name = "images", skip(self))]
    async fn images(&self, content_id: &str) -> ProviderResult<Vec<String>> {
        let page: Page<ImageItem> = self
            .get_page(
                IMAGE_ENDPOINT,
                &[
                    ("contentId", content_id.to_string()),
                    ("imageYN", "Y".to_string()),
                ],
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .filter_map(|item| item.originimgurl)
            .filter(|url| !url.is_empty())
            .collect())
    }
}
