//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use hotelscope::tourism::{ProviderResult, TourItem, TourismProvider};
use hotelscope::{Coordinate, Hotel, ProviderError};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Raw provider record the way the tourism API sends it (numbers as strings)
pub fn record(title: &str, lat: f64, lng: f64, content_type: u32) -> TourItem {
    serde_json::from_value(json!({
        "title": title,
        "mapx": lng.to_string(),
        "mapy": lat.to_string(),
        "contenttypeid": content_type.to_string(),
    }))
    .expect("valid record")
}

pub fn stay(title: &str, lat: f64, lng: f64, content_id: &str) -> TourItem {
    serde_json::from_value(json!({
        "title": title,
        "mapx": lng.to_string(),
        "mapy": lat.to_string(),
        "contentid": content_id,
        "contenttypeid": "80",
    }))
    .expect("valid stay")
}

pub fn hotel(id: &str, lat: f64, lng: f64) -> Hotel {
    Hotel::new(format!("Hotel {id}"), Coordinate::new(lat, lng), id, 200_000, 4.0)
}

/// Scripted in-memory provider that counts its calls
#[derive(Default)]
pub struct FakeProvider {
    nearby: HashMap<(i64, i64), Vec<TourItem>>,
    failing: HashSet<(i64, i64)>,
    stays: Mutex<Vec<ProviderResult<Vec<TourItem>>>>,
    images: HashMap<String, Vec<String>>,
    delay: Duration,
    pub nearby_calls: AtomicUsize,
    pub stay_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nearby(mut self, center: Coordinate, items: Vec<TourItem>) -> Self {
        self.nearby.insert(center.micro_degrees(), items);
        self
    }

    pub fn failing_at(mut self, center: Coordinate) -> Self {
        self.failing.insert(center.micro_degrees());
        self
    }

    /// Queue stay responses; the last one repeats
    pub fn with_stays(self, response: ProviderResult<Vec<TourItem>>) -> Self {
        self.stays.lock().unwrap().push(response);
        self
    }

    pub fn with_images(mut self, content_id: &str, urls: &[&str]) -> Self {
        self.images.insert(
            content_id.to_string(),
            urls.iter().map(|url| url.to_string()).collect(),
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn nearby_calls(&self) -> usize {
        self.nearby_calls.load(Ordering::SeqCst)
    }

    pub fn stay_calls(&self) -> usize {
        self.stay_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TourismProvider for FakeProvider {
    async fn nearby_items(
        &self,
        center: Coordinate,
        _radius_m: u32,
    ) -> ProviderResult<Vec<TourItem>> {
        self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let key = center.micro_degrees();
        if self.failing.contains(&key) {
            return Err(ProviderError::Network("connection reset".to_string()));
        }
        Ok(self.nearby.get(&key).cloned().unwrap_or_default())
    }

    async fn stays(&self, _area_code: u32, _rows: u32) -> ProviderResult<Vec<TourItem>> {
        self.stay_calls.fetch_add(1, Ordering::SeqCst);
        let mut queued = self.stays.lock().unwrap();
        match queued.len() {
            0 => Ok(Vec::new()),
            1 => queued[0].clone(),
            _ => queued.remove(0),
        }
    }

    async fn images(&self, content_id: &str) -> ProviderResult<Vec<String>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(content_id)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: 500,
                body: "no images".to_string(),
            })
    }
}
