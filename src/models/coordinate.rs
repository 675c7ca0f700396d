//! Coordinate model for geographic positions

use serde::{Deserialize, Serialize};

use crate::{HotelScopeError, Result};

const MICRO_DEGREES: f64 = 1_000_000.0;

/// Geographic position
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Reject coordinates that can never reach the provider
    pub fn validate(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(HotelScopeError::validation(format!(
                "coordinate must be finite, got ({}, {})",
                self.latitude, self.longitude
            )))
        }
    }

    /// Planar distance in degree space.
    ///
    /// Only meaningful for ranking points inside one small search radius;
    /// it is not a length in meters.
    #[must_use]
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        let d_lat = other.latitude - self.latitude;
        let d_lng = other.longitude - self.longitude;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }

    /// Integer micro-degrees, used where a hashable identity is needed
    #[must_use]
    pub fn micro_degrees(&self) -> (i64, i64) {
        (
            (self.latitude * MICRO_DEGREES).round() as i64,
            (self.longitude * MICRO_DEGREES).round() as i64,
        )
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
