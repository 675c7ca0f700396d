//! Data models for the HotelScope library
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: Geographic position in decimal degrees
//! - Poi: A categorized point of interest near a hotel
//! - Hotel: A roster entry with its derived nearby-POI count
//! - Region: The areas a roster can be loaded for

pub mod coordinate;
pub mod hotel;
pub mod poi;
pub mod region;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use hotel::Hotel;
pub use poi::{ClassifiedPoi, Poi};
pub use region::Region;
