use crate::models::{Coordinate, Hotel};

/// Cache key for a radius query
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SearchKey {
    pub center_lat: i64, // Lat * 1000000 for precision
    pub center_lng: i64, // Lng * 1000000 for precision
    pub radius_m: u32,
}

impl SearchKey {
    #[must_use]
    pub fn new(center: &Coordinate, radius_m: u32) -> Self {
        let (center_lat, center_lng) = center.micro_degrees();
        Self {
            center_lat,
            center_lng,
            radius_m,
        }
    }
}

/// Cache key for a whole-roster aggregate.
///
/// Holds every member's id and position, sorted, so the key ignores roster
/// order and derived fields but never conflates two different rosters.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RosterKey {
    pub members: Vec<(String, (i64, i64))>,
    pub radius_m: u32,
}

impl RosterKey {
    #[must_use]
    pub fn new(hotels: &[Hotel], radius_m: u32) -> Self {
        let mut members: Vec<(String, (i64, i64))> = hotels
            .iter()
            .map(|hotel| (hotel.id().to_string(), hotel.coordinate.micro_degrees()))
            .collect();
        members.sort_unstable();

        Self { members, radius_m }
    }
}
