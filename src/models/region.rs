//! Regions a hotel roster can be loaded for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::HotelScopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Seoul,
    Busan,
    Jeju,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Seoul, Region::Busan, Region::Jeju];

    /// Provider area code
    #[must_use]
    pub fn area_code(self) -> u32 {
        match self {
            Region::Seoul => 1,
            Region::Busan => 6,
            Region::Jeju => 39,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Region::Seoul => "Seoul",
            Region::Busan => "Busan",
            Region::Jeju => "Jeju",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = HotelScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                HotelScopeError::validation(format!(
                    "unknown region '{s}', expected one of: seoul, busan, jeju"
                ))
            })
    }
}
