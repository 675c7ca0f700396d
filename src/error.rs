//! Errors surfaced by the `HotelScope` library
//!
//! Remote failures during POI lookups never reach this type: they degrade to
//! [`crate::PoiLookup::Unavailable`]. What remains is bad configuration, bad
//! input, a roster that could not be loaded, and a hotel that is not in it.

use thiserror::Error;

use crate::models::Region;
use crate::tourism::ProviderError;

#[derive(Error, Debug)]
pub enum HotelScopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Programmer error, e.g. a zero radius or a non-finite coordinate
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Without a roster no view can be built, so this one is not degraded
    #[error("Loading the {region} hotel roster failed: {source}")]
    Roster {
        region: Region,
        #[source]
        source: ProviderError,
    },

    #[error("No hotel named '{name}' in {region}")]
    HotelNotFound { region: Region, name: String },
}

impl HotelScopeError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Text for the CLI; the `Display` form stays the technical one
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HotelScopeError::Config(_) => {
                "Check the config file or set HOTELSCOPE_PROVIDER__SERVICE_KEY.".to_string()
            }
            HotelScopeError::Validation(message) => format!("Invalid input: {message}"),
            HotelScopeError::Roster { region, source } => match source {
                ProviderError::Authentication(_) | ProviderError::Provider { .. } => format!(
                    "The tourism service rejected the request for {region}. Is the service key registered?"
                ),
                ProviderError::Timeout(_) | ProviderError::Network(_) => format!(
                    "The tourism service could not be reached while loading {region} hotels."
                ),
                _ => format!("The {region} hotel list is unavailable right now. Try again later."),
            },
            HotelScopeError::HotelNotFound { region, name } => {
                format!("'{name}' is not in the {region} roster. Run `hotelscope hotels --region {region}` to list names.")
            }
        }
    }
}
