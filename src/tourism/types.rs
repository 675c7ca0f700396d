//! Wire types for the tourism provider's JSON envelope
//!
//! Every endpoint answers with `response.header` plus `response.body.items.item`,
//! where `items` may be missing or an empty string, and `item` may be a
//! single object or an array.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::error::{ProviderError, ProviderResult};

const SUCCESS_CODE: &str = "0000";

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub response: ResponsePart,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    #[serde(rename = "resultCode")]
    pub result_code: String,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,
}

#[derive(Debug, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub items: Option<Items>,
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<Value>,
}

/// Records stay raw here so one bad element cannot sink the page
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Listed {
        #[serde(default)]
        item: Option<OneOrMany>,
    },
    /// The provider sends `"items": ""` when nothing matched
    Blank(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Records of one response page, with the provider's total match count
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
}

impl Envelope {
    /// Check the result header and decode the item list.
    ///
    /// Elements that do not decode as `T` are logged and skipped.
    pub fn into_page<T: DeserializeOwned>(self) -> ProviderResult<Page<T>> {
        if let Some(header) = &self.response.header {
            if header.result_code != SUCCESS_CODE {
                return Err(ProviderError::Provider {
                    code: header.result_code.clone(),
                    message: header.result_msg.clone(),
                });
            }
        }

        let Some(body) = self.response.body else {
            return Ok(Page {
                items: Vec::new(),
                total_count: None,
            });
        };

        let total_count = body.total_count.as_ref().and_then(|value| match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let raw = match body.items {
            Some(Items::Listed { item: Some(item) }) => item.into_vec(),
            Some(Items::Listed { item: None } | Items::Blank(_)) | None => Vec::new(),
        };

        let mut items = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping undecodable record #{}: {}", index, e),
            }
        }

        Ok(Page { items, total_count })
    }
}

/// One record from a location or stay search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourItem {
    #[serde(default)]
    pub title: Option<String>,
    /// Longitude
    #[serde(default)]
    pub mapx: Option<Value>,
    /// Latitude
    #[serde(default)]
    pub mapy: Option<Value>,
    #[serde(default)]
    pub contenttypeid: Option<Value>,
    #[serde(default)]
    pub contentid: Option<Value>,
}

/// One record from the image endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageItem {
    #[serde(default)]
    pub originimgurl: Option<String>,
}

/// A numeric field as the provider sent it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    Missing,
    Value(f64),
    Invalid,
}

impl NumericField {
    /// Numbers and numeric strings parse; anything else is invalid.
    pub fn parse(value: Option<&Value>) -> Self {
        let parsed = match value {
            None | Some(Value::Null) => return NumericField::Missing,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };
        match parsed {
            Some(number) if number.is_finite() => NumericField::Value(number),
            _ => NumericField::Invalid,
        }
    }

    /// Missing becomes `default`, invalid becomes `None`
    pub fn or_default(self, default: f64) -> Option<f64> {
        match self {
            NumericField::Missing => Some(default),
            NumericField::Value(number) => Some(number),
            NumericField::Invalid => None,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            NumericField::Value(number) => Some(number),
            NumericField::Missing | NumericField::Invalid => None,
        }
    }
}

/// Render a provider id field (sent as string or number) as text
pub fn id_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
