//! City records returned by the GeoDB Cities API.
//!
//! Cities are read-only: they are deserialized from the response body and
//! displayed verbatim.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Host serving country flag images.
pub const FLAG_IMAGE_BASE: &str = "https://flagsapi.com";

/// Opaque city identifier.
///
/// The API sends an integer, but any JSON string or number is accepted and
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityId(String);

impl CityId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!(
                "city id must be a string or number, got {other}"
            ))),
        }
    }
}

/// A single city as returned by the API.
///
/// Only these four fields are consumed; everything else in the response item
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// API identifier.
    pub id: CityId,
    /// Place name.
    pub name: String,
    /// Country display name.
    pub country: String,
    /// ISO 3166-1 alpha-2 code.
    pub country_code: String,
}

impl City {
    /// Build a city from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            id: CityId::new(id),
            name: name.into(),
            country: country.into(),
            country_code: country_code.into(),
        }
    }

    /// Flag image URL for this city's country.
    pub fn flag_url(&self) -> String {
        format!("{FLAG_IMAGE_BASE}/{}/flat/32.png", self.country_code)
    }

    /// Flag as a pair of Unicode regional indicator symbols.
    ///
    /// Returns `None` unless the country code is exactly two ASCII letters.
    pub fn flag_emoji(&self) -> Option<String> {
        let code = self.country_code.as_bytes();
        if code.len() != 2 || !code.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        code.iter()
            .map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
            .collect()
    }
}

/// Response envelope of `GET /v1/geo/cities`.
#[derive(Debug, Clone, Deserialize)]
pub struct CitiesResponse {
    /// Matching cities in API order.
    pub data: Vec<City>,
}

/// How the country flag is shown next to the country name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStyle {
    /// Regional indicator emoji (falls back to the code).
    #[default]
    Emoji,
    /// Flag image URL.
    Url,
    /// Bare country code.
    Code,
}

impl FlagStyle {
    /// Render the flag for `city` in this style.
    pub fn render(self, city: &City) -> String {
        match self {
            FlagStyle::Emoji => city
                .flag_emoji()
                .unwrap_or_else(|| city.country_code.clone()),
            FlagStyle::Url => city.flag_url(),
            FlagStyle::Code => city.country_code.clone(),
        }
    }
}

impl FromStr for FlagStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emoji" => Ok(FlagStyle::Emoji),
            "url" => Ok(FlagStyle::Url),
            "code" => Ok(FlagStyle::Code),
            other => Err(format!("unknown flag style '{other}'")),
        }
    }
}
