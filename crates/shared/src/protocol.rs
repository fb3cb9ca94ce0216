use serde::{Deserialize, Serialize};

use crate::domain::ShortenResult;

/// Body of `POST /shorten`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

impl ShortenRequest {
    /// Builds a request from raw form input. A blank custom code is dropped
    /// rather than sent as an empty string.
    pub fn from_form(url: &str, custom_code: &str) -> Self {
        let custom_code = custom_code.trim();
        Self {
            url: url.trim().to_string(),
            custom_code: (!custom_code.is_empty()).then(|| custom_code.to_string()),
        }
    }
}

/// Success body of `POST /shorten`. Fields are optional on the wire so a
/// partial body can be told apart from a transport failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenResponse {
    #[serde(default)]
    pub shortened_url: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub custom_code_used: Option<bool>,
}

impl ShortenResponse {
    pub fn into_result(self) -> Option<ShortenResult> {
        Some(ShortenResult {
            shortened_url: self.shortened_url?,
            original_url: self.original_url?,
            short_code: self.short_code,
            custom_code_used: self.custom_code_used,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub redis: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub short_code: String,
    pub original_url: String,
    pub shortened_url: String,
}
