use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);
    };
}

id_newtype!(RequestId);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A shortened link as echoed back by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResult {
    pub original_url: String,
    pub shortened_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code_used: Option<bool>,
}

impl ShortenResult {
    pub fn new(original_url: impl Into<String>, shortened_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            shortened_url: shortened_url.into(),
            short_code: None,
            custom_code_used: None,
        }
    }
}
