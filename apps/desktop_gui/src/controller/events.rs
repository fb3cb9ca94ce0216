//! Backend-to-UI events.

use client_core::ShortenError;
use shared::{
    domain::{RequestId, ShortenResult},
    protocol::HealthStatus,
};

pub enum UiEvent {
    Info(String),
    ShortenCompleted {
        id: RequestId,
        outcome: Result<ShortenResult, ShortenError>,
    },
    HealthChecked(Result<HealthStatus, String>),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info(_) => "info",
            Self::ShortenCompleted { .. } => "shorten_completed",
            Self::HealthChecked(_) => "health_checked",
        }
    }
}

/// One-line summary of the service health probe for the footer.
pub fn describe_health(result: &Result<HealthStatus, String>) -> String {
    match result {
        Ok(health) => {
            let mut parts = vec![health.status.clone()];
            if let Some(redis) = &health.redis {
                parts.push(format!("redis {redis}"));
            }
            if let Some(database) = &health.database {
                parts.push(format!("database {database}"));
            }
            parts.join(", ")
        }
        Err(err) => format!("unreachable ({err})"),
    }
}
