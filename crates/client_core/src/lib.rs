use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ShortenResult,
    error::ApiError,
    protocol::{HealthStatus, LinkStats, ShortenRequest, ShortenResponse},
};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;

pub use config::{load_config, ClientConfig};
pub use controller::{
    ClipboardSink, CopyFeedback, FormField, Phase, RequestController, SubmitTicket,
};
pub use error::{ConfigError, ShortenError, GENERIC_FAILURE_MESSAGE};

/// Operations offered by the remote shortening service.
#[async_trait]
pub trait ShortenerApi: Send + Sync {
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortenResult, ShortenError>;
    async fn health(&self) -> Result<HealthStatus, ShortenError>;
    async fn stats(&self, short_code: &str) -> Result<LinkStats, ShortenError>;
}

#[derive(Debug, Clone)]
pub struct ShortenerClient {
    http: Client,
    api_base_url: String,
}

impl ShortenerClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ShortenError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ShortenError> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|_| ShortenError::InvalidEndpoint(self.api_base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ShortenError::InvalidEndpoint(self.api_base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decodes a 2xx body as `T`; anything else becomes a service error carrying
/// the body's `error` field when it has one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ShortenError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiError>(&body)
            .ok()
            .and_then(|api_error| api_error.message().map(str::to_string));
        return Err(ShortenError::Service {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|err| ShortenError::MalformedResponse(err.to_string()))
}

#[async_trait]
impl ShortenerApi for ShortenerClient {
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortenResult, ShortenError> {
        let endpoint = self.endpoint(&["shorten"])?;
        debug!(%endpoint, custom_code = request.custom_code.is_some(), "posting shorten request");
        let response = self.http.post(endpoint).json(request).send().await?;
        let body: ShortenResponse = read_json(response).await?;
        let result = body.into_result().ok_or_else(|| {
            ShortenError::MalformedResponse(
                "response is missing shortened_url or original_url".to_string(),
            )
        })?;
        info!(shortened_url = %result.shortened_url, "url shortened");
        Ok(result)
    }

    async fn health(&self) -> Result<HealthStatus, ShortenError> {
        let response = self.http.get(self.endpoint(&["health"])?).send().await?;
        read_json(response).await
    }

    async fn stats(&self, short_code: &str) -> Result<LinkStats, ShortenError> {
        let response = self
            .http
            .get(self.endpoint(&["stats", short_code])?)
            .send()
            .await?;
        read_json(response).await
    }
}

/// Runs one full submit/request/complete cycle on `controller`. Returns false
/// when nothing was submitted.
pub async fn submit_and_wait(controller: &mut RequestController, api: &dyn ShortenerApi) -> bool {
    let Some(ticket) = controller.submit() else {
        return false;
    };
    let outcome = api.shorten(&ticket.request).await;
    controller.complete(ticket.id, outcome)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
