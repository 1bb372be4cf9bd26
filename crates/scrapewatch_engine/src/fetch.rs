use std::fmt;
use std::time::Duration;

use thiserror::Error;

use scrapewatch_core::StatusSnapshot;

use crate::wire::StatusDto;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One status request's failure. The poll pacer treats every kind the same
/// way (as an inactive poll); the split exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    /// The body was not a parseable status payload. Reported like any other
    /// transport failure; a half-valid snapshot never reaches the core.
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedBody => write!(f, "malformed status payload"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// One request for the current job status. Implementations must settle
/// (resolve or fail) rather than hang; the HTTP implementation enforces
/// this with client timeouts.
#[async_trait::async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError>;
}

/// Production fetcher: GET against the crawl status endpoint.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpStatusFetcher {
    pub fn new(url: &str, settings: FetchSettings) -> Result<Self, FetchError> {
        let url = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("status endpoint returned {status}"),
            ));
        }

        let dto: StatusDto = response.json().await.map_err(map_reqwest_error)?;
        Ok(dto.into())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedBody, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
