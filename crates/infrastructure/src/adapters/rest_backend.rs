//! REST backend implementation using reqwest.
//!
//! This adapter implements both the `PersistencePort` and the
//! `ExecutionPort` against the playground's HTTP backend. It maps transport
//! failures and error statuses onto `CollaboratorError` and hands payloads
//! back un-normalized.

use std::future::Future;
use std::time::Duration;

use relay_application::{CollaboratorError, ExecutionPort, PersistencePort};
use relay_domain::{Collection, ExecutionPayload, RequestDraft, RequestPayload};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::BackendConfig;
use crate::serialization::from_json_bytes;

/// Errors raised while building the backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The configured base URL does not parse.
    #[error("invalid backend URL `{url}`: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("backend URL `{0}` cannot be used as a base")]
    CannotBeABase(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A run answer, either bare or wrapped as `{"requestRun": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RunResponse {
    Wrapped {
        #[serde(rename = "requestRun")]
        request_run: ExecutionPayload,
    },
    Bare(ExecutionPayload),
}

impl From<RunResponse> for ExecutionPayload {
    fn from(response: RunResponse) -> Self {
        match response {
            RunResponse::Wrapped { request_run } => request_run,
            RunResponse::Bare(payload) => payload,
        }
    }
}

/// HTTP client for the playground backend.
///
/// Endpoints, relative to the configured base URL:
/// - `POST collections/{id}/requests` creates a request
/// - `GET collections/{id}/requests` lists a collection
/// - `PUT requests/{id}` overwrites a request
/// - `POST requests/{id}/run` runs a request
/// - `GET workspaces/{id}/collections` lists a workspace
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base: Url,
}

impl RestBackend {
    /// Creates a backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base = Url::parse(&config.base_url).map_err(|source| BackendError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(BackendError::CannotBeABase(config.base_url.clone()));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, base })
    }

    /// Creates a backend over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// The base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CollaboratorError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CollaboratorError::Rejected(format!("backend URL `{}` cannot be a base", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes a successful JSON answer.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CollaboratorError> {
        let response = request.send().await.map_err(Self::map_error)?;
        let status = response.status();
        let url = response.url().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Backend rejected request");
            return Err(Self::map_status(status, &url, &body));
        }

        let bytes = response.bytes().await.map_err(Self::map_error)?;
        debug!(%url, status = status.as_u16(), size = bytes.len(), "Backend answered");
        from_json_bytes(&bytes).map_err(|e| {
            CollaboratorError::Rejected(format!("unexpected response from {url}: {e}"))
        })
    }

    /// Maps reqwest transport errors to `CollaboratorError`.
    fn map_error(error: reqwest::Error) -> CollaboratorError {
        if error.is_timeout() || error.is_connect() {
            return CollaboratorError::Unreachable(error.to_string());
        }
        if error.is_decode() || error.is_body() {
            return CollaboratorError::Rejected(format!("failed to read response: {error}"));
        }
        CollaboratorError::Unreachable(error.to_string())
    }

    /// Maps a non-success status to `CollaboratorError`.
    fn map_status(status: StatusCode, url: &Url, body: &str) -> CollaboratorError {
        let detail = if body.trim().is_empty() {
            format!("{status} from {url}")
        } else {
            format!("{status} from {url}: {}", body.trim())
        };
        match status {
            StatusCode::NOT_FOUND => CollaboratorError::NotFound(detail),
            StatusCode::CONFLICT => CollaboratorError::Conflict(detail),
            _ => CollaboratorError::Rejected(detail),
        }
    }
}

impl PersistencePort for RestBackend {
    fn add_request_to_collection(
        &self,
        collection_id: &str,
        request: &RequestDraft,
    ) -> impl Future<Output = Result<RequestPayload, CollaboratorError>> + Send {
        let endpoint = self.endpoint(&["collections", collection_id, "requests"]);
        let request = request.clone();

        async move {
            let url = endpoint?;
            Self::send(self.client.post(url).json(&request)).await
        }
    }

    fn get_all_requests_from_collection(
        &self,
        collection_id: &str,
    ) -> impl Future<Output = Result<Vec<RequestPayload>, CollaboratorError>> + Send {
        let endpoint = self.endpoint(&["collections", collection_id, "requests"]);

        async move {
            let url = endpoint?;
            Self::send(self.client.get(url)).await
        }
    }

    fn save_request(
        &self,
        id: &str,
        request: &RequestDraft,
    ) -> impl Future<Output = Result<RequestPayload, CollaboratorError>> + Send {
        let endpoint = self.endpoint(&["requests", id]);
        let request = request.clone();

        async move {
            let url = endpoint?;
            Self::send(self.client.put(url).json(&request)).await
        }
    }

    fn list_collections(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = Result<Vec<Collection>, CollaboratorError>> + Send {
        let endpoint = self.endpoint(&["workspaces", workspace_id, "collections"]);

        async move {
            let url = endpoint?;
            Self::send(self.client.get(url)).await
        }
    }
}

impl ExecutionPort for RestBackend {
    fn run(
        &self,
        request_id: &str,
    ) -> impl Future<Output = Result<ExecutionPayload, CollaboratorError>> + Send {
        let endpoint = self.endpoint(&["requests", request_id, "run"]);

        async move {
            let url = endpoint?;
            let response: RunResponse = Self::send(self.client.post(url)).await?;
            Ok(response.into())
        }
    }
}
