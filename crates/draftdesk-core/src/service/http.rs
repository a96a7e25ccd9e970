//! HTTP backend client.

use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    AgentStatus, DeleteRequest, DraftRequest, DraftResponse, DraftService, InboxService,
    ReplyRequest, ServiceError,
};
use crate::config::BackendConfig;
use crate::model::{Email, ThreadId, ThreadMemory};

/// Longest error body carried into a [`ServiceError::Status`].
const MAX_ERROR_LEN: usize = 200;

/// Client for the draft backend's JSON API.
///
/// Every request is a single point-to-point exchange; retries and
/// connection reuse are left to `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid base URL or the HTTP
    /// client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, ServiceError> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| ServiceError::InvalidEndpoint(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidEndpoint(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint from path segments, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<String, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(&[path])?;
        debug!(%url, "POST");
        execute(self.client.post(url).json(body)).await
    }

    async fn get(&self, segments: &[&str]) -> Result<String, ServiceError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        execute(self.client.get(url)).await
    }
}

/// Sends a request and returns the body of a successful response.
async fn execute(request: RequestBuilder) -> Result<String, ServiceError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ServiceError::status(status.as_u16(), error_summary(&body)));
    }

    Ok(body)
}

/// First non-blank line of an error body, cut to [`MAX_ERROR_LEN`] characters.
fn error_summary(body: &str) -> String {
    let line = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    match line.char_indices().nth(MAX_ERROR_LEN) {
        Some((end, _)) => format!("{}...", &line[..end]),
        None => line.to_string(),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

impl DraftService for HttpBackend {
    async fn generate(&self, request: &DraftRequest) -> Result<DraftResponse, ServiceError> {
        let body = self.post("generate_draft", request).await?;
        decode(&body)
    }

    async fn send(&self, reply: &ReplyRequest) -> Result<(), ServiceError> {
        self.post("send_reply", reply).await.map(drop)
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), ServiceError> {
        self.post("delete_email", request).await.map(drop)
    }
}

impl InboxService for HttpBackend {
    async fn list_emails(&self) -> Result<Vec<Email>, ServiceError> {
        let body = self.get(&["emails"]).await?;
        decode(&body)
    }

    async fn thread_memory(&self, thread_id: &ThreadId) -> Result<ThreadMemory, ServiceError> {
        let body = self.get(&["thread", thread_id.as_str()]).await?;
        decode(&body)
    }

    async fn run_agent(&self) -> Result<AgentStatus, ServiceError> {
        let url = self.endpoint(&["process"])?;
        debug!(%url, "POST");
        let body = execute(self.client.post(url)).await?;
        decode(&body)
    }
}
