//! HTTP access to the region API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Connection, ConnectionId},
    protocol::{
        ApiEnvelope, FindRegionRequest, FindRegionResult, CONNECTIONS_PATH, FIND_REGION_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::error::RequestError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MISSING_FAILURE_MESSAGE: &str = "the server rejected the request without a message";

#[async_trait]
pub trait RegionApi: Send + Sync {
    async fn list_connections(&self) -> Result<Vec<Connection>, RequestError>;
    async fn find_region(
        &self,
        connection: ConnectionId,
        query: &str,
    ) -> Result<FindRegionResult, RequestError>;
}

pub struct HttpRegionApi {
    http: Client,
    base_url: Url,
}

impl HttpRegionApi {
    pub fn new(server_url: &str) -> Result<Self, RequestError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let base_url = parse_base_url(server_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(path)
            .map_err(|err| RequestError::transport(format!("invalid endpoint {path}: {err}")))
    }
}

/// Parses the server url and makes sure relative endpoint paths are resolved
/// below it rather than replacing its last segment.
fn parse_base_url(server_url: &str) -> Result<Url, RequestError> {
    let mut base_url = Url::parse(server_url.trim()).map_err(|err| {
        RequestError::transport(format!("invalid server url {server_url}: {err}"))
    })?;
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url)
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, RequestError> {
    if !envelope.success {
        return Err(RequestError::application(
            envelope
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| MISSING_FAILURE_MESSAGE.to_string()),
        ));
    }

    envelope
        .result
        .ok_or_else(|| RequestError::transport("malformed response body: missing result"))
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let envelope: ApiEnvelope<T> = response.error_for_status()?.json().await?;
    unwrap_envelope(envelope)
}

#[async_trait]
impl RegionApi for HttpRegionApi {
    async fn list_connections(&self) -> Result<Vec<Connection>, RequestError> {
        let url = self.endpoint(CONNECTIONS_PATH)?;
        debug!(%url, "requesting connections");
        let response = self.http.post(url).send().await?;
        decode(response).await
    }

    async fn find_region(
        &self,
        connection: ConnectionId,
        query: &str,
    ) -> Result<FindRegionResult, RequestError> {
        let url = self.endpoint(FIND_REGION_PATH)?;
        debug!(%url, %connection, query, "requesting region search");
        let response = self
            .http
            .post(url)
            .json(&FindRegionRequest {
                connection,
                query: query.to_string(),
            })
            .send()
            .await?;
        decode(response).await
    }
}
