use thiserror::Error;

/// Failure of a single API request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request failed before an application response was received:
    /// connection errors, timeouts, non-success status codes, and bodies
    /// that do not decode.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with `success: false`. Shown verbatim.
    #[error("{0}")]
    Application(String),
}

impl RequestError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport("timed out waiting for the server")
        } else if err.is_decode() {
            Self::transport(format!("malformed response body: {err}"))
        } else if let Some(status) = err.status() {
            Self::transport(format!("server responded with {status}"))
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Actions rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("no connection selected")]
    NoConnectionSelected,
    #[error("region query must not be empty")]
    EmptyQuery,
    #[error("connection {0} is not among the available connections")]
    UnknownConnection(shared::domain::ConnectionId),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not valid json: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("persisted settings record is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
}
