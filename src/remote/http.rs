use std::time::Duration;

use anyhow::Context;
use reqwest::Client;

#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 2000,
            request_timeout_ms: 15_000,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub(crate) fn build_http_client(
    http: HttpConfig,
    context_msg: &'static str,
) -> anyhow::Result<Client> {
    Client::builder()
        .connect_timeout(http.connect_timeout())
        .timeout(http.request_timeout())
        .build()
        .context(context_msg)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Could not reach the remote engine at all.
    Connection,
    Timeout,
    /// The engine answered with a non-success status.
    Status,
    Other,
}

/// Single discriminated failure for every file-store operation. Handlers render
/// transport failures and application statuses uniformly, so both collapse here.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub http_status: Option<u16>,
    pub message: String,
}

impl StoreError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Status,
            http_status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status == Some(404)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.http_status) {
            (StoreErrorKind::Status, Some(code)) => {
                write!(f, "HTTP {}: {}", code, self.message)
            }
            (StoreErrorKind::Timeout, _) => write!(f, "timed out: {}", self.message),
            (StoreErrorKind::Connection, _) => write!(f, "connection failed: {}", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for StoreError {}

pub(crate) fn classify_reqwest_error(err: &reqwest::Error, what: &str) -> StoreError {
    let kind = if err.is_timeout() {
        StoreErrorKind::Timeout
    } else if err.is_connect() {
        StoreErrorKind::Connection
    } else {
        StoreErrorKind::Other
    };
    StoreError {
        kind,
        http_status: err.status().map(|s| s.as_u16()),
        message: format!("{what}: {err}"),
    }
}

pub(crate) fn truncate_for_error(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}
