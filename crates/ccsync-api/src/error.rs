use thiserror::Error;

/// Top-level error type for the `ccsync-api` crate.
///
/// Covers every failure mode across both API surfaces:
/// authentication, transport, controller tasks, and the hosting API.
/// `ccsync-core` wraps these; the binary maps them to exit codes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token exchange failed or a request was rejected with 401/403.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the hosting API.
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success status from either API.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Optimistic concurrency token was stale (HTTP 409).
    #[error("Conflict: {message}")]
    Conflict { message: String },

    // ── Controller tasks ────────────────────────────────────────────
    /// The controller reported the asynchronous task as failed.
    #[error("Task {task_id} failed: {reason}")]
    TaskFailed { task_id: String, reason: String },

    /// The task did not finish within the polling budget.
    #[error("Task {task_id} still running after {attempts} status checks")]
    TaskTimeout { task_id: String, attempts: u32 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// File content could not be decoded (bad base64 or non-UTF-8).
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl Error {
    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if credentials were rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } | Self::TaskTimeout { .. } => true,
            _ => false,
        }
    }
}

/// First 200 characters of a response body, for error messages.
pub(crate) fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
