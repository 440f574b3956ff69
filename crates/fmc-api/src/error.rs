use thiserror::Error;

use crate::hitcount::Diagnostics;

/// Top-level error type for the `fmc-api` crate.
///
/// Transport, authentication and data failures come from [`FmcClient`](crate::FmcClient);
/// the remaining variants are the refusals of the hit-count model.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token generation or refresh failed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The configured domain is not one the user can access.
    #[error("Domain '{name}' not available to this user")]
    UnknownDomain { name: String },

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

    /// Rate limited by the FMC (120 requests per minute per user).
    #[error("Rate limited by the management center")]
    RateLimited,

    /// Non-success HTTP status from the REST API.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Hit-count model ─────────────────────────────────────────────
    /// A setter was called without a usable name or id.
    #[error("No {target} name or id was provided")]
    MissingIdentifier { target: &'static str },

    /// The management center is older than the feature requires.
    #[error("Server version {found} does not support this feature (requires {required} or later)")]
    UnsupportedVersion { found: String, required: String },

    /// Required filter criteria are missing. `diagnostics` holds any
    /// override that failed to resolve on the way, e.g. an unknown name.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        diagnostics: Diagnostics,
    },

    /// The resource does not support the requested operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl Error {
    /// Returns `true` if the access token was rejected.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Api { status: 401, .. })
    }

    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if the hit-count model refused the call before
    /// anything was sent.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentifier { .. }
                | Self::UnsupportedVersion { .. }
                | Self::Validation { .. }
                | Self::UnsupportedOperation(_)
        )
    }
}
