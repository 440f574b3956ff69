// Management center HTTP client
//
// Wraps `reqwest::Client` with FMC URL construction, access-token
// injection and response decoding. Authentication lives in `auth.rs`,
// name/id lookups in `lookup.rs`; this module only deals with moving
// requests and responses.

use std::sync::RwLock;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::version::ServerVersion;

/// Page size used when the caller does not configure one.
pub const DEFAULT_LIMIT: u32 = 1000;

pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-auth-access-token";
pub(crate) const REFRESH_TOKEN_HEADER: &str = "X-auth-refresh-token";

/// Characters of a response body kept in error messages.
const PREVIEW_CHARS: usize = 200;

/// Leading `max` characters of `body`, cut on a char boundary.
fn preview(body: &str, max: usize) -> &str {
    body.char_indices().nth(max).map_or(body, |(i, _)| &body[..i])
}

/// Error body shape: `{"error":{"messages":[{"description":"..."}]}}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: Option<ErrorInner>,
}

#[derive(serde::Deserialize)]
struct ErrorInner {
    #[serde(default)]
    messages: Vec<ErrorMessage>,
}

#[derive(serde::Deserialize)]
struct ErrorMessage {
    #[serde(default)]
    description: Option<String>,
}

pub(crate) struct Tokens {
    pub(crate) access: SecretString,
    pub(crate) refresh: SecretString,
}

/// Client for one management center domain.
///
/// Carries the client-wide defaults every resource object reads at
/// construction time: page `limit`, `dry_run`, and the server version.
pub struct FmcClient {
    http: reqwest::Client,
    base_url: Url,
    domain_uuid: String,
    server_version: ServerVersion,
    limit: u32,
    dry_run: bool,
    /// Access/refresh token pair from `generatetoken`. Rotated by
    /// `refresh_token` when the access token expires.
    tokens: RwLock<Option<Tokens>>,
}

impl FmcClient {
    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// No tokens are attached; use [`FmcClient::connect`] for an
    /// authenticated client. Tests use this against a mock server.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        domain_uuid: String,
        server_version: ServerVersion,
    ) -> Self {
        Self {
            http,
            base_url,
            domain_uuid,
            server_version,
            limit: DEFAULT_LIMIT,
            dry_run: false,
            tokens: RwLock::new(None),
        }
    }

    /// Override the client-wide default page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Enable or disable dry-run mode for mutating resource calls.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub(crate) fn set_server_version(&mut self, version: ServerVersion) {
        self.server_version = version;
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn domain_uuid(&self) -> &str {
        &self.domain_uuid
    }

    pub fn server_version(&self) -> &ServerVersion {
        &self.server_version
    }

    /// Client-wide default page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// When set, resource objects report what they would send instead of
    /// sending it.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    // ── Token management ─────────────────────────────────────────────

    pub(crate) fn set_tokens(&self, tokens: Tokens) {
        debug!("storing access token");
        *self.tokens.write().expect("token lock poisoned") = Some(tokens);
    }

    /// Current `(access, refresh)` pair, copied out so no lock is held
    /// across an await.
    pub(crate) fn token_pair(&self) -> Option<(String, String)> {
        let guard = self.tokens.read().expect("token lock poisoned");
        guard.as_ref().map(|t| {
            (
                t.access.expose_secret().to_owned(),
                t.refresh.expose_secret().to_owned(),
            )
        })
    }

    fn apply_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.tokens.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(tokens) => builder.header(ACCESS_TOKEN_HEADER, tokens.access.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Domain-scoped configuration root:
    /// `{base}/api/fmc_config/v1/domain/{domain_uuid}`.
    pub fn configuration_url(&self) -> String {
        format!(
            "{}/api/fmc_config/v1/domain/{}",
            self.base(),
            self.domain_uuid
        )
    }

    /// Platform root: `{base}/api/fmc_platform/v1`.
    pub fn platform_url(&self) -> String {
        format!("{}/api/fmc_platform/v1", self.base())
    }

    /// Build a URL under the configuration root.
    pub(crate) fn config_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/{path}", self.configuration_url()))?)
    }

    /// Build a URL under the platform root.
    pub(crate) fn platform_endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/{path}", self.platform_url()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a body-less request and decode the JSON response.
    ///
    /// An expired access token is refreshed once and the request re-sent;
    /// any other failure is returned as is.
    pub async fn send_to_api<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
    ) -> Result<T, Error> {
        debug!("{method} {url}");

        let resp = self
            .apply_token(self.http.request(method.clone(), url.clone()))
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED && self.token_pair().is_some() {
            warn!("access token rejected, refreshing");
            self.refresh_token().await?;
            let retry = self
                .apply_token(self.http.request(method, url))
                .send()
                .await?;
            return Self::handle_response(retry).await;
        }

        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        // DELETE and PUT on operational endpoints may answer with no body.
        let body = if body.trim().is_empty() {
            "{}".to_owned()
        } else {
            body
        };
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body, PREVIEW_CHARS)),
            body,
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => {
                return Error::Authentication {
                    message: "access token expired or invalid credentials".into(),
                };
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => return Error::RateLimited,
            _ => {}
        }

        let raw = resp.text().await.unwrap_or_default();
        let described = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.error)
            .map(|inner| {
                inner
                    .messages
                    .into_iter()
                    .filter_map(|m| m.description)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|msg| !msg.is_empty());

        Error::Api {
            status: status.as_u16(),
            message: described.unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw, PREVIEW_CHARS).to_owned()
                }
            }),
        }
    }
}
