// Token authentication
//
// `generatetoken` takes HTTP basic credentials and answers with the access
// and refresh tokens plus the user's domains, all in response headers.
// Access tokens live 30 minutes and may be refreshed three times.

use reqwest::Method;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::client::{ACCESS_TOKEN_HEADER, FmcClient, REFRESH_TOKEN_HEADER, Tokens};
use crate::error::Error;
use crate::models::Page;
use crate::transport::TransportConfig;
use crate::version::ServerVersion;

const DOMAIN_UUID_HEADER: &str = "DOMAIN_UUID";
const DOMAINS_HEADER: &str = "DOMAINS";

/// Everything needed to open an authenticated [`FmcClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Management center root, e.g. `https://fmc.example.com`.
    pub host: Url,
    pub username: String,
    pub password: SecretString,
    /// Domain name (e.g. `Global/Branch`). `None` selects the user's
    /// default domain.
    pub domain: Option<String>,
    pub transport: TransportConfig,
    /// Client-wide default page size.
    pub limit: u32,
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct DomainEntry {
    name: String,
    uuid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerVersionItem {
    #[serde(default)]
    server_version: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn tokens_from(headers: &HeaderMap) -> Result<Tokens, Error> {
    let access = header_str(headers, ACCESS_TOKEN_HEADER).ok_or_else(|| Error::Authentication {
        message: "response carried no access token".into(),
    })?;
    let refresh = header_str(headers, REFRESH_TOKEN_HEADER).unwrap_or_default();
    Ok(Tokens {
        access: SecretString::from(access.to_owned()),
        refresh: SecretString::from(refresh.to_owned()),
    })
}

/// Pick the domain UUID: the named domain from `DOMAINS` when one is
/// requested, otherwise the user's default `DOMAIN_UUID`.
fn select_domain(headers: &HeaderMap, wanted: Option<&str>) -> Result<String, Error> {
    let Some(name) = wanted else {
        return header_str(headers, DOMAIN_UUID_HEADER)
            .map(str::to_owned)
            .ok_or_else(|| Error::Authentication {
                message: "response carried no domain UUID".into(),
            });
    };

    let domains: Vec<DomainEntry> = header_str(headers, DOMAINS_HEADER)
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();

    domains
        .into_iter()
        .find(|d| d.name == name || d.name.strip_prefix("Global/") == Some(name))
        .map(|d| d.uuid)
        .ok_or_else(|| Error::UnknownDomain { name: name.into() })
}

impl FmcClient {
    /// Authenticate and return a client bound to the configured domain.
    ///
    /// Also fetches the server version so resource objects can gate
    /// features without another round trip.
    pub async fn connect(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let base = config.host.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}/api/fmc_platform/v1/auth/generatetoken"))?;

        debug!("requesting token at {url}");

        let resp = http
            .post(url)
            .basic_auth(&config.username, Some(config.password.expose_secret()))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let headers = resp.headers();
        let tokens = tokens_from(headers)?;
        let domain_uuid = select_domain(headers, config.domain.as_deref())?;

        let mut client = Self::with_client(
            http,
            config.host.clone(),
            domain_uuid,
            ServerVersion::parse(""),
        )
        .with_limit(config.limit)
        .with_dry_run(config.dry_run);
        client.set_tokens(tokens);

        let version = client.fetch_server_version().await?;
        info!(version = %version, domain = client.domain_uuid(), "connected to management center");
        client.set_server_version(version);

        Ok(client)
    }

    /// Exchange the refresh token for a new token pair.
    pub async fn refresh_token(&self) -> Result<(), Error> {
        let (access, refresh) = self.token_pair().ok_or_else(|| Error::Authentication {
            message: "no token to refresh".into(),
        })?;
        let url = self.platform_endpoint("auth/refreshtoken")?;

        debug!("refreshing token at {url}");

        let resp = self
            .http()
            .post(url)
            .header(ACCESS_TOKEN_HEADER, access)
            .header(REFRESH_TOKEN_HEADER, refresh)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("token refresh failed (HTTP {status})"),
            });
        }

        self.set_tokens(tokens_from(resp.headers())?);
        debug!("token refreshed");
        Ok(())
    }

    /// Query `info/serverversion`.
    pub async fn fetch_server_version(&self) -> Result<ServerVersion, Error> {
        let url = self.platform_endpoint("info/serverversion")?;
        let page: Page<ServerVersionItem> = self.send_to_api(Method::GET, url).await?;
        let raw = page
            .items
            .into_iter()
            .find_map(|item| item.server_version)
            .unwrap_or_default();
        Ok(ServerVersion::parse(&raw))
    }
}
