// HTTP client construction for talking to a management center.
//
// FMC appliances usually present the self-signed certificate generated at
// install time, so accepting it is the default; profiles that carry a CA
// bundle switch to `CustomCa`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Certificate;

use crate::error::Error;

/// How the management center's certificate is checked.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Platform trust store.
    System,
    /// PEM bundle that signed the management center's certificate.
    CustomCa(PathBuf),
    /// No verification. Matches an appliance still on its install-time cert.
    DangerAcceptInvalid,
}

/// Settings for the `reqwest::Client` behind an [`FmcClient`](crate::FmcClient).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Per-request timeout. Hit-count queries on large policies can be slow.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("fmc-hitcounts/", env!("CARGO_PKG_VERSION")));

        let builder = match &self.tls {
            TlsMode::System => builder,
            TlsMode::CustomCa(path) => builder.add_root_certificate(load_ca(path)?),
            TlsMode::DangerAcceptInvalid => builder.danger_accept_invalid_certs(true),
        };

        builder
            .build()
            .map_err(|e| Error::Tls(format!("cannot build HTTP client: {e}")))
    }
}

fn load_ca(path: &Path) -> Result<Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA bundle {}: {e}", path.display())))?;
    Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("{} is not a PEM certificate: {e}", path.display())))
}
