//! CLI error types with miette diagnostics.
//!
//! Maps `fmc_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fmc_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const UNSUPPORTED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the management center")]
    #[diagnostic(
        code(fmc::connection_failed),
        help("Check the host and network path. Self-signed certificate? Try --insecure (-k).")
    )]
    ConnectionFailed {
        #[source]
        source: fmc_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(fmc::auth_failed),
        help("Verify the username and password, or set FMC_PASSWORD.")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(fmc::no_credentials),
        help("Set username/password in the profile, or pass --username and FMC_PASSWORD.")
    )]
    NoCredentials { profile: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No management center configured")]
    #[diagnostic(
        code(fmc::no_config),
        help("Create a profile in {path}\nor pass --host, --username and FMC_PASSWORD.")
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(code(fmc::profile_not_found))]
    ProfileNotFound { name: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fmc::validation))]
    Validation { field: String, reason: String },

    #[error("Refusing to {action} without confirmation")]
    #[diagnostic(code(fmc::confirm), help("Pass --yes to confirm."))]
    ConfirmationRequired { action: String },

    // ── Hit counts ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(fmc::refused),
        help("Pass --acp-id/--acp-name and at least one of --device-*/--prefilter-*.")
    )]
    Refused { message: String },

    #[error("Management center {found} is too old (hit counts need {required} or later)")]
    #[diagnostic(code(fmc::unsupported_version))]
    UnsupportedVersion { found: String, required: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(fmc::api_error))]
    Api { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(fmc::error))]
    Other(fmc_api::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NoConfig { .. }
            | Self::ProfileNotFound { .. }
            | Self::Validation { .. }
            | Self::ConfirmationRequired { .. }
            | Self::Refused { .. } => exit_code::USAGE,
            Self::UnsupportedVersion { .. } => exit_code::UNSUPPORTED,
            Self::Api { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Api { .. } | Self::Other(_) => exit_code::GENERAL,
        }
    }
}

impl From<fmc_api::Error> for CliError {
    fn from(err: fmc_api::Error) -> Self {
        use fmc_api::Error as E;
        match err {
            E::Authentication { message } => Self::AuthFailed { message },
            E::Transport(_) | E::Tls(_) => Self::ConnectionFailed { source: err },
            E::Validation { message, .. } => Self::Refused { message },
            E::MissingIdentifier { .. } => Self::Refused {
                message: err.to_string(),
            },
            E::UnsupportedVersion { found, required } => {
                Self::UnsupportedVersion { found, required }
            }
            E::Api { status, message } => Self::Api { status, message },
            other => Self::Other(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => Self::ProfileNotFound { name },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
