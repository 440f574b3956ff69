//! Flag-aware configuration: profile from `fmc-config`, then CLI overrides.

use std::time::Duration;

use secrecy::SecretString;

use fmc_api::{ClientConfig, TlsMode};
use fmc_config::{Config, Defaults, parse_host, profile_to_client_config, transport_for};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = fmc_config::load_config_or_default();
    resolve(&cfg, global)
}

pub(crate) fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut client = if let Some(profile) = cfg.profiles.get(&profile_name) {
        profile_to_client_config(profile, &profile_name, &cfg.defaults)?
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound { name: profile_name });
    } else {
        from_flags(global, &cfg.defaults, &profile_name)?
    };

    if let Some(ref host) = global.host {
        client.host = parse_host(host)?;
    }
    if let Some(ref username) = global.username {
        client.username.clone_from(username);
    }
    if let Some(ref password) = global.password {
        client.password = SecretString::from(password.clone());
    }
    if global.domain.is_some() {
        client.domain.clone_from(&global.domain);
    }
    if global.insecure {
        client.transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.transport.timeout = Duration::from_secs(secs);
    }
    client.dry_run |= global.dry_run;

    Ok(client)
}

/// No profile on disk: everything must come from flags / env vars.
fn from_flags(
    global: &GlobalOpts,
    defaults: &Defaults,
    profile_name: &str,
) -> Result<ClientConfig, CliError> {
    let host = global.host.as_deref().ok_or_else(|| CliError::NoConfig {
        path: fmc_config::config_path().display().to_string(),
    })?;

    let (Some(username), Some(password)) = (&global.username, &global.password) else {
        return Err(CliError::NoCredentials {
            profile: profile_name.into(),
        });
    };

    let bare = fmc_config::Profile {
        host: host.into(),
        ..fmc_config::Profile::default()
    };

    Ok(ClientConfig {
        host: parse_host(host)?,
        username: username.clone(),
        password: SecretString::from(password.clone()),
        domain: global.domain.clone(),
        transport: transport_for(&bare, defaults),
        limit: defaults.limit,
        dry_run: defaults.dry_run,
    })
}
