use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

/// Process configuration, loaded once at startup and passed in explicitly.
///
/// Sources, later ones winning: built-in defaults, an optional `mintid.json`
/// next to the binary, then `MINTID__`-prefixed environment variables
/// (`MINTID__POSTGRES__URL`, `MINTID__EMAIL_CLIENT__AUTH_TOKEN`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub postgres: PostgresSettings,
    pub email_client: EmailClientSettings,
    pub maintenance: MaintenanceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceSettings {
    pub code_sweep_interval_secs: u64,
}

impl MaintenanceSettings {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.code_sweep_interval_secs)
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0:3000")?
            .set_default("postgres.max_connections", 5_i64)?
            .set_default("email_client.base_url", "https://api.postmarkapp.com/")?
            .set_default("email_client.timeout_in_millis", 10_000_i64)?
            .set_default("maintenance.code_sweep_interval_secs", 300_i64)?
            .add_source(File::with_name("mintid").required(false))
            .add_source(Environment::with_prefix("MINTID").separator("__"))
            .build()?
            .try_deserialize()
    }
}
