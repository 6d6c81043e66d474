//! Configuration management for the emergency intake service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use afterhours_airtable::client::{ClientConfig, DEFAULT_API_BASE_URL};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The service starts without any configuration, but record-creation calls
/// fail upstream until `AIRTABLE_TOKEN` and `BASE_ID` are provided. That
/// failure mode is deliberate: absence of the credential is a runtime
/// upstream failure, never a startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Airtable
    /// Bearer credential for the Airtable API.
    ///
    /// Environment variable: `AIRTABLE_TOKEN`
    #[serde(default, alias = "AIRTABLE_TOKEN")]
    pub airtable_token: String,
    /// Airtable base the call-log table lives in.
    ///
    /// Environment variable: `BASE_ID`
    #[serde(default, alias = "BASE_ID")]
    pub base_id: String,
    /// Name of the table emergency records are written to.
    ///
    /// Environment variable: `AFTERHOURS_TABLE_NAME`
    #[serde(default = "default_table_name", alias = "AFTERHOURS_TABLE_NAME")]
    pub afterhours_table_name: String,
    /// Airtable API base URL; overridden in tests.
    ///
    /// Environment variable: `AIRTABLE_API_BASE_URL`
    #[serde(default = "default_api_base_url", alias = "AIRTABLE_API_BASE_URL")]
    pub airtable_api_base_url: String,
    /// Deadline for the outbound record-create call in seconds.
    ///
    /// Environment variable: `AIRTABLE_TIMEOUT_SECONDS`
    #[serde(default = "default_airtable_timeout", alias = "AIRTABLE_TIMEOUT_SECONDS")]
    pub airtable_timeout_seconds: u64,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the Airtable client's configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.airtable_api_base_url.clone(),
            base_id: self.base_id.clone(),
            token: self.airtable_token.clone(),
            timeout: Duration::from_secs(self.airtable_timeout_seconds),
            user_agent: "Afterhours-Intake/1.0".to_string(),
        }
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Whether the Airtable credential is configured.
    ///
    /// The health endpoint reports presence only; the value itself is
    /// never exposed or logged.
    pub fn has_airtable_token(&self) -> bool {
        !self.airtable_token.is_empty()
    }

    /// Whether the Airtable base identifier is configured.
    pub fn has_base_id(&self) -> bool {
        !self.base_id.is_empty()
    }

    /// Validate configuration values.
    ///
    /// An absent token or base id is deliberately accepted; by contract
    /// those fail at record-creation time, not at startup.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.airtable_timeout_seconds == 0 {
            anyhow::bail!("airtable_timeout_seconds must be greater than 0");
        }

        if self.afterhours_table_name.is_empty() {
            anyhow::bail!("afterhours_table_name must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            airtable_token: String::new(),
            base_id: String::new(),
            afterhours_table_name: default_table_name(),
            airtable_api_base_url: default_api_base_url(),
            airtable_timeout_seconds: default_airtable_timeout(),
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_table_name() -> String {
    "AfterHoursCallLog".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_airtable_timeout() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
