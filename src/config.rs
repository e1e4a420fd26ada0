//! Layered service configuration.
//!
//! Sources, highest priority first:
//!
//! 1. `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and `TWILIO_FROM_NUMBER`
//! 2. `TICKLER_*` environment variables, `__` separating sections
//!    (`TICKLER_SERVER__BIND_ADDR` maps to `server.bind_addr`)
//! 3. `tickler.toml` in the working directory or one of its parents
//! 4. Built-in defaults
//!
//! Twilio credentials have no defaults. [`ServiceConfig::load`] rejects a
//! configuration without them so the process fails at startup rather than
//! on its first reminder.

use crate::task::adapters::twilio::{DEFAULT_TWILIO_BASE_URL, TwilioSettings};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "tickler.toml";

const ENV_PREFIX: &str = "TICKLER_";
const TWILIO_ENV_KEYS: [&str; 3] = ["TWILIO_ACCOUNT_SID", "TWILIO_AUTH_TOKEN", "TWILIO_FROM_NUMBER"];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A required credential is unset or blank.
    #[error("missing required credential {0}")]
    MissingCredential(&'static str),

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted field path.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the HTTP surface binds to.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_owned(),
        }
    }
}

/// Scheduler executor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Delay between executor ticks in milliseconds.
    pub tick_millis: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { tick_millis: 1_000 }
    }
}

/// Task store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL. Without one, tasks live in memory.
    pub url: Option<String>,
}

/// Twilio account settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TwilioConfig {
    /// Account SID.
    #[serde(default)]
    pub account_sid: String,
    /// Auth token.
    #[serde(default)]
    pub auth_token: String,
    /// Sender number.
    #[serde(default)]
    pub from_number: String,
    /// API root.
    pub base_url: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: DEFAULT_TWILIO_BASE_URL.to_owned(),
        }
    }
}

impl TwilioConfig {
    /// Converts the section into adapter settings.
    #[must_use]
    pub fn settings(&self) -> TwilioSettings {
        TwilioSettings::new(&self.account_sid, &self.auth_token, &self.from_number)
            .with_base_url(&self.base_url)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Scheduler executor.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Task store.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// SMS transport.
    #[serde(default)]
    pub twilio: TwilioConfig,
}

impl ServiceConfig {
    /// Builds the provider chain described in the module docs.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE_NAME))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&TWILIO_ENV_KEYS)
                    .map(|key| {
                        key.as_str()
                            .to_ascii_lowercase()
                            .replacen("twilio_", "twilio.", 1)
                            .into()
                    }),
            )
    }

    /// Loads and validates configuration from every source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails, a Twilio credential is
    /// missing or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extracts and validates configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails, a Twilio credential is
    /// missing or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let credentials = [
            ("TWILIO_ACCOUNT_SID", &self.twilio.account_sid),
            ("TWILIO_AUTH_TOKEN", &self.twilio.auth_token),
            ("TWILIO_FROM_NUMBER", &self.twilio.from_number),
        ];
        if let Some((name, _)) = credentials
            .iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ConfigError::MissingCredential(name));
        }
        if self.scheduler.tick_millis == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.tick_millis",
                reason: "must be greater than zero".to_owned(),
            });
        }
        self.bind_addr()?;
        Ok(())
    }

    /// Parses the configured listener address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `server.bind_addr` is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind_addr",
                reason: err.to_string(),
            })
    }

    /// Returns the scheduler tick as a [`Duration`].
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.tick_millis)
    }
}
