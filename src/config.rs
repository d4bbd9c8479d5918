//! Process configuration read once from the environment

use crate::error::ConfigError;
use crate::provider::{ProviderProfile, DEFAULT_PROVIDER};
use lettre::message::Mailbox;

/// Default SMTP submission port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Outbound mail relay settings
#[derive(Clone, PartialEq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

// Keep the password out of logs
impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Immutable run configuration, shared by the fetcher and the notifier
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub provider: ProviderProfile,
    pub smtp: SmtpSettings,
}

impl Config {
    /// Load from the process environment (after `.env` has been applied).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let api_key = require("RAPIDAPI_KEY")?;

        let provider = match get("PRICE_PROVIDER") {
            Some(name) => ProviderProfile::by_name(&name)?,
            None => ProviderProfile::by_name(DEFAULT_PROVIDER)?,
        };

        let port = match get("SMTP_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SMTP_PORT",
                value: raw,
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let server = require("SMTP_SERVER")?;

        // Doubles as the From address of the alert
        let username = require("SMTP_USER")?;
        if username.trim().parse::<Mailbox>().is_err() {
            return Err(ConfigError::Invalid {
                name: "SMTP_USER",
                value: username,
            });
        }

        let smtp = SmtpSettings {
            server,
            port,
            username,
            password: require("SMTP_PASS")?,
        };

        log::debug!("Using price provider {} and SMTP relay {:?}", provider.name, smtp);

        Ok(Self {
            api_key,
            provider,
            smtp,
        })
    }
}
