use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::module::sat::Coordinate;

/// Monitor configuration, read from `config.toml`.
///
/// Every field has a default, so a missing file and a partial file
/// both work. Secrets never live here; see [`MailCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_observer_latitude")]
    pub observer_latitude: f64,

    #[serde(default = "default_observer_longitude")]
    pub observer_longitude: f64,

    /// Seconds between polling ticks.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,
}

fn default_observer_latitude() -> f64 {
    26.5458
}

fn default_observer_longitude() -> f64 {
    77.0197
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            observer_latitude: default_observer_latitude(),
            observer_longitude: default_observer_longitude(),
            poll_interval_secs: default_poll_interval_secs(),
            log_level: default_log_level(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
        }
    }
}

impl MonitorConfig {
    /// Load the configuration file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: MonitorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;

        Ok(config)
    }

    pub fn observer(&self) -> Coordinate {
        Coordinate::new(self.observer_latitude, self.observer_longitude)
    }
}

/// The three required notification variables.
///
/// Absence of any of them disables notification but not monitoring.
#[derive(Debug, Clone)]
pub struct MailCredentials {
    pub sender: String,
    pub receiver: String,
    pub password: String,
}

impl MailCredentials {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            sender: non_empty(lookup("SENDER_EMAIL"))?,
            receiver: non_empty(lookup("RECEIVER_EMAIL"))?,
            password: non_empty(lookup("EMAIL_PASSWORD"))?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
