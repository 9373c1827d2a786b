//! Configuration management for the balance notifier
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer built-in defaults, a TOML file, environment
//! variables and command-line arguments, in that order of precedence.
//!
//! The `[params]` table carries the notifier's parameters under the same key
//! names the parameter store uses:
//!
//! | Key                       | Default       |
//! |---------------------------|---------------|
//! | `toughcloud_license`      | —             |
//! | `toughcloud_service_mail` | — (disables cloud mail) |
//! | `toughcloud_service_call` | `""`          |
//! | `smtp_server`             | `127.0.0.1`   |
//! | `smtp_from`               | —             |
//! | `smtp_port`               | `25`          |
//! | `smtp_sender`             | —             |
//! | `smtp_user`               | —             |
//! | `smtp_pwd`                | —             |

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the cloud notification API.
    pub cloud: CloudConfig,
    /// Notifier parameters.
    pub params: ParamConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            cloud: CloudConfig::default(),
            params: ParamConfig::default(),
        }
    }
}

/// Configuration for the cloud notification API.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CloudConfig {
    /// Base URL; `/sendsms` and `/sendmail` are appended to it.
    pub api_url: String,
    /// Timeout applied to every outbound HTTP request, in seconds.
    pub timeout_seconds: u64,
    /// A fixed system token. Takes precedence over `token_url`.
    pub token: Option<String>,
    /// An endpoint that returns the system token as its response body.
    pub token_url: Option<String>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_url: "https://www.toughcloud.net/api/v1".to_string(),
            timeout_seconds: 10,
            token: None,
            token_url: None,
        }
    }
}

/// Notifier parameters, keyed as in the parameter store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ParamConfig {
    /// Shared secret used to sign cloud requests.
    pub toughcloud_license: Option<String>,
    /// Service mailbox; when absent the cloud mail notice is disabled.
    pub toughcloud_service_mail: Option<String>,
    /// Service hotline included in cloud mail notices.
    pub toughcloud_service_call: String,
    pub smtp_server: String,
    pub smtp_from: Option<String>,
    pub smtp_port: u16,
    /// Display name for the From mailbox.
    pub smtp_sender: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pwd: Option<String>,
}

impl Default for ParamConfig {
    fn default() -> Self {
        Self {
            toughcloud_license: None,
            toughcloud_service_mail: None,
            toughcloud_service_call: String::new(),
            smtp_server: "127.0.0.1".to_string(),
            smtp_from: None,
            smtp_port: 25,
            smtp_sender: None,
            smtp_user: None,
            smtp_pwd: None,
        }
    }
}

impl ParamConfig {
    /// The signing secret, trimmed. `None` when unset or blank.
    pub fn license(&self) -> Option<&str> {
        non_blank(self.toughcloud_license.as_deref())
    }

    /// The service mailbox. `None` when unset or blank.
    pub fn service_mail(&self) -> Option<&str> {
        non_blank(self.toughcloud_service_mail.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are merged in this order, later ones winning:
    /// 1. Built-in defaults
    /// 2. The TOML file named by `--config`, if any
    /// 3. Environment variables prefixed with `BALANCE_NOTIFY_`
    /// 4. Command-line arguments
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }

        // e.g. BALANCE_NOTIFY_PARAMS__SMTP_PORT=2525
        let config: Config = figment
            .merge(Env::prefixed("BALANCE_NOTIFY_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}
