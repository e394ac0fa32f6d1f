//! Environment configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_SESSIONS: usize = 1024;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for reaching the language model collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorConfig {
    pub api_key: String,
    /// Gateway base URL; when set the gateway handles auth
    pub gateway: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `None` means offline templates only
    pub collaborator: Option<CollaboratorConfig>,
    /// `VILLAGE_DOCTOR_OFFLINE` was set
    pub forced_offline: bool,
    pub max_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            collaborator: None,
            forced_offline: false,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get("VILLAGE_DOCTOR_HOST") {
            Some(v) => parse(&v, "VILLAGE_DOCTOR_HOST", "an IP address")?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match get("VILLAGE_DOCTOR_PORT") {
            Some(v) => parse(&v, "VILLAGE_DOCTOR_PORT", "a port number")?,
            None => DEFAULT_PORT,
        };
        let max_sessions = match get("VILLAGE_DOCTOR_MAX_SESSIONS") {
            Some(v) => match parse::<usize>(&v, "VILLAGE_DOCTOR_MAX_SESSIONS", "a positive integer")? {
                0 => return Err(invalid("VILLAGE_DOCTOR_MAX_SESSIONS", "a positive integer", &v)),
                n => n,
            },
            None => DEFAULT_MAX_SESSIONS,
        };
        let offline = match get("VILLAGE_DOCTOR_OFFLINE") {
            Some(v) => parse_bool(&v, "VILLAGE_DOCTOR_OFFLINE")?,
            None => false,
        };
        let timeout_secs = match get("VILLAGE_DOCTOR_LLM_TIMEOUT_SECS") {
            Some(v) => parse(&v, "VILLAGE_DOCTOR_LLM_TIMEOUT_SECS", "a number of seconds")?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let gateway = get("LLM_GATEWAY");
        // Gateway mode authenticates on our behalf
        let api_key = match (get("OPENAI_API_KEY"), &gateway) {
            (Some(key), _) => Some(key),
            (None, Some(_)) => Some("implicit".to_string()),
            (None, None) => None,
        };

        let collaborator = match api_key {
            Some(api_key) if !offline => Some(CollaboratorConfig {
                api_key,
                gateway,
                model: get("VILLAGE_DOCTOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            collaborator,
            forced_offline: offline,
            max_sessions,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Why guidance comes from offline templates only
    pub fn offline_reason(&self) -> &'static str {
        if self.forced_offline {
            "VILLAGE_DOCTOR_OFFLINE is set"
        } else {
            "No OPENAI_API_KEY or LLM_GATEWAY configured"
        }
    }
}

fn parse<T: std::str::FromStr>(
    value: &str,
    var: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(var, expected, value))
}

fn parse_bool(value: &str, var: &'static str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, "a boolean", value)),
    }
}

fn invalid(var: &'static str, expected: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        expected,
        value: value.to_string(),
    }
}
