// File: client/src/config/mod.rs
pub mod manager;
pub mod secrets;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{config::DEFAULT_MANAGEMENT_PORT, http::NO_TIMEOUT};
use crate::errors::ConfigError;

pub use manager::ConfigManager;
pub use secrets::ServerPasswords;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub default_server: Option<String>,
    /// Applied to server profiles that do not set their own timeout
    pub timeout_ms: Option<u64>,
    // Populated from individual server config files
    #[serde(skip)]
    pub servers: HashMap<String, ConnectionConfig>,
}

impl Config {
    pub fn server(&self, name: &str) -> Result<&ConnectionConfig, ConfigError> {
        self.servers
            .get(name)
            .ok_or_else(|| ConfigError::UnknownServer {
                name: name.to_string(),
            })
    }

    /// Profile named by `default_server`, or the only profile when there is exactly one
    pub fn default_connection(&self) -> Result<&ConnectionConfig, ConfigError> {
        if let Some(name) = &self.default_server {
            return self.server(name);
        }

        let mut profiles = self.servers.values();
        match (profiles.next(), profiles.next()) {
            (Some(only), None) => Ok(only),
            _ => Err(ConfigError::MissingRequired {
                field: "default_server".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfigFile {
    pub server: ConnectionConfig,
}

/// Where and how to reach one server's management interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_management_port")]
    pub port: u16,
    pub credentials: Option<Credentials>,
    /// Connect and read timeout in milliseconds; 0 or absent waits forever
    pub timeout_ms: Option<u64>,
    /// Presence switches the scheme to https
    pub tls: Option<TlsConfig>,
}

fn default_management_port() -> u16 {
    DEFAULT_MANAGEMENT_PORT
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    /// May be left out of the server file and resolved from `secrets.toml`
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default = "default_true")]
    pub certificate_verification: bool,
    /// Turning this off still checks the certificate chain, only the host name match is skipped
    #[serde(default = "default_true")]
    pub hostname_verification: bool,
    /// Extra PEM root certificate to trust
    pub ca_certificate: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            certificate_verification: true,
            hostname_verification: true,
            ca_certificate: None,
        }
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
        }
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: None,
            timeout_ms: None,
            tls: None,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() {
            "https"
        } else {
            "http"
        }
    }

    pub fn management_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme(),
            self.host,
            self.port,
            crate::constants::http::MANAGEMENT_PATH
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms {
            None | Some(NO_TIMEOUT) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        }
    }

    /// Username and password, when both are present
    pub fn credential_pair(&self) -> Option<(&str, &str)> {
        let credentials = self.credentials.as_ref()?;
        let password = credentials.password.as_deref()?;
        Some((credentials.username.as_str(), password))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "host".to_string(),
            });
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                reason: "port must be greater than 0".to_string(),
            });
        }

        if let Some(credentials) = &self.credentials {
            if credentials.username.is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: "credentials.username".to_string(),
                });
            }
            if credentials.password.is_none() {
                return Err(ConfigError::MissingRequired {
                    field: "credentials.password".to_string(),
                });
            }
        }

        if let Some(path) = self.tls.as_ref().and_then(|tls| tls.ca_certificate.as_ref()) {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "tls.ca_certificate".to_string(),
                    reason: format!("{} is not a readable file", path.display()),
                });
            }
        }

        Ok(())
    }
}
