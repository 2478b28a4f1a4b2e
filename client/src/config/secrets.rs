// File: client/src/config/secrets.rs
//! Management passwords kept outside the server profiles.
//!
//! A profile may name a username and leave the password out; the password is
//! then looked up in `secrets.toml` under the profile's file name. A password
//! written in the profile itself always wins.
//!
//! ```toml
//! [passwords]
//! local = "admin-password"
//! staging = "other-password"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::ConnectionConfig;
use crate::errors::ConfigError;

#[derive(Debug, Default, Deserialize)]
pub struct ServerPasswords {
    #[serde(default)]
    passwords: HashMap<String, String>,
}

impl ServerPasswords {
    /// An absent file yields no passwords; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "No {} found, every profile with credentials must carry its own password",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let store: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: format!("{}: {}", path.display(), e),
        })?;

        debug!("{} holds passwords for {} profiles", path.display(), store.passwords.len());
        Ok(store)
    }

    pub fn password_for(&self, profile: &str) -> Option<&str> {
        self.passwords.get(profile).map(String::as_str)
    }

    /// Fill in the password of `server` when its profile left it out
    pub fn complete(&self, profile: &str, server: &mut ConnectionConfig) {
        let Some(credentials) = server.credentials.as_mut() else {
            return;
        };
        if credentials.password.is_none() {
            credentials.password = self.password_for(profile).map(str::to_string);
        }
    }
}
