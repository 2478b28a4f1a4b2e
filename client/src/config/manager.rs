// File: client/src/config/manager.rs
use super::{Config, ServerConfigFile, ServerPasswords};
use crate::constants::config::{MAIN_CONFIG_FILE, SECRETS_FILE};
use crate::errors::ConfigError;
use glob::glob;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_configuration(config_dir.as_ref())?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    fn load_configuration(config_dir: &Path) -> Result<Config, ConfigError> {
        let main_config_path = config_dir.join(MAIN_CONFIG_FILE);
        let main_config_content = fs::read_to_string(&main_config_path).map_err(|e| ConfigError::LoadFailed {
            path: main_config_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config: Config = toml::from_str(&main_config_content).map_err(|e| ConfigError::ParseError {
            reason: format!("{}: {}", main_config_path.display(), e),
        })?;

        let passwords = ServerPasswords::load(&config_dir.join(SECRETS_FILE))?;

        // Load server-specific profiles
        let pattern = format!("{}/*.toml", config_dir.display());
        let mut server_configs = HashMap::new();

        let entries = glob(&pattern).map_err(|e| ConfigError::ParseError {
            reason: format!("Glob pattern error: {}", e),
        })?;

        for entry in entries {
            let path = entry.map_err(|e| ConfigError::LoadFailed {
                path: e.path().display().to_string(),
                reason: e.to_string(),
            })?;

            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "filename".to_string(),
                    reason: format!("{} is not valid UTF-8", path.display()),
                })?;

            if filename == MAIN_CONFIG_FILE || filename == SECRETS_FILE {
                continue;
            }

            let Some(server_name) = filename.strip_suffix(".toml") else {
                continue;
            };

            debug!("Loading server profile: {}", path.display());

            let content = fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

            let server_config_file: ServerConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                reason: format!("{}: {}", path.display(), e),
            })?;

            let mut server = server_config_file.server;

            if server.timeout_ms.is_none() {
                server.timeout_ms = config.timeout_ms;
            }

            passwords.complete(server_name, &mut server);

            server.validate()?;
            server_configs.insert(server_name.to_string(), server);
        }

        config.servers = server_configs;

        if let Some(name) = &config.default_server {
            if !config.servers.contains_key(name) {
                return Err(ConfigError::UnknownServer { name: name.clone() });
            }
        }

        info!("Loaded {} server profiles from {}", config.servers.len(), config_dir.display());

        Ok(config)
    }
}
