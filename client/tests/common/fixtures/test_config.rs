//! Test configuration builder for creating config directories programmatically

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for a config directory with main.toml, server profiles and secrets
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    servers: Vec<(String, String)>,
    secrets_toml: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            main_toml: String::new(),
            servers: Vec::new(),
            secrets_toml: None,
        }
    }

    pub fn main(mut self, toml: &str) -> Self {
        self.main_toml = toml.to_string();
        self
    }

    /// Add `<name>.toml` with the given contents
    pub fn server(mut self, name: &str, toml: &str) -> Self {
        self.servers.push((name.to_string(), toml.to_string()));
        self
    }

    pub fn secrets(mut self, toml: &str) -> Self {
        self.secrets_toml = Some(toml.to_string());
        self
    }

    /// Write the files and return the directory handle
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), &self.main_toml).expect("Failed to write main.toml");

        for (name, toml) in &self.servers {
            fs::write(config_dir.join(format!("{}.toml", name)), toml).expect("Failed to write server profile");
        }

        if let Some(secrets) = &self.secrets_toml {
            fs::write(config_dir.join("secrets.toml"), secrets).expect("Failed to write secrets.toml");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Written config directory; removed when dropped
pub struct TestConfig {
    _temp_dir: TempDir,
    config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
