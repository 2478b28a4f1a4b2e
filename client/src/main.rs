// File: client/src/main.rs
use anyhow::{bail, Context, Result};
use std::env;
use std::io::{self, Read};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use mgmt_client::constants::config::{CONFIG_DIR_ENV, DEFAULT_CONFIG_DIR, SERVER_ENV};
use mgmt_client::{ConfigManager, ManagementClient, ModelResponse};

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for the response document
    let env_filter = EnvFilter::from_default_env()
        .add_directive("mgmt_client=info".parse()?)
        .add_directive("mgmt=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).with_writer(io::stderr).init();

    let config_dir = env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(&config_dir)?;
    let config = config_manager.get_current_config();

    let connection = match env::var(SERVER_ENV) {
        Ok(name) => config.server(&name)?,
        Err(_) => config.default_connection()?,
    };

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read operation from stdin")?;
    let operation: serde_json::Value =
        serde_json::from_str(&input).context("Operation on stdin is not a JSON document")?;

    let client = ManagementClient::new(connection)?;
    info!("Connected to {}", client.url());

    let result = client.execute(&operation);
    client.close();
    let response = result?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    match ModelResponse::from_value(&response) {
        Ok(envelope) if envelope.is_success() => Ok(()),
        Ok(envelope) => bail!(
            "Operation failed: {}",
            envelope.failure_message().unwrap_or_else(|| "no failure description".to_string())
        ),
        Err(e) => {
            warn!("Response is not a management envelope: {}", e);
            Ok(())
        }
    }
}
