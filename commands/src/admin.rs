//! Administrative helpers shared by commands
//!
//! Version detection, existence checks and the reload-if-required dance that
//! follows configuration changes the server cannot apply at runtime.

use mgmt_client::{Address, ManagementClient, ModelResponse, Operation};
use serde_json::Value;
use std::fmt;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::errors::{CommandError, Result};

/// Interval between `server-state` polls while waiting for a reload
pub const RELOAD_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Longest wait for the server to come back after a reload
pub const RELOAD_TIMEOUT: Duration = Duration::from_secs(60);

const STATE_RUNNING: &str = "running";
const STATE_RELOAD_REQUIRED: &str = "reload-required";

/// Management model version of the server (not the product version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl ServerVersion {
    /// First management version of WildFly; everything below is AS7 / EAP 6
    pub const VERSION_2_0_0: ServerVersion = ServerVersion::new(2, 0, 0);

    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self { major, minor, micro }
    }

    pub fn less_than(&self, other: ServerVersion) -> bool {
        *self < other
    }

    /// Read `management-{major,minor,micro}-version` from the root resource
    pub fn read(client: &ManagementClient) -> Result<Self> {
        let operation = Operation::new("read-resource", &Address::root()).with_param("attributes-only", true);
        let response = execute_checked(client, &operation, "read-resource")?;

        let root = response.result.unwrap_or(Value::Null);
        let attribute = |name: &str| -> Result<u32> {
            root.get(name)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| CommandError::UnexpectedResponse {
                    reason: format!("root resource has no numeric '{}'", name),
                })
        };

        let version = Self::new(
            attribute("management-major-version")?,
            attribute("management-minor-version")?,
            // Some AS7 releases omit the micro version
            attribute("management-micro-version").unwrap_or(0),
        );
        debug!("Server management version is {}", version);
        Ok(version)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

/// Polling parameters for [`reload_if_required`]
#[derive(Debug, Clone, Copy)]
pub struct ReloadOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            poll_interval: RELOAD_POLL_INTERVAL,
            timeout: RELOAD_TIMEOUT,
        }
    }
}

/// Execute and insist on a `success` outcome
pub fn execute_checked(client: &ManagementClient, operation: &Operation, command: &str) -> Result<ModelResponse> {
    let response = ModelResponse::from_value(&client.execute_operation(operation)?).map_err(|e| {
        CommandError::UnexpectedResponse {
            reason: e.to_string(),
        }
    })?;

    if !response.is_success() {
        return Err(CommandError::Failed {
            command: command.to_string(),
            reason: response
                .failure_message()
                .unwrap_or_else(|| "no failure description".to_string()),
        });
    }

    Ok(response)
}

pub fn resource_exists(client: &ManagementClient, address: &Address) -> Result<bool> {
    let response = client.execute_operation(&Operation::new("read-resource", address))?;
    let envelope = ModelResponse::from_value(&response).map_err(|e| CommandError::UnexpectedResponse {
        reason: e.to_string(),
    })?;
    Ok(envelope.is_success())
}

/// Remove `address` if present; returns whether anything was removed
pub fn remove_if_exists(client: &ManagementClient, address: &Address) -> Result<bool> {
    if !resource_exists(client, address)? {
        debug!("{} does not exist, nothing to remove", address);
        return Ok(false);
    }

    execute_checked(client, &Operation::new("remove", address), &format!("remove {}", address))?;
    info!("Removed {}", address);
    Ok(true)
}

pub fn server_state(client: &ManagementClient) -> Result<String> {
    let operation = Operation::new("read-attribute", &Address::root()).with_param("name", "server-state");
    let response = execute_checked(client, &operation, "read-attribute server-state")?;

    response
        .result
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CommandError::UnexpectedResponse {
            reason: "server-state is not a string".to_string(),
        })
}

/// Reload the server if it reports `reload-required` and wait until it is running again.
/// Returns whether a reload happened.
pub fn reload_if_required(client: &ManagementClient, options: &ReloadOptions) -> Result<bool> {
    let state = server_state(client)?;
    if state != STATE_RELOAD_REQUIRED {
        debug!("Server state is '{}', no reload needed", state);
        return Ok(false);
    }

    info!("Server requires reload, reloading");
    execute_checked(client, &Operation::new("reload", &Address::root()), "reload")?;
    wait_until_running(client, options)?;
    info!("Server is running again after reload");
    Ok(true)
}

fn wait_until_running(client: &ManagementClient, options: &ReloadOptions) -> Result<()> {
    let started = Instant::now();

    loop {
        sleep(options.poll_interval);

        match server_state(client) {
            Ok(state) if state == STATE_RUNNING => return Ok(()),
            Ok(state) => debug!("Server state is '{}' while waiting for reload", state),
            // Expected while the management interface restarts
            Err(e) => debug!("Server not reachable yet: {}", e),
        }

        if started.elapsed() >= options.timeout {
            warn!("Gave up waiting for reload after {:?}", started.elapsed());
            return Err(CommandError::ReloadTimeout {
                waited: options.timeout,
            });
        }
    }
}
