//! Add an XA datasource
//!
//! Works for any database; the caller supplies the driver, XA datasource class
//! and properties. The datasource is created disabled unless
//! `enable_after_create` is set.
//!
//! Attribute reference: the `xa-data-source` resource of the `datasources`
//! subsystem.

use mgmt_client::{Address, Batch, ManagementClient, Operation};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

use super::{PoolFlushStrategy, TrackStatementType, TransactionIsolation};
use crate::admin::{execute_checked, reload_if_required, remove_if_exists, ReloadOptions, ServerVersion};
use crate::errors::{CommandError, Result};

/// Attributes of an XA datasource. Unset optional attributes keep the server's defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct XaDataSourceConfig {
    /// Pool name; becomes the last segment of the resource address
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub enable_after_create: bool,
    /// Remove an existing datasource of the same name first (reloading if the server asks for it)
    #[serde(skip)]
    pub replace_existing: bool,
    /// Sent as `xa-datasource-properties` child resources, not as an attribute
    #[serde(skip)]
    pub xa_datasource_properties: BTreeMap<String, String>,

    pub jndi_name: String,
    pub driver_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xa_datasource_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "user-name")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_domain: Option<String>,

    // Pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "pool-prefill")]
    pub prefill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "pool-use-strict-min")]
    pub use_strict_min_pool_size: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_strategy: Option<PoolFlushStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout_minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_timeout_wait_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_retry: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_retry_wait_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_tx_separate_pool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "use-fast-fail")]
    pub use_fast_fail_allocation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_try_lock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp: Option<String>,

    // Validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_validation_millis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_on_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_valid_connection_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "valid-connection-checker-class-name")]
    pub valid_connection_checker_class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub valid_connection_checker_properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "stale-connection-checker-class-name")]
    pub stale_connection_checker_class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub stale_connection_checker_properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "exception-sorter-class-name")]
    pub exception_sorter_class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub exception_sorter_properties: BTreeMap<String, String>,

    // Recovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_recovery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_security_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "recovery-plugin-class-name")]
    pub recovery_plugin_class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub recovery_plugin_properties: BTreeMap<String, String>,

    // Reauthentication
    #[serde(skip_serializing_if = "Option::is_none", rename = "reauth-plugin-class-name")]
    pub reauth_plugin_class: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub reauth_plugin_properties: BTreeMap<String, String>,

    // Statements and transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_connection_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_statements_cache_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_prepared_statements: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "track-statements")]
    pub track_prepared_statements: Option<TrackStatementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_tx_query_timeout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_isolation: Option<TransactionIsolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xa_resource_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interleaving: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_xid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_rm_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_xa_resource: Option<bool>,

    // Misc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "url-selector-strategy-class-name")]
    pub url_selector_strategy_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ccm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_java_context: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics_enabled: Option<bool>,
}

impl XaDataSourceConfig {
    pub fn new(name: impl Into<String>, jndi_name: impl Into<String>, driver_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jndi_name: jndi_name.into(),
            driver_name: driver_name.into(),
            ..Self::default()
        }
    }

    pub fn address(&self) -> Address {
        Address::subsystem("datasources").and("xa-data-source", self.name.as_str())
    }
}

pub fn validate_xa_data_source(config: &XaDataSourceConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(CommandError::invalid("name", "name of the xa-data-source must be specified"));
    }
    if config.jndi_name.trim().is_empty() {
        return Err(CommandError::invalid("jndi_name", "jndi_name must be specified"));
    }
    if config.driver_name.trim().is_empty() {
        return Err(CommandError::invalid("driver_name", "driver_name must be specified"));
    }

    if let (Some(min), Some(max)) = (config.min_pool_size, config.max_pool_size) {
        if min > max {
            return Err(CommandError::invalid(
                "max_pool_size",
                format!(
                    "max_pool_size has to be at least min_pool_size but they are set to {} and {}",
                    min, max
                ),
            ));
        }
    }

    if config.security_domain.is_some() && config.username.is_some() {
        return Err(CommandError::invalid(
            "username",
            "setting username is invalid in combination with security_domain",
        ));
    }

    if config.recovery_security_domain.is_some() && config.recovery_username.is_some() {
        return Err(CommandError::invalid(
            "recovery_username",
            "setting recovery_username is invalid in combination with recovery_security_domain",
        ));
    }

    Ok(())
}

/// Composite operation creating the datasource and its XA properties.
///
/// Servers older than 2.0.0 ignore the `enabled` attribute, so an explicit
/// `enable` step is appended for them. Newer servers reject a second enable.
pub fn build_add_operation(config: &XaDataSourceConfig, version: ServerVersion) -> Result<Operation> {
    let address = config.address();

    let attributes = match serde_json::to_value(config) {
        Ok(Value::Object(attributes)) => attributes,
        Ok(other) => {
            return Err(CommandError::invalid(
                "attributes",
                format!("expected an object, serialized to {}", other),
            ))
        }
        Err(e) => return Err(CommandError::invalid("attributes", e.to_string())),
    };

    let mut batch = Batch::new();
    batch.add(
        Operation::new("add", &address)
            .with_params(attributes)
            .with_param("enabled", config.enable_after_create),
    );

    for (key, value) in &config.xa_datasource_properties {
        batch.add(
            Operation::new("add", &address.clone().and("xa-datasource-properties", key.as_str()))
                .with_param("value", value.as_str()),
        );
    }

    if config.enable_after_create && version.less_than(ServerVersion::VERSION_2_0_0) {
        batch.invoke("enable", &address);
    }

    Ok(batch.into_operation())
}

/// Validate, optionally replace an existing datasource, and create it in one composite operation
pub fn add_xa_data_source(client: &ManagementClient, config: &XaDataSourceConfig) -> Result<()> {
    validate_xa_data_source(config)?;

    let command = format!("AddXaDataSource {}", config.name);
    let version = ServerVersion::read(client)?;

    if config.replace_existing {
        let address = config.address();
        remove_if_exists(client, &address)
            .and_then(|_| reload_if_required(client, &ReloadOptions::default()))
            .map_err(|e| CommandError::Failed {
                command: command.clone(),
                reason: format!("failed to remove existing XA datasource {}: {}", config.name, e),
            })?;
    }

    let operation = build_add_operation(config, version)?;
    execute_checked(client, &operation, &command)?;

    info!(
        "Added XA datasource {} ({}), enabled: {}",
        config.name, config.jndi_name, config.enable_after_create
    );
    Ok(())
}
