//! Datasource subsystem commands
//!
//! Resource attributes are plain serde records: every optional attribute is an
//! `Option` and is only sent when set.

pub mod xa_data_source;

use serde::Serialize;

pub use xa_data_source::{add_xa_data_source, build_add_operation, validate_xa_data_source, XaDataSourceConfig};

/// Which connections to flush when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoolFlushStrategy {
    FailingConnectionOnly,
    InvalidIdleConnections,
    IdleConnections,
    Gracefully,
    EntirePool,
    AllInvalidIdleConnections,
    AllIdleConnections,
    AllGracefully,
    AllConnections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionIsolation {
    TransactionReadUncommitted,
    TransactionReadCommitted,
    TransactionRepeatableRead,
    TransactionSerializable,
    TransactionNone,
}

/// Whether unclosed statements and result sets are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatementType {
    False,
    True,
    /// Track, but do not warn about unclosed statements
    Nowarn,
}
