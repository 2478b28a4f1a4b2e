pub mod admin;
pub mod datasources;
pub mod errors;

// Re-export commonly used types
pub use admin::{ReloadOptions, ServerVersion};
pub use datasources::{add_xa_data_source, validate_xa_data_source, XaDataSourceConfig};
pub use errors::{CommandError, Result};
