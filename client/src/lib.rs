pub mod config;
pub mod constants;
pub mod errors;
pub mod http;
pub mod operation;

// Re-export commonly used types
pub use config::{Config, ConfigManager, ConnectionConfig, Credentials, TlsConfig};
pub use errors::{ClientError, Result};
pub use http::ManagementClient;
pub use operation::{Address, Attachment, Batch, ModelResponse, Operation, Outcome};
