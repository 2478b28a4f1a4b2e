//! This module provides reusable test utilities:
//! - Mock management endpoint (plain responses and Digest challenges)
//! - Config directory builder
//! - Common test documents

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_server;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use mock_server::MockManagementServer;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
