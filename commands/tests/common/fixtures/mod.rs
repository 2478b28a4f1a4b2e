//! Shared fixtures for command tests:
//! - Mock management endpoint keyed on operation content
//! - Canned response envelopes

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]

pub mod mock_server;

pub use mock_server::*;
