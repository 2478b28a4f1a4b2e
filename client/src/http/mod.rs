// File: client/src/http/mod.rs
//! HTTP transport for management operations
//!
//! Every operation travels as one JSON document POSTed to the server's
//! `/management` endpoint. The response body is the server's JSON envelope.
//!
//! # Architecture
//!
//! ```text
//! ManagementClient::new ──(credentials?)──► realm probe: POST "[]" ──► 401 + WWW-Authenticate
//!        │                                                                │
//!        │◄──────────────────── realm = "Digest realm" element ───────────┘
//!        ▼
//! execute(op) ──► POST op ──► 200 / 500 ──► parsed JSON envelope
//!                   │
//!                   └─► 401 Digest challenge (same realm) ──► POST op + Authorization
//! ```
//!
//! # Status handling
//!
//! - 200 and 500 both carry a JSON envelope; 500 is how the server reports a
//!   failed operation, so it is returned, not raised
//! - any other status is a transport error with the raw body attached
//!
//! The client is blocking and keeps no per-operation state. Callers that need
//! parallelism share one client across threads or build several.

pub mod digest;
pub mod management_client;
pub mod realm;

pub use management_client::ManagementClient;
pub use realm::realm_from_challenge;
