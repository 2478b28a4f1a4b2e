//! Common test documents and constants

use serde_json::{json, Value};

pub const REALM: &str = "ManagementRealm";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "Admin#70365";

/// Operation reading the root `server-state` attribute
pub fn read_server_state() -> Value {
    json!({
        "operation": "read-attribute",
        "address": [],
        "name": "server-state"
    })
}

pub fn success_envelope() -> Value {
    json!({
        "outcome": "success",
        "result": "running"
    })
}

pub fn failed_envelope() -> Value {
    json!({
        "outcome": "failed",
        "failure-description": "WFLYCTL0216: Management resource '[(\"subsystem\" => \"nope\")]' not found",
        "rolled-back": true
    })
}

/// WildFly-style Digest challenge for `realm`
pub fn digest_challenge(realm: &str) -> String {
    format!(
        r#"Digest realm="{}", domain="/management", nonce="AAAABQAAmQIMaDPfuY2yBNrkGyA=", opaque="00000000000000000000000000000000", algorithm=MD5, qop="auth""#,
        realm
    )
}
