//! Mock management endpoint for testing
//!
//! A synchronous mockito server standing in for the application server's
//! `/management` interface, so the blocking client can talk to it directly.
//!
//! Helpers return the mock unregistered; finish it with `.create()` (optionally
//! after `.expect(n)`).

use mgmt_client::ConnectionConfig;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::Value;

use super::test_data::digest_challenge;

/// Mock server that simulates management endpoint responses
pub struct MockManagementServer {
    pub server: ServerGuard,
}

impl MockManagementServer {
    /// Start a new mock server
    pub fn start() -> Self {
        Self {
            server: Server::new(),
        }
    }

    /// Unauthenticated descriptor pointing at this server
    pub fn connection(&self) -> ConnectionConfig {
        let host_with_port = self.server.host_with_port();
        let (host, port) = host_with_port
            .rsplit_once(':')
            .expect("mock server address has a port");
        ConnectionConfig::new(host, port.parse().expect("numeric port"))
    }

    /// Any JSON POST to /management answers `status` with `body`
    pub fn mock_response(&mut self, status: usize, body: &Value) -> Mock {
        self.server
            .mock("POST", "/management")
            .match_header("content-type", "application/json")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }

    /// Requests without an Authorization header get a Digest challenge for `realm`
    pub fn mock_digest_challenge(&mut self, realm: &str) -> Mock {
        self.server
            .mock("POST", "/management")
            .match_header("authorization", Matcher::Missing)
            .with_status(401)
            .with_header("www-authenticate", &digest_challenge(realm))
            .with_body("")
    }

    /// Only the realm probe (`[]` body) gets a Digest challenge for `realm`
    pub fn mock_probe_challenge(&mut self, realm: &str) -> Mock {
        self.server
            .mock("POST", "/management")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Exact("[]".to_string()))
            .with_status(401)
            .with_header("www-authenticate", &digest_challenge(realm))
    }

    /// Unauthenticated operations (not the probe) get a Digest challenge for `realm`
    pub fn mock_operation_challenge(&mut self, realm: &str) -> Mock {
        self.server
            .mock("POST", "/management")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Regex(r#""operation""#.to_string()))
            .with_status(401)
            .with_header("www-authenticate", &digest_challenge(realm))
    }

    /// The realm probe answers `status` with the given headers and body
    pub fn mock_probe(&mut self, status: usize, headers: &[(&str, &str)], body: &str) -> Mock {
        let mut mock = self
            .server
            .mock("POST", "/management")
            .match_body(Matcher::Exact("[]".to_string()))
            .with_status(status)
            .with_body(body);
        for (name, value) in headers {
            mock = mock.with_header(*name, *value);
        }
        mock
    }

    /// Requests carrying a Digest Authorization for `username` in `realm` get `body`
    pub fn mock_authenticated(&mut self, username: &str, realm: &str, status: usize, body: &Value) -> Mock {
        let authorization = format!(
            r#"^Digest .*username="{}".*realm="{}"|^Digest .*realm="{}".*username="{}""#,
            username, realm, realm, username
        );
        self.server
            .mock("POST", "/management")
            .match_header("authorization", Matcher::Regex(authorization))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }
}
