//! Mock management endpoint for command tests
//!
//! Commands issue several operations against the same URL, so mocks are told
//! apart by the operation document. Keep matchers disjoint: one request should
//! only ever match one mock.

use mgmt_client::{ConnectionConfig, ManagementClient};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

pub struct MockManagementServer {
    pub server: ServerGuard,
}

impl MockManagementServer {
    pub fn start() -> Self {
        Self {
            server: Server::new(),
        }
    }

    pub fn connection(&self) -> ConnectionConfig {
        let host_with_port = self.server.host_with_port();
        let (host, port) = host_with_port
            .rsplit_once(':')
            .expect("mock server address has a port");
        ConnectionConfig::new(host, port.parse().expect("numeric port"))
    }

    /// Unauthenticated client for this server
    pub fn client(&self) -> ManagementClient {
        ManagementClient::new(&self.connection()).expect("client for mock server")
    }

    /// Requests whose body contains `partial` answer `status` with `body`
    pub fn mock_operation(&mut self, partial: Value, status: usize, body: &Value) -> Mock {
        self.mock_matching(Matcher::PartialJson(partial), status, body)
    }

    pub fn mock_matching(&mut self, matcher: Matcher, status: usize, body: &Value) -> Mock {
        self.server
            .mock("POST", "/management")
            .match_header("content-type", "application/json")
            .match_body(matcher)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }

    /// Root `read-resource(attributes-only)` reporting the given management version
    pub fn mock_version(&mut self, major: u32, minor: u32) -> Mock {
        self.mock_operation(
            json!({"operation": "read-resource", "attributes-only": true}),
            200,
            &success(json!({
                "management-major-version": major,
                "management-minor-version": minor,
                "management-micro-version": 0,
                "product-name": "WildFly Full"
            })),
        )
    }

    /// `read-resource` of an XA datasource (never the root)
    pub fn mock_data_source_lookup(&mut self, exists: bool) -> Mock {
        let matcher = Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"operation": "read-resource"})),
            Matcher::Regex("xa-data-source".to_string()),
        ]);
        if exists {
            self.mock_matching(matcher, 200, &success(json!({"jndi-name": "java:jboss/datasources/Old"})))
        } else {
            self.mock_matching(matcher, 500, &failed("WFLYCTL0216: Management resource not found"))
        }
    }

    /// `server-state` read whose answer is computed per request; `None` answers a non-JSON body
    pub fn mock_server_state_with<F>(&mut self, state: F) -> Mock
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.server
            .mock("POST", "/management")
            .match_body(Matcher::PartialJson(
                json!({"operation": "read-attribute", "name": "server-state"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| match state() {
                Some(state) => success(json!(state)).to_string().into_bytes(),
                None => b"<html>Service Unavailable</html>".to_vec(),
            })
    }

    pub fn mock_server_state(&mut self, state: &str) -> Mock {
        self.mock_operation(
            json!({"operation": "read-attribute", "name": "server-state"}),
            200,
            &success(json!(state)),
        )
    }
}

pub fn success(result: Value) -> Value {
    json!({
        "outcome": "success",
        "result": result
    })
}

pub fn failed(description: &str) -> Value {
    json!({
        "outcome": "failed",
        "failure-description": description,
        "rolled-back": true
    })
}
