use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Certificate, StatusCode};
use serde_json::Value;
use std::fs;
use tracing::debug;

use super::digest::{is_digest_challenge, DigestScope};
use super::realm::discover_realm;
use crate::config::ConnectionConfig;
use crate::constants::http::{CONTENT_TYPE_JSON, MANAGEMENT_PATH};
use crate::errors::{ConfigError, HttpError, Result, UsageError};
use crate::operation::Operation;

/// Blocking client for one server's HTTP management endpoint.
///
/// Owns a connection pool for its whole lifetime. Release it with
/// [`ManagementClient::close`] (or by dropping it).
#[derive(Debug)]
pub struct ManagementClient {
    url: String,
    client: Client,
    auth: Option<DigestScope>,
}

impl ManagementClient {
    /// Build the pooled client. With credentials configured this also runs the
    /// realm discovery handshake and fails if it does.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let url = config.management_url();
        let client = build_http_client(config)?;

        let auth = match config.credential_pair() {
            Some(_) => {
                let realm = discover_realm(config)?;
                DigestScope::new(config, realm)
            }
            None => None,
        };

        debug!(
            "Management client ready for {} (digest realm: {:?})",
            url,
            auth.as_ref().map(DigestScope::realm)
        );

        Ok(Self { url, client, auth })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Realm discovered at construction, `None` for unauthenticated clients
    pub fn realm(&self) -> Option<&str> {
        self.auth.as_ref().map(DigestScope::realm)
    }

    /// Send one operation document and return the server's JSON envelope.
    ///
    /// Both HTTP 200 and HTTP 500 responses are returned as parsed; inspect the
    /// envelope's `outcome` to tell success from failure.
    pub fn execute(&self, operation: &Value) -> Result<Value> {
        let body = serde_json::to_string_pretty(operation).map_err(|e| HttpError::InvalidRequest {
            reason: e.to_string(),
        })?;

        let response = self.send(&body, None)?;

        let response = match (&self.auth, response.status()) {
            (Some(scope), StatusCode::UNAUTHORIZED) => match digest_challenge(&response) {
                Some(challenge) => match scope.authorize(&challenge, MANAGEMENT_PATH, body.as_bytes())? {
                    Some(authorization) => self.send(&body, Some(&authorization))?,
                    None => response,
                },
                None => response,
            },
            _ => response,
        };

        parse_response(response)
    }

    /// Like [`execute`](Self::execute), for operations built with [`Operation`].
    /// Attachments are refused before anything is sent.
    pub fn execute_operation(&self, operation: &Operation) -> Result<Value> {
        if !operation.attachments().is_empty() {
            return Err(UsageError::AttachmentsNotAllowed {
                count: operation.attachments().len(),
            }
            .into());
        }
        self.execute(operation.document())
    }

    /// Release the pooled connections
    pub fn close(self) {
        debug!("Closing management client for {}", self.url);
        drop(self.client);
    }

    fn send(&self, body: &str, authorization: Option<&str>) -> Result<Response> {
        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body.to_string());

        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().map_err(|e| HttpError::from_send(&self.url, e))?;
        debug!("{} answered {}", self.url, response.status());
        Ok(response)
    }
}

/// Pooled HTTP client honoring the descriptor's timeout and TLS switches.
/// Carries no credentials; authentication is added per request.
pub(crate) fn build_http_client(config: &ConnectionConfig) -> Result<Client> {
    let mut builder = Client::builder().timeout(config.timeout());

    if let Some(timeout) = config.timeout() {
        builder = builder.connect_timeout(timeout);
    }

    if let Some(tls) = &config.tls {
        builder = builder
            .danger_accept_invalid_certs(!tls.certificate_verification)
            .danger_accept_invalid_hostnames(!tls.hostname_verification);

        if let Some(path) = &tls.ca_certificate {
            let pem = fs::read(path).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| ConfigError::InvalidValue {
                field: "tls.ca_certificate".to_string(),
                reason: e.to_string(),
            })?;
            builder = builder.add_root_certificate(certificate);
        }
    }

    let client = builder.build().map_err(|e| HttpError::ClientBuild {
        reason: e.to_string(),
    })?;

    Ok(client)
}

/// First Digest challenge among the response's `WWW-Authenticate` headers
fn digest_challenge(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .find(|value| is_digest_challenge(value))
}

fn parse_response(response: Response) -> Result<Value> {
    let status = response.status();
    let content = response.text().map_err(|e| HttpError::InvalidResponse {
        reason: format!("failed to read response body: {}", e),
    })?;

    if status == StatusCode::OK || status == StatusCode::INTERNAL_SERVER_ERROR {
        let result = serde_json::from_str(&content).map_err(|e| HttpError::InvalidResponse {
            reason: format!("response with status {} is not JSON: {}", status.as_u16(), e),
        })?;
        Ok(result)
    } else {
        Err(HttpError::UnexpectedStatus {
            status: status.as_u16(),
            body: content,
        }
        .into())
    }
}
