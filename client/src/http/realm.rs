//! Management realm discovery
//!
//! Digest credentials are only valid for the realm the server picks, so a
//! client built with credentials first provokes an unauthenticated 401 and
//! reads the realm from its challenge.

use reqwest::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::StatusCode;
use tracing::debug;

use super::management_client::build_http_client;
use crate::config::ConnectionConfig;
use crate::constants::http::{CONTENT_TYPE_JSON, DIGEST_REALM_ELEMENT, REALM_PROBE_BODY};
use crate::errors::{HttpError, Result, SetupError};

/// Ask the server which realm its management interface authenticates against
pub fn discover_realm(config: &ConnectionConfig) -> Result<String> {
    let url = config.management_url();

    // Probe client carries no credentials and is dropped before returning
    let probe = build_http_client(config)?;

    debug!("Probing {} for the management realm", url);

    let response = probe
        .post(&url)
        .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(REALM_PROBE_BODY)
        .send()
        .map_err(|e| HttpError::from_send(&url, e))?;

    let status = response.status();
    let challenge = response
        .headers()
        .get(WWW_AUTHENTICATE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let body = response.text().map_err(|e| HttpError::InvalidResponse {
        reason: format!("failed to read realm probe response: {}", e),
    })?;

    drop(probe);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        return Err(SetupError::AuthenticationDisabled { body }.into());
    }

    if status != StatusCode::UNAUTHORIZED {
        return Err(SetupError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let challenge = challenge.ok_or(SetupError::MissingChallengeHeader)?;
    let realm = realm_from_challenge(&challenge).ok_or(SetupError::RealmNotFound)?;

    debug!("Management realm of {}:{} is '{}'", config.host, config.port, realm);

    Ok(realm)
}

/// Value of the `Digest realm` element of a `WWW-Authenticate` header
pub fn realm_from_challenge(header: &str) -> Option<String> {
    challenge_elements(header)
        .into_iter()
        .find(|(name, _)| name == DIGEST_REALM_ELEMENT)
        .and_then(|(_, value)| value)
}

/// Split a challenge into `name=value` elements on commas outside quoted strings.
/// The scheme stays glued to the first parameter name (`Digest realm`).
fn challenge_elements(header: &str) -> Vec<(String, Option<String>)> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in header.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => {
                current.push(ch);
                escaped = true;
            }
            '"' => {
                current.push(ch);
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                elements.extend(parse_element(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    elements.extend(parse_element(&current));

    elements
}

fn parse_element(raw: &str) -> Option<(String, Option<String>)> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.split_once('=') {
        Some((name, value)) => Some((name.trim().to_string(), Some(unquote(value.trim())))),
        None => Some((raw.to_string(), None)),
    }
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}
