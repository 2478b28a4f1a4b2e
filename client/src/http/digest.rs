use digest_auth::AuthContext;
use std::fmt;

use crate::config::ConnectionConfig;
use crate::errors::HttpError;

/// Credentials bound to one `(host, port, realm)` for the Digest scheme.
/// Challenges for any other realm are left unanswered.
#[derive(Clone)]
pub struct DigestScope {
    host: String,
    port: u16,
    realm: String,
    username: String,
    password: String,
}

impl DigestScope {
    /// `None` when the descriptor has no complete username/password pair
    pub fn new(config: &ConnectionConfig, realm: String) -> Option<Self> {
        let (username, password) = config.credential_pair()?;
        Some(Self {
            host: config.host.clone(),
            port: config.port,
            realm,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// `Authorization` value answering `challenge`, or `None` if the challenge is
    /// not a Digest challenge for this scope's realm.
    pub fn authorize(&self, challenge: &str, uri: &str, body: &[u8]) -> Result<Option<String>, HttpError> {
        if !is_digest_challenge(challenge) {
            return Ok(None);
        }

        let mut prompt = digest_auth::parse(challenge).map_err(|e| HttpError::Authentication {
            reason: format!("malformed digest challenge from {}:{}: {}", self.host, self.port, e),
        })?;

        if prompt.realm != self.realm {
            return Ok(None);
        }

        let context = AuthContext::new_post(self.username.as_str(), self.password.as_str(), uri, Some(body));
        let answer = prompt.respond(&context).map_err(|e| HttpError::Authentication {
            reason: format!("cannot answer digest challenge: {}", e),
        })?;

        Ok(Some(answer.to_header_string()))
    }
}

impl fmt::Debug for DigestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestScope")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("realm", &self.realm)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

pub fn is_digest_challenge(header: &str) -> bool {
    let header = header.trim_start();
    let scheme = header.split(char::is_whitespace).next().unwrap_or_default();
    scheme.eq_ignore_ascii_case("digest")
}
