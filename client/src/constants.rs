//! Protocol constants and configuration defaults
//!
//! Grouped by concern so the wire-level values used by the transport and the
//! defaults applied by the config loader live in one place.

/// Management HTTP endpoint constants
pub mod http {
    /// Path of the HTTP management endpoint
    pub const MANAGEMENT_PATH: &str = "/management";

    /// Content type of every management request
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Body of the unauthenticated realm probe. Not a valid operation; an empty
    /// array keeps a server with authentication disabled from reporting a parse error.
    pub const REALM_PROBE_BODY: &str = "[]";

    /// Challenge element carrying the realm name
    pub const DIGEST_REALM_ELEMENT: &str = "Digest realm";

    /// A configured timeout of zero means "wait forever"
    pub const NO_TIMEOUT: u64 = 0;
}

/// Configuration defaults
pub mod config {
    /// Default port of the HTTP management interface
    pub const DEFAULT_MANAGEMENT_PORT: u16 = 9990;

    /// Main configuration file inside the config directory
    pub const MAIN_CONFIG_FILE: &str = "main.toml";

    /// Optional secrets file inside the config directory
    pub const SECRETS_FILE: &str = "secrets.toml";

    /// Environment variable overriding the config directory of the `mgmt` binary
    pub const CONFIG_DIR_ENV: &str = "MGMT_CONFIG_DIR";

    /// Environment variable selecting the server profile of the `mgmt` binary
    pub const SERVER_ENV: &str = "MGMT_SERVER";

    /// Config directory used when `MGMT_CONFIG_DIR` is unset
    pub const DEFAULT_CONFIG_DIR: &str = "config";
}
