//! Meraki Dashboard API constants

/// Default Dashboard API base URL (v1)
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1/";

/// Header carrying the static Dashboard API key
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

pub const USER_AGENT: &str = concat!("meraki-cli/", env!("CARGO_PKG_VERSION"));

/// Status codes treated as success per request kind
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
}
