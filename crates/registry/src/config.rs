//! Registry client configuration.

use secrecy::SecretString;
use std::time::Duration;

/// Default Terraform Cloud address.
pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";

/// API prefix of the v2 API.
pub const DEFAULT_BASE_PATH: &str = "/api/v2/";

/// Connection settings for [`HttpRegistryClient`](crate::HttpRegistryClient).
#[derive(Debug)]
pub struct ClientConfig {
    /// Scheme and host of the registry, e.g. `https://app.terraform.io`
    pub address: String,
    /// API prefix appended to the address
    pub base_path: String,
    /// API token, sent as a bearer token on API calls only
    pub token: SecretString,
    /// User agent for every request
    pub user_agent: String,
    /// Timeout for a single API call (not applied to uploads)
    pub request_timeout: Duration,
    /// Timeout for establishing connections
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for Terraform Cloud with the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            token: SecretString::from(token.into()),
            user_agent: format!("tfpub/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the registry address (Terraform Enterprise hosts).
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the API prefix.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Sets the per-call API timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full API root with exactly one slash between the parts and a
    /// trailing slash.
    #[must_use]
    pub fn api_root(&self) -> String {
        let address = self.address.trim_end_matches('/');
        let base = self.base_path.trim_matches('/');
        if base.is_empty() {
            format!("{address}/")
        } else {
            format!("{address}/{base}/")
        }
    }
}
