//! Deploy-time configuration
//!
//! The backend base URL and the Google OAuth client identifier are
//! supplied by the deployment environment, not discovered at runtime.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::Result;

/// Environment variable holding the backend base URL
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Environment variable holding the Google OAuth client identifier
pub const GOOGLE_CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend API, without a trailing slash
    pub backend_url: String,

    /// OAuth client identifier registered for Google sign-in
    pub google_client_id: String,
}

impl Config {
    /// Create a configuration, validating the backend URL
    pub fn new(
        backend_url: impl Into<String>,
        google_client_id: impl Into<String>,
    ) -> Result<Self> {
        let backend_url = backend_url.into();
        Url::parse(&backend_url)
            .map_err(|e| Error::Config(format!("Invalid backend URL {backend_url:?}: {e}")))?;

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            google_client_id: google_client_id.into(),
        })
    }

    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        let backend_url = std::env::var(BACKEND_URL_VAR)
            .map_err(|_| Error::Config(format!("{BACKEND_URL_VAR} is not set")))?;
        let google_client_id = std::env::var(GOOGLE_CLIENT_ID_VAR)
            .map_err(|_| Error::Config(format!("{GOOGLE_CLIENT_ID_VAR} is not set")))?;

        Self::new(backend_url, google_client_id)
    }
}
