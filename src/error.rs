//! Error types for the authentication session client
//!
//! Every failed network call leaves the API gateway as one of the
//! variants below; raw transport errors never cross that boundary.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for auth client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fixed user-facing message for input validation failures
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// A single field-level validation failure from the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Human-readable explanation of what is wrong with the field
    pub detail: String,

    /// JSON pointer to the offending request field
    pub pointer: String,
}

/// Problem-details payload as the backend emits it (RFC 9457)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProblem {
    /// URI reference identifying the problem type
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Short summary of the problem type
    #[serde(default)]
    pub title: String,

    /// HTTP status code the server generated for this occurrence
    #[serde(default)]
    pub status: Option<u16>,

    /// Explanation specific to this occurrence
    #[serde(default)]
    pub detail: String,

    /// URI reference identifying this specific occurrence
    #[serde(default)]
    pub instance: String,

    /// Field-level errors, present on validation failures only
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ApiProblem {
    /// Synthesize a problem from an error body that was not problem JSON
    pub fn from_status(status: u16, body: &str) -> Self {
        Self {
            title: format!("HTTP {status}"),
            status: Some(status),
            detail: body.trim().to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Display for ApiProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.detail.is_empty() {
            write!(f, "{}", self.detail)
        } else if !self.title.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "An error occurred")
        }
    }
}

/// Errors raised by the auth client
///
/// The first five variants are the normalized API error taxonomy; the
/// Display text of each is the message a user may be shown.
#[derive(Error, Debug)]
pub enum Error {
    /// The server returned 401; a redirect to login was already issued
    #[error("unauthorized")]
    Unauthorized,

    /// The server rejected the request body (400)
    #[error("Invalid input")]
    InvalidInput,

    /// No account exists for the presented identity token; a redirect
    /// to sign-up was already issued
    #[error("no account found for this identity")]
    UnknownIdentity,

    /// Any other non-2xx response, with the structured payload preserved
    #[error("{0}")]
    Api(ApiProblem),

    /// The request produced no response at all
    #[error("network error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
