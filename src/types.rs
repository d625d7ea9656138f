//! Wire types shared with the backend auth API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by the backend
///
/// The tokens are opaque strings; this client never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
}

/// Payload for POST /auth/signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub agreement: bool,
}

/// User record returned by a successful sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub picture: String,

    pub active: bool,

    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}
