//! API gateway for the backend auth endpoints
//!
//! The sole component that issues the authentication network calls and
//! the sole component that interprets their failures. Classification
//! lives here exactly once so every call site gets identical
//! redirect-on-401 behavior: no authenticated request path proceeds past
//! a 401 without forcing re-authentication, and no validation failure
//! surfaces a generic transport message.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde_json::json;

use crate::error::{ApiProblem, Error};
use crate::navigation::{NavMode, NavTarget, Navigator};
use crate::types::{SignUpRequest, TokenSet, User};
use crate::Result;

/// Gateway over the four auth endpoints
pub struct ApiGateway {
    base_url: String,
    client: Client,
    navigator: Arc<dyn Navigator>,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            navigator,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /auth/login: exchange a username and password for tokens
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenSet> {
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        let response = self.check(response, false).await?;
        response.json::<TokenSet>().await.map_err(transport_error)
    }

    /// POST /auth/signin-with-google: exchange a Google ID token for
    /// tokens. 404 here means no account exists for the identity yet.
    pub async fn sign_in_with_google(&self, id_token: &str) -> Result<TokenSet> {
        let response = self
            .client
            .post(self.endpoint("/auth/signin-with-google"))
            .json(&json!({ "id_token": id_token }))
            .send()
            .await
            .map_err(transport_error)?;

        let response = self.check(response, true).await?;
        response.json::<TokenSet>().await.map_err(transport_error)
    }

    /// POST /auth/signup: create an account
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<User> {
        let response = self
            .client
            .post(self.endpoint("/auth/signup"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let response = self.check(response, false).await?;
        response.json::<User>().await.map_err(transport_error)
    }

    /// POST /auth/logout: invalidate the session server-side; the
    /// response body is ignored
    pub async fn logout(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/auth/logout"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        self.check(response, false).await?;
        Ok(())
    }

    /// Uniform failure classification, applied after every call
    ///
    /// Callers must not assume control returns normally on 401: the
    /// redirect to login is issued before the error is raised.
    async fn check(&self, response: Response, identity_exchange: bool) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("401 from {}, redirecting to login", response.url());
            self.navigator.navigate(NavTarget::Login, NavMode::Push);
            return Err(Error::Unauthorized);
        }

        if status == StatusCode::BAD_REQUEST {
            // field-level details are deliberately dropped at this tier
            return Err(Error::InvalidInput);
        }

        if identity_exchange && status == StatusCode::NOT_FOUND {
            tracing::debug!("no account for this identity, redirecting to sign-up");
            self.navigator.navigate(NavTarget::SignUp, NavMode::Push);
            return Err(Error::UnknownIdentity);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let problem = serde_json::from_str::<ApiProblem>(&body)
            .unwrap_or_else(|_| ApiProblem::from_status(code, &body));

        Err(Error::Api(problem))
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}
