//! User-facing auth flows
//!
//! Each flow has the same shape: call the gateway, persist on success,
//! navigate. A returned error means exactly "show this message to the
//! user"; classifications the gateway already resolved by redirecting
//! are swallowed here, so callers display `err.to_string()` and nothing
//! else.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::Error;
use crate::gateway::ApiGateway;
use crate::navigation::{NavMode, NavTarget, Navigator};
use crate::store::{CredentialKey, CredentialStore};
use crate::types::{SignUpRequest, User};
use crate::Result;

/// Orchestrates login, Google sign-in, sign-up, and logout
pub struct AuthFlowController {
    gateway: ApiGateway,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthFlowController {
    pub fn new(
        gateway: ApiGateway,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            store,
            navigator,
        }
    }

    /// Password login
    ///
    /// On success the token pair is persisted and the session moves to
    /// the dashboard, replacing history so back-navigation cannot return
    /// to the login form. The store write strictly follows call success.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let tokens = match self.gateway.login(username, password).await {
            Ok(tokens) => tokens,
            Err(err) => return self.suppress_redirected(err),
        };

        self.store.save_tokens(&tokens);
        self.navigator.navigate(NavTarget::Dashboard, NavMode::Replace);
        Ok(())
    }

    /// Google sign-in with a credential produced by the SDK bridge
    ///
    /// The ID token is retained before the exchange so a pending sign-up
    /// can complete even when the exchange finds no account. On
    /// `UnknownIdentity` the gateway has already redirected to sign-up
    /// and this flow takes no further action.
    pub async fn sign_in_with_google(&self, credential: &str) -> Result<()> {
        self.store.save_google_id_token(credential);

        let tokens = match self.gateway.sign_in_with_google(credential).await {
            Ok(tokens) => tokens,
            Err(err) => return self.suppress_redirected(err),
        };

        self.store.save_tokens(&tokens);
        self.navigator.navigate(NavTarget::Dashboard, NavMode::Replace);
        Ok(())
    }

    /// Account creation; the caller renders the resulting user record
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<User> {
        self.gateway.sign_up(request).await
    }

    /// End the session
    ///
    /// Local termination always happens: the stored credentials are
    /// cleared and navigation returns to the login entry point whether
    /// or not the network call succeeds.
    pub async fn logout(&self) {
        if let Some(token) = self.store.get(CredentialKey::AccessToken) {
            if let Err(err) = self.gateway.logout(&token).await {
                tracing::warn!("Logout request failed, clearing session anyway: {err}");
            }
        }

        self.store.clear();
        self.navigator.navigate(NavTarget::Login, NavMode::Replace);
    }

    /// Drain credentials produced by the SDK bridge, running the Google
    /// sign-in flow for each; returns when the bridge side is dropped
    pub async fn run_credential_worker(&self, mut credentials: UnboundedReceiver<String>) {
        while let Some(credential) = credentials.recv().await {
            if let Err(err) = self.sign_in_with_google(&credential).await {
                tracing::error!("Google sign-in failed: {err}");
            }
        }
    }

    /// The gateway already resolved these by navigating; nothing to show
    fn suppress_redirected(&self, err: Error) -> Result<()> {
        match err {
            Error::Unauthorized | Error::UnknownIdentity => {
                tracing::debug!("auth flow abandoned after redirect: {err}");
                Ok(())
            }
            other => Err(other),
        }
    }
}
