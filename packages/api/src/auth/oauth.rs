//! # Authorization Code flow with PKCE
//!
//! [`OAuthLogin`] drives one provider's login in two steps:
//!
//! 1. **[`authorize`](OAuthLogin::authorize)** builds the provider URL with
//!    the provider's scopes and a random PKCE challenge, and stores the CSRF
//!    state and verifier in the caller's session as a [`PendingLogin`].
//! 2. **[`complete`](OAuthLogin::complete)** runs from the provider's
//!    callback route. It takes the pending login out of the session (so a
//!    state can be used only once), checks provider and state, exchanges the
//!    code for an access token and asks the provider who the user is.
//!
//! The result is a [`store::Identity`] whose principal is
//! `"<provider>:<account id>"`.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use store::Identity;
use thiserror::Error;
use tower_sessions::Session;

use super::config::OAuthConfig;
use super::session::{PendingLogin, Provider, SESSION_PENDING_LOGIN_KEY};
use super::{github, google};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} not set")]
    MissingEnv(&'static str),
    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(#[from] oauth2::url::ParseError),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("Invalid or expired OAuth state")]
    InvalidState,
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
    #[error("profile request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Profile(&'static str),
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

pub struct OAuthLogin {
    provider: Provider,
    config: OAuthConfig,
}

impl OAuthLogin {
    pub fn new(provider: Provider) -> Result<Self, AuthError> {
        Ok(Self {
            provider,
            config: OAuthConfig::for_provider(provider)?,
        })
    }

    fn client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    fn scopes(&self) -> &'static [&'static str] {
        match self.provider {
            Provider::GitHub => &["read:user", "user:email"],
            Provider::Google => &["openid", "email", "profile"],
        }
    }

    /// Provider URL to send the browser to.
    pub async fn authorize(&self, session: &Session) -> Result<String, AuthError> {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
        let mut request = self.client().authorize_url(CsrfToken::new_random);
        for scope in self.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (auth_url, csrf_state) = request.set_pkce_challenge(pkce_challenge).url();

        let pending = PendingLogin {
            provider: self.provider,
            state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };
        session.insert(SESSION_PENDING_LOGIN_KEY, pending).await?;
        Ok(auth_url.to_string())
    }

    /// Finish the login started by [`authorize`](Self::authorize).
    pub async fn complete(
        &self,
        session: &Session,
        code: &str,
        state: &str,
    ) -> Result<Identity, AuthError> {
        let pending: PendingLogin = session
            .remove(SESSION_PENDING_LOGIN_KEY)
            .await?
            .ok_or(AuthError::InvalidState)?;
        if pending.provider != self.provider || pending.state != state {
            return Err(AuthError::InvalidState);
        }

        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let token = self
            .client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        let access_token = token.access_token().secret();

        let (account_id, display_name) = match self.provider {
            Provider::GitHub => github::fetch_account(access_token).await?,
            Provider::Google => google::fetch_account(access_token).await?,
        };
        Ok(Identity {
            principal: self.provider.principal(&account_id),
            display_name,
        })
    }
}
