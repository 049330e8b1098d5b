//! OAuth client settings, read from the environment.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::oauth::AuthError;
use super::session::Provider;

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

fn env(name: &'static str) -> Result<String, AuthError> {
    std::env::var(name).map_err(|_| AuthError::MissingEnv(name))
}

impl OAuthConfig {
    /// `<PROVIDER>_CLIENT_ID`, `<PROVIDER>_CLIENT_SECRET` and an optional
    /// `AUTH_REDIRECT_URI` whose `/callback` suffix is made provider specific.
    pub fn for_provider(provider: Provider) -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let (id_var, secret_var, auth_url, token_url) = match provider {
            Provider::GitHub => (
                "GITHUB_CLIENT_ID",
                "GITHUB_CLIENT_SECRET",
                "https://github.com/login/oauth/authorize",
                "https://github.com/login/oauth/access_token",
            ),
            Provider::Google => (
                "GOOGLE_CLIENT_ID",
                "GOOGLE_CLIENT_SECRET",
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
            ),
        };
        let callback = format!("/{}/callback", provider.as_str());
        let redirect_uri = std::env::var("AUTH_REDIRECT_URI")
            .map(|uri| uri.replace("/callback", &callback))
            .unwrap_or_else(|_| format!("http://localhost:8080/auth{callback}"));

        Ok(Self {
            client_id: ClientId::new(env(id_var)?),
            client_secret: ClientSecret::new(env(secret_var)?),
            auth_url: AuthUrl::new(auth_url.to_string())?,
            token_url: TokenUrl::new(token_url.to_string())?,
            redirect_url: RedirectUrl::new(redirect_uri)?,
        })
    }
}
