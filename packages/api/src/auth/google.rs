//! Google account lookup for a freshly issued access token.

use reqwest::Client;
use serde::Deserialize;

use super::oauth::AuthError;

#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
}

pub(super) async fn fetch_account(access_token: &str) -> Result<(String, Option<String>), AuthError> {
    let user: GoogleUser = Client::new()
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .header("Authorization", format!("Bearer {access_token}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if user.id.is_empty() {
        return Err(AuthError::Profile("Google returned no account id"));
    }
    Ok((user.id, user.name.or(user.email)))
}
