//! GitHub account lookup for a freshly issued access token.

use reqwest::Client;
use serde::Deserialize;

use super::oauth::AuthError;

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    name: Option<String>,
}

/// Account id and display name (falling back to the login handle).
pub(super) async fn fetch_account(access_token: &str) -> Result<(String, Option<String>), AuthError> {
    let user: GitHubUser = Client::new()
        .get("https://api.github.com/user")
        .header("Authorization", format!("Bearer {access_token}"))
        .header("User-Agent", "ncrl-site")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let name = user.name.filter(|n| !n.trim().is_empty()).unwrap_or(user.login);
    Ok((user.id.to_string(), Some(name)))
}
