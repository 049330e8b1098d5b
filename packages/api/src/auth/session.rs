//! Session keys and the values stored under them.

use serde::{Deserialize, Serialize};

/// Caller principal, e.g. `"github:1234"`.
pub const SESSION_PRINCIPAL_KEY: &str = "principal";
pub const SESSION_DISPLAY_NAME_KEY: &str = "display_name";
/// [`PendingLogin`] between the redirect to the provider and its callback.
pub const SESSION_PENDING_LOGIN_KEY: &str = "pending_login";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    GitHub,
    Google,
}

impl Provider {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "github" => Some(Provider::GitHub),
            "google" => Some(Provider::Google),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::Google => "google",
        }
    }

    /// Principal for a provider-side account id.
    pub fn principal(self, account_id: &str) -> String {
        format!("{}:{account_id}", self.as_str())
    }
}

/// CSRF state and PKCE verifier of a login in progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingLogin {
    pub provider: Provider,
    pub state: String,
    pub pkce_verifier: String,
}
