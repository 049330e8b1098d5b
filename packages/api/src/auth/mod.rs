//! Sign-in through GitHub or Google, and the session keys that carry the
//! resulting caller identity.

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod github;
#[cfg(feature = "server")]
mod google;
#[cfg(feature = "server")]
mod oauth;
mod session;

#[cfg(feature = "server")]
pub use config::OAuthConfig;
#[cfg(feature = "server")]
pub use oauth::{AuthError, OAuthLogin};
pub use session::{PendingLogin, Provider, SESSION_DISPLAY_NAME_KEY, SESSION_PENDING_LOGIN_KEY, SESSION_PRINCIPAL_KEY};
