//! # API crate: fullstack server functions for the association site
//!
//! Every remote operation of the site is a Dioxus server function defined
//! here, compiled twice: with the real implementation behind
//! `#[cfg(feature = "server")]`, and as a thin client stub that forwards the
//! call over HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | | GitHub / Google OAuth with PKCE, session keys |
//! | [`backend`] | `server` | Lazy process-wide reference backend and per-session caller binding |
//! | [`notices`], [`events`], [`gallery`] | | Content CRUD (mutations are admin only, enforced by the backend) |
//! | [`profile`] | | Caller profile, role checks, role assignment, bootstrap token |
//! | [`submissions`] | | Contact, membership and payment submissions, contact info |
//! | [`remote`] | | [`RemoteBackend`]: the `store::Backend` contract over these functions |
//!
//! ## Errors
//!
//! Backend failures become `ServerFnError`s carrying the backend's message
//! verbatim (`"Unauthorized: Only admins can …"`, `"trap: …"`,
//! `"… does not exist"`), so the client-side normalizer can classify them.
//!
//! ## Server functions defined in this file
//!
//! - **Authentication**: `get_current_identity`, `get_login_url`, `logout`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
pub mod events;
pub mod gallery;
pub mod notices;
pub mod profile;
pub mod remote;
pub mod submissions;

pub use remote::RemoteBackend;
pub use store::Identity;

/// The signed-in caller, if any.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_identity() -> Result<Option<Identity>, ServerFnError> {
    let Some(principal) = backend::session_principal(&session).await? else {
        return Ok(None);
    };
    let display_name: Option<String> = session
        .get(auth::SESSION_DISPLAY_NAME_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(Some(Identity {
        principal,
        display_name,
    }))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_identity() -> Result<Option<Identity>, ServerFnError> {
    Ok(None)
}

/// Start an OAuth login and return the provider URL to redirect to.
#[cfg(feature = "server")]
#[get("/api/auth/login/:provider", session: tower_sessions::Session)]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    let Some(provider) = auth::Provider::parse(&provider) else {
        return Err(ServerFnError::new(format!("Unknown provider: {provider}")));
    };
    let login = auth::OAuthLogin::new(provider).map_err(|e| ServerFnError::new(e.to_string()))?;
    login
        .authorize(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Forget the caller by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Ok(Some(principal)) = backend::session_principal(&session).await {
        tracing::info!(%principal, "logging out");
    }
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
