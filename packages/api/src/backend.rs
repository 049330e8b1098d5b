//! # Process-wide reference backend
//!
//! Every server function runs its operation against one [`MemoryBackend`],
//! created lazily on first use and kept in a [`tokio::sync::OnceCell`].
//! Initialisation reads `site.toml` (see [`SiteConfig::load`]) and the
//! one-time `ADMIN_BOOTSTRAP_TOKEN` from the environment (via `dotenvy`).
//!
//! [`connection`] binds the backend to the principal stored in the caller's
//! session, so authorization decisions are made server side for the real
//! caller.

use dioxus::prelude::ServerFnError;
use store::{BackendConfig, Caller, ConfigError, Connection, MemoryBackend, RemoteResult, SiteConfig};
use tokio::sync::OnceCell;

use crate::auth::SESSION_PRINCIPAL_KEY;

static BACKEND: OnceCell<MemoryBackend> = OnceCell::const_new();

pub async fn get_backend() -> Result<&'static MemoryBackend, ConfigError> {
    BACKEND
        .get_or_try_init(|| async {
            dotenvy::dotenv().ok();
            let config = SiteConfig::load()?;
            let token = std::env::var("ADMIN_BOOTSTRAP_TOKEN").ok();
            if token.is_none() {
                tracing::warn!("ADMIN_BOOTSTRAP_TOKEN not set; only configured admin emails can become admin");
            }
            tracing::info!(site = %config.site.name, "reference backend initialised");
            Ok(MemoryBackend::new(BackendConfig::from_site(&config, token)))
        })
        .await
}

/// Principal stored in the session, if signed in.
pub async fn session_principal(session: &tower_sessions::Session) -> Result<Option<String>, ServerFnError> {
    session
        .get(SESSION_PRINCIPAL_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Backend handle acting as the session's caller.
pub async fn connection(session: &tower_sessions::Session) -> Result<Connection, ServerFnError> {
    let principal = session_principal(session).await?;
    let backend = get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(backend.connect(Caller::from_principal(principal)))
}

/// Pass the backend's message through untouched so the client can classify it.
pub fn remote<T>(result: RemoteResult<T>) -> Result<T, ServerFnError> {
    result.map_err(|e| {
        tracing::debug!(error = %e, "backend rejected call");
        ServerFnError::new(e.message().to_string())
    })
}

/// Run one backend operation as the session's caller.
pub async fn call<T, F, Fut>(session: &tower_sessions::Session, op: F) -> Result<T, ServerFnError>
where
    F: FnOnce(Connection) -> Fut,
    Fut: std::future::Future<Output = RemoteResult<T>>,
{
    let conn = connection(session).await?;
    remote(op(conn).await)
}
