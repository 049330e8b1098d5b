//! Profile and role server functions.

use dioxus::prelude::*;
use store::models::{Role, UserProfile};

#[cfg(feature = "server")]
use crate::backend::call;
#[cfg(feature = "server")]
use store::Backend;

#[cfg(feature = "server")]
#[get("/api/profile", session: tower_sessions::Session)]
pub async fn caller_profile() -> Result<Option<UserProfile>, ServerFnError> {
    call(&session, |c| async move { c.caller_profile().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/profile")]
pub async fn caller_profile() -> Result<Option<UserProfile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/profile/save", session: tower_sessions::Session)]
pub async fn save_caller_profile(profile: UserProfile) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.save_caller_profile(profile).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/profile/save")]
pub async fn save_caller_profile(profile: UserProfile) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/profile/user", session: tower_sessions::Session)]
pub async fn user_profile(principal: String) -> Result<Option<UserProfile>, ServerFnError> {
    call(&session, |c| async move { c.user_profile(principal).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/profile/user")]
pub async fn user_profile(principal: String) -> Result<Option<UserProfile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/role", session: tower_sessions::Session)]
pub async fn caller_role() -> Result<Role, ServerFnError> {
    call(&session, |c| async move { c.caller_role().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/role")]
pub async fn caller_role() -> Result<Role, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/role/is-admin", session: tower_sessions::Session)]
pub async fn is_caller_admin() -> Result<bool, ServerFnError> {
    call(&session, |c| async move { c.is_caller_admin().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/role/is-admin")]
pub async fn is_caller_admin() -> Result<bool, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/role/assign", session: tower_sessions::Session)]
pub async fn assign_role(principal: String, role: Role) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.assign_role(principal, role).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/role/assign")]
pub async fn assign_role(principal: String, role: Role) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/role/bootstrap", session: tower_sessions::Session)]
pub async fn initialize_bootstrap_token(token: String) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.initialize_bootstrap_token(token).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/role/bootstrap")]
pub async fn initialize_bootstrap_token(token: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
