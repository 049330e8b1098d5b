//! Event server functions.

use dioxus::prelude::*;
use store::models::{Event, EventDraft, Id};

#[cfg(feature = "server")]
use crate::backend::call;
#[cfg(feature = "server")]
use store::Backend;

#[cfg(feature = "server")]
#[post("/api/events/create", session: tower_sessions::Session)]
pub async fn create_event(draft: EventDraft) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.create_event(draft).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/events/create")]
pub async fn create_event(draft: EventDraft) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/events/update", session: tower_sessions::Session)]
pub async fn update_event(id: Id, draft: EventDraft) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.update_event(id, draft).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/events/update")]
pub async fn update_event(id: Id, draft: EventDraft) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/events/delete", session: tower_sessions::Session)]
pub async fn delete_event(id: Id) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.delete_event(id).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/events/delete")]
pub async fn delete_event(id: Id) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/events/upcoming", session: tower_sessions::Session)]
pub async fn upcoming_events() -> Result<Vec<Event>, ServerFnError> {
    call(&session, |c| async move { c.upcoming_events().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/events/upcoming")]
pub async fn upcoming_events() -> Result<Vec<Event>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/events/past", session: tower_sessions::Session)]
pub async fn past_events() -> Result<Vec<Event>, ServerFnError> {
    call(&session, |c| async move { c.past_events().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/events/past")]
pub async fn past_events() -> Result<Vec<Event>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
