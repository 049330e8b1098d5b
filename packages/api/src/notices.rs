//! Notice server functions.

use dioxus::prelude::*;
use store::models::{Id, Notice, NoticeCategory, NoticeDraft};

#[cfg(feature = "server")]
use crate::backend::call;
#[cfg(feature = "server")]
use store::Backend;

#[cfg(feature = "server")]
#[post("/api/notices/create", session: tower_sessions::Session)]
pub async fn create_notice(draft: NoticeDraft) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.create_notice(draft).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notices/create")]
pub async fn create_notice(draft: NoticeDraft) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notices/update", session: tower_sessions::Session)]
pub async fn update_notice(id: Id, draft: NoticeDraft) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.update_notice(id, draft).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notices/update")]
pub async fn update_notice(id: Id, draft: NoticeDraft) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notices/delete", session: tower_sessions::Session)]
pub async fn delete_notice(id: Id) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.delete_notice(id).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notices/delete")]
pub async fn delete_notice(id: Id) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notices/by-category", session: tower_sessions::Session)]
pub async fn notices_by_category(category: NoticeCategory) -> Result<Vec<Notice>, ServerFnError> {
    call(&session, |c| async move { c.notices_by_category(category).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notices/by-category")]
pub async fn notices_by_category(category: NoticeCategory) -> Result<Vec<Notice>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notices/latest", session: tower_sessions::Session)]
pub async fn latest_notices(limit: u64) -> Result<Vec<Notice>, ServerFnError> {
    call(&session, |c| async move { c.latest_notices(limit).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notices/latest")]
pub async fn latest_notices(limit: u64) -> Result<Vec<Notice>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
