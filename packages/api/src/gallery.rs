//! Gallery server functions.

use dioxus::prelude::*;
use store::models::{GalleryDraft, GalleryItem, Id};

#[cfg(feature = "server")]
use crate::backend::call;
#[cfg(feature = "server")]
use store::Backend;

#[cfg(feature = "server")]
#[post("/api/gallery/add", session: tower_sessions::Session)]
pub async fn add_gallery_item(draft: GalleryDraft) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.add_gallery_item(draft).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/gallery/add")]
pub async fn add_gallery_item(draft: GalleryDraft) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/gallery/delete", session: tower_sessions::Session)]
pub async fn delete_gallery_item(id: Id) -> Result<(), ServerFnError> {
    call(&session, |c| async move { c.delete_gallery_item(id).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/gallery/delete")]
pub async fn delete_gallery_item(id: Id) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/gallery", session: tower_sessions::Session)]
pub async fn gallery_items() -> Result<Vec<GalleryItem>, ServerFnError> {
    call(&session, |c| async move { c.gallery_items().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/gallery")]
pub async fn gallery_items() -> Result<Vec<GalleryItem>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
