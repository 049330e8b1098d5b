//! [`Backend`] over HTTP: each operation is the matching server function.
//!
//! Server-side failures arrive as [`ServerFnError`]s whose text contains the
//! backend's original message, which is all the normalizer needs.

use dioxus::prelude::ServerFnError;
use store::models::*;
use store::{Backend, Principal, RemoteError, RemoteResult};

use crate::{events, gallery, notices, profile, submissions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemoteBackend;

fn remote_error(err: ServerFnError) -> RemoteError {
    RemoteError::new(err.to_string())
}

impl Backend for RemoteBackend {
    async fn create_notice(&self, draft: NoticeDraft) -> RemoteResult<Id> {
        notices::create_notice(draft).await.map_err(remote_error)
    }

    async fn update_notice(&self, id: Id, draft: NoticeDraft) -> RemoteResult<()> {
        notices::update_notice(id, draft).await.map_err(remote_error)
    }

    async fn delete_notice(&self, id: Id) -> RemoteResult<()> {
        notices::delete_notice(id).await.map_err(remote_error)
    }

    async fn notices_by_category(&self, category: NoticeCategory) -> RemoteResult<Vec<Notice>> {
        notices::notices_by_category(category).await.map_err(remote_error)
    }

    async fn latest_notices(&self, limit: u64) -> RemoteResult<Vec<Notice>> {
        notices::latest_notices(limit).await.map_err(remote_error)
    }

    async fn create_event(&self, draft: EventDraft) -> RemoteResult<Id> {
        events::create_event(draft).await.map_err(remote_error)
    }

    async fn update_event(&self, id: Id, draft: EventDraft) -> RemoteResult<()> {
        events::update_event(id, draft).await.map_err(remote_error)
    }

    async fn delete_event(&self, id: Id) -> RemoteResult<()> {
        events::delete_event(id).await.map_err(remote_error)
    }

    async fn upcoming_events(&self) -> RemoteResult<Vec<Event>> {
        events::upcoming_events().await.map_err(remote_error)
    }

    async fn past_events(&self) -> RemoteResult<Vec<Event>> {
        events::past_events().await.map_err(remote_error)
    }

    async fn add_gallery_item(&self, draft: GalleryDraft) -> RemoteResult<Id> {
        gallery::add_gallery_item(draft).await.map_err(remote_error)
    }

    async fn delete_gallery_item(&self, id: Id) -> RemoteResult<()> {
        gallery::delete_gallery_item(id).await.map_err(remote_error)
    }

    async fn gallery_items(&self) -> RemoteResult<Vec<GalleryItem>> {
        gallery::gallery_items().await.map_err(remote_error)
    }

    async fn caller_profile(&self) -> RemoteResult<Option<UserProfile>> {
        profile::caller_profile().await.map_err(remote_error)
    }

    async fn save_caller_profile(&self, profile: UserProfile) -> RemoteResult<()> {
        profile::save_caller_profile(profile).await.map_err(remote_error)
    }

    async fn user_profile(&self, principal: Principal) -> RemoteResult<Option<UserProfile>> {
        profile::user_profile(principal).await.map_err(remote_error)
    }

    async fn caller_role(&self) -> RemoteResult<Role> {
        profile::caller_role().await.map_err(remote_error)
    }

    async fn is_caller_admin(&self) -> RemoteResult<bool> {
        profile::is_caller_admin().await.map_err(remote_error)
    }

    async fn assign_role(&self, principal: Principal, role: Role) -> RemoteResult<()> {
        profile::assign_role(principal, role).await.map_err(remote_error)
    }

    async fn initialize_bootstrap_token(&self, token: String) -> RemoteResult<()> {
        profile::initialize_bootstrap_token(token).await.map_err(remote_error)
    }

    async fn submit_contact(&self, submission: ContactSubmission) -> RemoteResult<Id> {
        submissions::submit_contact(submission).await.map_err(remote_error)
    }

    async fn contact_info(&self) -> RemoteResult<ContactInfo> {
        submissions::contact_info().await.map_err(remote_error)
    }

    async fn submit_membership(&self, registration: MembershipRegistration) -> RemoteResult<Id> {
        submissions::submit_membership(registration).await.map_err(remote_error)
    }

    async fn submit_payment(&self, payment: PaymentSubmission) -> RemoteResult<Id> {
        submissions::submit_payment(payment).await.map_err(remote_error)
    }
}
