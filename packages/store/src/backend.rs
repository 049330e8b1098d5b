//! # Remote interface contract
//!
//! [`Backend`] is the typed surface of the association backend. Every call is
//! made on behalf of one caller identity and can fail with a [`RemoteError`]
//! carrying the backend's own message text; classification happens later in
//! [`crate::errors`].
//!
//! Two implementations exist: [`crate::memory::Connection`] (the in-process
//! reference backend used by the server and by tests) and the server-function
//! adaptor in the `api` package used by the browser.
//!
//! | Group | Operations |
//! |-------|-----------|
//! | Notices | `create_notice`, `update_notice`, `delete_notice`, `notices_by_category`, `latest_notices` |
//! | Events | `create_event`, `update_event`, `delete_event`, `upcoming_events`, `past_events` |
//! | Gallery | `add_gallery_item`, `delete_gallery_item`, `gallery_items` |
//! | Profile / role | `caller_profile`, `save_caller_profile`, `user_profile`, `caller_role`, `is_caller_admin`, `assign_role`, `initialize_bootstrap_token` |
//! | Submissions | `submit_contact`, `contact_info`, `submit_membership`, `submit_payment` |

use std::future::Future;

use crate::errors::RemoteError;
use crate::models::*;

/// Stable caller identifier established by login.
pub type Principal = String;

pub type RemoteResult<T> = Result<T, RemoteError>;

pub trait Backend {
    fn create_notice(&self, draft: NoticeDraft) -> impl Future<Output = RemoteResult<Id>>;
    fn update_notice(
        &self,
        id: Id,
        draft: NoticeDraft,
    ) -> impl Future<Output = RemoteResult<()>>;
    fn delete_notice(&self, id: Id) -> impl Future<Output = RemoteResult<()>>;
    fn notices_by_category(
        &self,
        category: NoticeCategory,
    ) -> impl Future<Output = RemoteResult<Vec<Notice>>>;
    fn latest_notices(&self, limit: u64) -> impl Future<Output = RemoteResult<Vec<Notice>>>;

    fn create_event(&self, draft: EventDraft) -> impl Future<Output = RemoteResult<Id>>;
    fn update_event(&self, id: Id, draft: EventDraft)
        -> impl Future<Output = RemoteResult<()>>;
    fn delete_event(&self, id: Id) -> impl Future<Output = RemoteResult<()>>;
    fn upcoming_events(&self) -> impl Future<Output = RemoteResult<Vec<Event>>>;
    fn past_events(&self) -> impl Future<Output = RemoteResult<Vec<Event>>>;

    fn add_gallery_item(&self, draft: GalleryDraft) -> impl Future<Output = RemoteResult<Id>>;
    fn delete_gallery_item(&self, id: Id) -> impl Future<Output = RemoteResult<()>>;
    fn gallery_items(&self) -> impl Future<Output = RemoteResult<Vec<GalleryItem>>>;

    /// `None` when the caller has not saved a profile yet.
    fn caller_profile(&self) -> impl Future<Output = RemoteResult<Option<UserProfile>>>;
    fn save_caller_profile(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = RemoteResult<()>>;
    fn user_profile(
        &self,
        principal: Principal,
    ) -> impl Future<Output = RemoteResult<Option<UserProfile>>>;
    fn caller_role(&self) -> impl Future<Output = RemoteResult<Role>>;
    fn is_caller_admin(&self) -> impl Future<Output = RemoteResult<bool>>;
    fn assign_role(
        &self,
        principal: Principal,
        role: Role,
    ) -> impl Future<Output = RemoteResult<()>>;
    fn initialize_bootstrap_token(&self, token: String)
        -> impl Future<Output = RemoteResult<()>>;

    fn submit_contact(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = RemoteResult<Id>>;
    fn contact_info(&self) -> impl Future<Output = RemoteResult<ContactInfo>>;
    fn submit_membership(
        &self,
        registration: MembershipRegistration,
    ) -> impl Future<Output = RemoteResult<Id>>;
    fn submit_payment(
        &self,
        payment: PaymentSubmission,
    ) -> impl Future<Output = RemoteResult<Id>>;
}
