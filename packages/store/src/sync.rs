//! # Sync client: cached reads and invalidating writes over a [`Backend`]
//!
//! [`SyncClient`] pairs a [`QueryCache`] with the current backend connection.
//!
//! - **Reads** return a [`QueryState`]. While no connection is set they are
//!   disabled and return [`QueryState::Idle`] without calling anything.
//! - **Writes** call the backend exactly once. On success they invalidate
//!   every key prefix the write can affect; on failure they return the
//!   [`NormalizedError`] and leave the cache alone.
//!
//! ## Keys and invalidation
//!
//! | Read | Key | Policy |
//! |------|-----|--------|
//! | notices by category | `notices/category/<key>` | [`QueryPolicy::LIST`], re-sorted by recency |
//! | latest notices | `notices/latest/<limit>` | [`QueryPolicy::LIST`], re-sorted by recency |
//! | all notices | `notices/all` | [`QueryPolicy::LIST`] |
//! | upcoming / past events | `events/upcoming`, `events/past` | [`QueryPolicy::LIST`] |
//! | gallery | `gallery` | [`QueryPolicy::GALLERY`] |
//! | contact info | `contactInfo` | [`QueryPolicy::LIST`] |
//! | own / other profile | `profile/caller`, `profile/user/<principal>` | [`QueryPolicy::PROFILE`] |
//! | role, is-admin | `admin/callerRole`, `admin/isCallerAdmin` | [`QueryPolicy::ADMIN_CHECK`] |
//!
//! | Write | Invalidates |
//! |-------|-------------|
//! | notice create / update / delete | `notices` |
//! | event create / update / delete | `events` |
//! | gallery add / delete | `gallery` |
//! | profile save | `profile`, `admin` |
//! | role assignment, bootstrap token | `admin` |
//! | contact, membership, payment | nothing |

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::backend::{Backend, Principal, RemoteResult};
use crate::errors::{NormalizedError, RemoteError};
use crate::models::*;
use crate::query::{QueryCache, QueryKey, QueryPolicy, QueryState};

/// Cache keys and prefixes used by [`SyncClient`].
pub mod keys {
    use super::QueryKey;
    use crate::models::NoticeCategory;

    pub fn notices() -> QueryKey {
        QueryKey::new("notices")
    }

    pub fn notices_by_category(category: NoticeCategory) -> QueryKey {
        notices().with("category").with(category.key())
    }

    pub fn latest_notices(limit: u64) -> QueryKey {
        notices().with("latest").with(limit)
    }

    pub fn all_notices() -> QueryKey {
        notices().with("all")
    }

    pub fn events() -> QueryKey {
        QueryKey::new("events")
    }

    pub fn upcoming_events() -> QueryKey {
        events().with("upcoming")
    }

    pub fn past_events() -> QueryKey {
        events().with("past")
    }

    pub fn gallery() -> QueryKey {
        QueryKey::new("gallery")
    }

    pub fn contact_info() -> QueryKey {
        QueryKey::new("contactInfo")
    }

    pub fn profile() -> QueryKey {
        QueryKey::new("profile")
    }

    pub fn caller_profile() -> QueryKey {
        profile().with("caller")
    }

    pub fn user_profile(principal: &str) -> QueryKey {
        profile().with("user").with(principal)
    }

    pub fn admin() -> QueryKey {
        QueryKey::new("admin")
    }

    pub fn caller_role() -> QueryKey {
        admin().with("callerRole")
    }

    pub fn is_caller_admin() -> QueryKey {
        admin().with("isCallerAdmin")
    }
}

/// Cached access to a backend connection. Cloning shares cache and connection.
pub struct SyncClient<B> {
    cache: QueryCache,
    backend: Arc<Mutex<Option<B>>>,
}

impl<B> Clone for SyncClient<B> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend + Clone> Default for SyncClient<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend + Clone> SyncClient<B> {
    pub fn new() -> Self {
        Self::with_cache(QueryCache::new())
    }

    pub fn with_cache(cache: QueryCache) -> Self {
        Self {
            cache,
            backend: Arc::new(Mutex::new(None)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<B>> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn connect(&self, backend: B) {
        *self.slot() = Some(backend);
        debug!("sync client connected");
    }

    pub fn disconnect(&self) {
        *self.slot() = None;
        debug!("sync client disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.slot().is_some()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn backend(&self) -> Option<B> {
        self.slot().clone()
    }

    async fn query<T, F, Fut>(&self, key: QueryKey, policy: QueryPolicy, fetch: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(B) -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        let Some(backend) = self.backend() else {
            debug!(%key, "query disabled, no connection");
            return QueryState::Idle;
        };
        let result = self
            .cache
            .get_or_fetch(&key, policy, || fetch(backend.clone()))
            .await;
        QueryState::from_result(result)
    }

    async fn mutate<T, F, Fut>(
        &self,
        operation: &'static str,
        invalidates: &[QueryKey],
        call: F,
    ) -> Result<T, NormalizedError>
    where
        F: FnOnce(B) -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        let Some(backend) = self.backend() else {
            let err = NormalizedError::connection_not_ready();
            warn!(operation, error = %err, "mutation attempted without connection");
            return Err(err);
        };
        match call(backend).await {
            Ok(value) => {
                for prefix in invalidates {
                    self.cache.invalidate(prefix);
                }
                Ok(value)
            }
            Err(raw) => {
                let err = NormalizedError::from(raw);
                warn!(operation, kind = ?err.kind, error = %err, "mutation failed");
                Err(err)
            }
        }
    }

    // --- Notices ---

    /// The backend promises no order; lists come back most recent first.
    pub async fn notices_by_category(&self, category: NoticeCategory) -> QueryState<Vec<Notice>> {
        self.query(keys::notices_by_category(category), QueryPolicy::LIST, |b| async move {
            let mut notices = b.notices_by_category(category).await?;
            sort_by_recency(&mut notices);
            Ok::<_, RemoteError>(notices)
        })
        .await
    }

    pub async fn latest_notices(&self, limit: u64) -> QueryState<Vec<Notice>> {
        self.query(keys::latest_notices(limit), QueryPolicy::LIST, |b| async move {
            let mut notices = b.latest_notices(limit).await?;
            sort_by_recency(&mut notices);
            Ok::<_, RemoteError>(notices)
        })
        .await
    }

    /// Every category merged, most recent first.
    pub async fn all_notices(&self) -> QueryState<Vec<Notice>> {
        self.query(keys::all_notices(), QueryPolicy::LIST, |b| async move {
            let mut all = Vec::new();
            for category in NoticeCategory::ALL {
                all.extend(b.notices_by_category(category).await?);
            }
            sort_by_recency(&mut all);
            Ok::<_, RemoteError>(all)
        })
        .await
    }

    pub async fn create_notice(&self, draft: NoticeDraft) -> Result<Id, NormalizedError> {
        self.mutate("create_notice", &[keys::notices()], |b| async move {
            b.create_notice(draft).await
        })
        .await
    }

    pub async fn update_notice(&self, id: Id, draft: NoticeDraft) -> Result<(), NormalizedError> {
        self.mutate("update_notice", &[keys::notices()], |b| async move {
            b.update_notice(id, draft).await
        })
        .await
    }

    pub async fn delete_notice(&self, id: Id) -> Result<(), NormalizedError> {
        self.mutate("delete_notice", &[keys::notices()], |b| async move {
            b.delete_notice(id).await
        })
        .await
    }

    // --- Events ---

    pub async fn upcoming_events(&self) -> QueryState<Vec<Event>> {
        self.query(keys::upcoming_events(), QueryPolicy::LIST, |b| async move {
            b.upcoming_events().await
        })
        .await
    }

    pub async fn past_events(&self) -> QueryState<Vec<Event>> {
        self.query(keys::past_events(), QueryPolicy::LIST, |b| async move {
            b.past_events().await
        })
        .await
    }

    pub async fn create_event(&self, draft: EventDraft) -> Result<Id, NormalizedError> {
        self.mutate("create_event", &[keys::events()], |b| async move {
            b.create_event(draft).await
        })
        .await
    }

    pub async fn update_event(&self, id: Id, draft: EventDraft) -> Result<(), NormalizedError> {
        self.mutate("update_event", &[keys::events()], |b| async move {
            b.update_event(id, draft).await
        })
        .await
    }

    pub async fn delete_event(&self, id: Id) -> Result<(), NormalizedError> {
        self.mutate("delete_event", &[keys::events()], |b| async move {
            b.delete_event(id).await
        })
        .await
    }

    // --- Gallery ---

    pub async fn gallery_items(&self) -> QueryState<Vec<GalleryItem>> {
        self.query(keys::gallery(), QueryPolicy::GALLERY, |b| async move {
            b.gallery_items().await
        })
        .await
    }

    pub async fn add_gallery_item(&self, draft: GalleryDraft) -> Result<Id, NormalizedError> {
        self.mutate("add_gallery_item", &[keys::gallery()], |b| async move {
            b.add_gallery_item(draft).await
        })
        .await
    }

    pub async fn delete_gallery_item(&self, id: Id) -> Result<(), NormalizedError> {
        self.mutate("delete_gallery_item", &[keys::gallery()], |b| async move {
            b.delete_gallery_item(id).await
        })
        .await
    }

    // --- Profile and role ---

    pub async fn caller_profile(&self) -> QueryState<Option<UserProfile>> {
        self.query(keys::caller_profile(), QueryPolicy::PROFILE, |b| async move {
            b.caller_profile().await
        })
        .await
    }

    pub async fn user_profile(&self, principal: Principal) -> QueryState<Option<UserProfile>> {
        let key = keys::user_profile(&principal);
        self.query(key, QueryPolicy::PROFILE, |b| {
            let principal = principal.clone();
            async move { b.user_profile(principal).await }
        })
        .await
    }

    pub async fn save_caller_profile(&self, profile: UserProfile) -> Result<(), NormalizedError> {
        self.mutate(
            "save_caller_profile",
            &[keys::profile(), keys::admin()],
            |b| async move { b.save_caller_profile(profile).await },
        )
        .await
    }

    pub async fn caller_role(&self) -> QueryState<Role> {
        self.query(keys::caller_role(), QueryPolicy::ADMIN_CHECK, |b| async move {
            b.caller_role().await
        })
        .await
    }

    pub async fn is_caller_admin(&self) -> QueryState<bool> {
        self.query(keys::is_caller_admin(), QueryPolicy::ADMIN_CHECK, |b| async move {
            b.is_caller_admin().await
        })
        .await
    }

    pub async fn assign_role(&self, principal: Principal, role: Role) -> Result<(), NormalizedError> {
        self.mutate("assign_role", &[keys::admin()], |b| async move {
            b.assign_role(principal, role).await
        })
        .await
    }

    pub async fn initialize_bootstrap_token(&self, token: String) -> Result<(), NormalizedError> {
        self.mutate("initialize_bootstrap_token", &[keys::admin()], |b| async move {
            b.initialize_bootstrap_token(token).await
        })
        .await
    }

    // --- Submissions ---

    pub async fn contact_info(&self) -> QueryState<ContactInfo> {
        self.query(keys::contact_info(), QueryPolicy::LIST, |b| async move {
            b.contact_info().await
        })
        .await
    }

    pub async fn submit_contact(&self, submission: ContactSubmission) -> Result<Id, NormalizedError> {
        self.mutate("submit_contact", &[], |b| async move {
            b.submit_contact(submission).await
        })
        .await
    }

    pub async fn submit_membership(
        &self,
        registration: MembershipRegistration,
    ) -> Result<Id, NormalizedError> {
        self.mutate("submit_membership", &[], |b| async move {
            b.submit_membership(registration).await
        })
        .await
    }

    pub async fn submit_payment(&self, payment: PaymentSubmission) -> Result<Id, NormalizedError> {
        self.mutate("submit_payment", &[], |b| async move {
            b.submit_payment(payment).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, ACCESS_DENIED_MESSAGE, CONNECTION_MESSAGE};
    use crate::memory::tests::{backend_with_admin, notice};
    use crate::memory::{BackendConfig, Caller, Connection, MemoryBackend};
    use crate::clock::Clock;
    use crate::query::EntryStatus;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering as AtomicOrdering};

    /// Delegates to a [`Connection`], hands notice lists back oldest first
    /// and counts admin checks.
    #[derive(Clone)]
    struct Reordering {
        inner: Connection,
        admin_checks: Arc<AtomicUsize>,
    }

    impl Reordering {
        fn new(inner: Connection) -> Self {
            Self {
                inner,
                admin_checks: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    fn reversed<T>(mut items: Vec<T>) -> Vec<T> {
        items.reverse();
        items
    }

    impl Backend for Reordering {
        async fn create_notice(&self, draft: NoticeDraft) -> RemoteResult<Id> {
            self.inner.create_notice(draft).await
        }
        async fn update_notice(&self, id: Id, draft: NoticeDraft) -> RemoteResult<()> {
            self.inner.update_notice(id, draft).await
        }
        async fn delete_notice(&self, id: Id) -> RemoteResult<()> {
            self.inner.delete_notice(id).await
        }
        async fn notices_by_category(&self, category: NoticeCategory) -> RemoteResult<Vec<Notice>> {
            self.inner.notices_by_category(category).await.map(reversed)
        }
        async fn latest_notices(&self, limit: u64) -> RemoteResult<Vec<Notice>> {
            self.inner.latest_notices(limit).await.map(reversed)
        }
        async fn create_event(&self, draft: EventDraft) -> RemoteResult<Id> {
            self.inner.create_event(draft).await
        }
        async fn update_event(&self, id: Id, draft: EventDraft) -> RemoteResult<()> {
            self.inner.update_event(id, draft).await
        }
        async fn delete_event(&self, id: Id) -> RemoteResult<()> {
            self.inner.delete_event(id).await
        }
        async fn upcoming_events(&self) -> RemoteResult<Vec<Event>> {
            self.inner.upcoming_events().await
        }
        async fn past_events(&self) -> RemoteResult<Vec<Event>> {
            self.inner.past_events().await
        }
        async fn add_gallery_item(&self, draft: GalleryDraft) -> RemoteResult<Id> {
            self.inner.add_gallery_item(draft).await
        }
        async fn delete_gallery_item(&self, id: Id) -> RemoteResult<()> {
            self.inner.delete_gallery_item(id).await
        }
        async fn gallery_items(&self) -> RemoteResult<Vec<GalleryItem>> {
            self.inner.gallery_items().await
        }
        async fn caller_profile(&self) -> RemoteResult<Option<UserProfile>> {
            self.inner.caller_profile().await
        }
        async fn save_caller_profile(&self, profile: UserProfile) -> RemoteResult<()> {
            self.inner.save_caller_profile(profile).await
        }
        async fn user_profile(&self, principal: Principal) -> RemoteResult<Option<UserProfile>> {
            self.inner.user_profile(principal).await
        }
        async fn caller_role(&self) -> RemoteResult<Role> {
            self.inner.caller_role().await
        }
        async fn is_caller_admin(&self) -> RemoteResult<bool> {
            self.admin_checks.fetch_add(1, AtomicOrdering::SeqCst);
            self.inner.is_caller_admin().await
        }
        async fn assign_role(&self, principal: Principal, role: Role) -> RemoteResult<()> {
            self.inner.assign_role(principal, role).await
        }
        async fn initialize_bootstrap_token(&self, token: String) -> RemoteResult<()> {
            self.inner.initialize_bootstrap_token(token).await
        }
        async fn submit_contact(&self, submission: ContactSubmission) -> RemoteResult<Id> {
            self.inner.submit_contact(submission).await
        }
        async fn contact_info(&self) -> RemoteResult<ContactInfo> {
            self.inner.contact_info().await
        }
        async fn submit_membership(&self, registration: MembershipRegistration) -> RemoteResult<Id> {
            self.inner.submit_membership(registration).await
        }
        async fn submit_payment(&self, payment: PaymentSubmission) -> RemoteResult<Id> {
            self.inner.submit_payment(payment).await
        }
    }

    fn manual_clock() -> (Clock, Arc<AtomicU64>) {
        let now = Arc::new(AtomicU64::new(1_000));
        let handle = Arc::clone(&now);
        (Arc::new(move || handle.load(AtomicOrdering::SeqCst)), now)
    }

    async fn admin_client() -> SyncClient<Connection> {
        let (_, admin) = backend_with_admin();
        let client = SyncClient::new();
        client.connect(admin);
        client
            .initialize_bootstrap_token("let-me-in".to_string())
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_create_notice_invalidates_category_list() {
        let client = admin_client().await;
        let key = keys::notices_by_category(NoticeCategory::WaterSupply);

        let before = client.notices_by_category(NoticeCategory::WaterSupply).await;
        assert_eq!(before.data().map(Vec::len), Some(0));
        assert_eq!(client.cache().version(&key), 0);

        client
            .create_notice(notice(NoticeCategory::WaterSupply, "Tanker on Tuesday"))
            .await
            .unwrap();
        assert_eq!(client.cache().status(&key), Some(EntryStatus::Invalidated));
        assert_eq!(client.cache().version(&key), 1);

        let after = client.notices_by_category(NoticeCategory::WaterSupply).await;
        let titles: Vec<_> = after.data().unwrap().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, ["Tanker on Tuesday"]);
    }

    #[tokio::test]
    async fn test_latest_notices_most_recent_first() {
        let client = admin_client().await;
        // The ticking clock stamps these 100 and 200.
        client.create_notice(notice(NoticeCategory::General, "older")).await.unwrap();
        client.create_notice(notice(NoticeCategory::General, "newer")).await.unwrap();

        let latest = client.latest_notices(2).await;
        let latest = latest.data().unwrap();
        assert_eq!(latest[0].title, "newer");
        assert!(latest[0].timestamp > latest[1].timestamp);
    }

    #[tokio::test]
    async fn test_notice_lists_are_resorted_whatever_the_backend_order() {
        let (_, admin) = backend_with_admin();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();
        // The ticking clock stamps these 100 and 200.
        admin.create_notice(notice(NoticeCategory::General, "ts100")).await.unwrap();
        admin.create_notice(notice(NoticeCategory::General, "ts200")).await.unwrap();

        let client = SyncClient::new();
        client.connect(Reordering::new(admin));

        let latest = client.latest_notices(2).await;
        let titles: Vec<_> = latest.data().unwrap().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["ts200", "ts100"]);

        let general = client.notices_by_category(NoticeCategory::General).await;
        let stamps: Vec<_> = general.data().unwrap().iter().map(|n| n.timestamp).collect();
        assert_eq!(stamps, [200, 100]);
    }

    #[tokio::test]
    async fn test_admin_check_served_from_cache_within_window() {
        let (_, admin) = backend_with_admin();
        let backend = Reordering::new(admin);
        let checks = Arc::clone(&backend.admin_checks);
        let (clock, now) = manual_clock();
        let client = SyncClient::with_cache(QueryCache::with_clock(clock));
        client.connect(backend);

        assert_eq!(client.is_caller_admin().await, QueryState::Success(false));
        now.fetch_add(29_000, AtomicOrdering::SeqCst);
        assert_eq!(client.is_caller_admin().await, QueryState::Success(false));
        assert_eq!(checks.load(AtomicOrdering::SeqCst), 1);

        now.fetch_add(1_000, AtomicOrdering::SeqCst);
        assert_eq!(client.is_caller_admin().await, QueryState::Success(false));
        assert_eq!(checks.load(AtomicOrdering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_notices_merges_categories() {
        let client = admin_client().await;
        client.create_notice(notice(NoticeCategory::Meetings, "minutes")).await.unwrap();
        client.create_notice(notice(NoticeCategory::CivicIssues, "potholes")).await.unwrap();
        let all = client.all_notices().await;
        let titles: Vec<_> = all.data().unwrap().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["potholes", "minutes"]);
    }

    #[tokio::test]
    async fn test_profile_save_refetches_profile_and_admin() {
        let mut config = BackendConfig::default();
        config.access.admin_emails = vec!["secretary@ncrl.example".to_string()];
        let backend = MemoryBackend::new(config);
        let client = SyncClient::new();
        client.connect(backend.connect(Caller::Principal("github:9".to_string())));

        assert_eq!(client.caller_profile().await, QueryState::Success(None));
        assert_eq!(client.is_caller_admin().await, QueryState::Success(false));
        assert_eq!(client.caller_role().await, QueryState::Success(Role::Guest));

        let profile = UserProfile {
            name: "Secretary".to_string(),
            email: "secretary@ncrl.example".to_string(),
        };
        client.save_caller_profile(profile.clone()).await.unwrap();
        assert_eq!(client.cache().version(&keys::caller_profile()), 1);
        assert_eq!(client.cache().version(&keys::is_caller_admin()), 1);

        assert_eq!(client.caller_profile().await, QueryState::Success(Some(profile)));
        assert_eq!(client.is_caller_admin().await, QueryState::Success(true));
        assert_eq!(client.caller_role().await, QueryState::Success(Role::Admin));
    }

    #[tokio::test]
    async fn test_gallery_add_bypasses_stale_window() {
        let client = admin_client().await;
        assert_eq!(client.gallery_items().await.data().map(Vec::len), Some(0));
        client
            .add_gallery_item(GalleryDraft {
                title: "Holi".to_string(),
                image_url: "https://example.org/holi.jpg".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(client.gallery_items().await.data().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_disconnected_reads_are_idle_and_writes_fail() {
        let client: SyncClient<Connection> = SyncClient::new();
        assert_eq!(client.upcoming_events().await, QueryState::Idle);
        assert_eq!(client.cache().status(&keys::upcoming_events()), None);

        let err = client
            .create_notice(notice(NoticeCategory::General, "x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConnectionNotReady);
        assert_eq!(err.message, CONNECTION_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_mutation_is_normalized_and_invalidates_nothing() {
        let backend = MemoryBackend::default();
        let client = SyncClient::new();
        client.connect(backend.connect(Caller::Principal("google:1".to_string())));
        client.latest_notices(5).await;

        let err = client
            .create_notice(notice(NoticeCategory::General, "x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorizationDenied);
        assert_eq!(err.message, ACCESS_DENIED_MESSAGE);
        assert_eq!(client.cache().version(&keys::latest_notices(5)), 0);
    }

    #[tokio::test]
    async fn test_submissions_leave_cache_untouched() {
        let client = admin_client().await;
        client.contact_info().await;
        client
            .submit_payment(PaymentSubmission {
                member_id: 3,
                amount: 1500,
                payment_type: PaymentType::WelfareFund,
                date: "2024-06-01".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(client.cache().version(&keys::contact_info()), 0);
    }

    #[tokio::test]
    async fn test_event_mutations_invalidate_both_lists() {
        let client = admin_client().await;
        client.upcoming_events().await;
        client.past_events().await;
        let id = client
            .create_event(EventDraft {
                event_type: EventType::AssociationMeeting,
                title: "AGM".to_string(),
                description: String::new(),
                date: "2024-07-01".to_string(),
                is_past: false,
            })
            .await
            .unwrap();
        assert_eq!(client.cache().version(&keys::upcoming_events()), 1);
        assert_eq!(client.cache().version(&keys::past_events()), 1);

        client.delete_event(id).await.unwrap();
        assert_eq!(client.upcoming_events().await.data().map(Vec::len), Some(0));
    }
}
