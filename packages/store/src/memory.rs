//! In-memory reference backend.
//!
//! [`MemoryBackend`] holds every record behind one mutex and hands out
//! per-caller [`Connection`]s that implement [`Backend`]. Authorization is
//! enforced here, on the backend side, with the same message shapes a remote
//! actor reports, so the client-side normalizer sees realistic text.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::backend::{Backend, Principal, RemoteResult};
use crate::clock::{system_clock, Clock};
use crate::config::{AccessSection, SiteConfig};
use crate::errors::RemoteError;
use crate::models::*;

/// Who is calling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Caller {
    Anonymous,
    Principal(Principal),
}

impl Caller {
    pub fn from_principal(principal: Option<Principal>) -> Self {
        principal.map(Caller::Principal).unwrap_or(Caller::Anonymous)
    }

    pub fn principal(&self) -> Option<&str> {
        match self {
            Caller::Anonymous => None,
            Caller::Principal(p) => Some(p),
        }
    }
}

/// Startup settings for the reference backend.
#[derive(Clone, Debug, Default)]
pub struct BackendConfig {
    /// One-time token that makes its first presenter an admin.
    pub bootstrap_token: Option<String>,
    pub access: AccessSection,
    pub contact: crate::config::ContactSection,
}

impl BackendConfig {
    pub fn from_site(config: &SiteConfig, bootstrap_token: Option<String>) -> Self {
        Self {
            bootstrap_token: bootstrap_token.filter(|t| !t.trim().is_empty()),
            access: config.access.clone(),
            contact: config.contact.clone(),
        }
    }
}

#[derive(Default)]
struct Counters {
    notice: Id,
    event: Id,
    gallery: Id,
    contact: Id,
    membership: Id,
    payment: Id,
}

fn next(counter: &mut Id) -> Id {
    *counter += 1;
    *counter
}

#[derive(Default)]
struct State {
    notices: BTreeMap<Id, Notice>,
    events: BTreeMap<Id, Event>,
    gallery: BTreeMap<Id, GalleryItem>,
    profiles: HashMap<Principal, UserProfile>,
    roles: HashMap<Principal, Role>,
    contacts: BTreeMap<Id, ContactSubmission>,
    memberships: BTreeMap<Id, MembershipRegistration>,
    payments: BTreeMap<Id, PaymentSubmission>,
    ids: Counters,
    bootstrap_token: Option<String>,
    config: BackendConfig,
}

impl State {
    fn role_of(&self, caller: &Caller) -> Role {
        let Caller::Principal(principal) = caller else {
            return Role::Guest;
        };
        if let Some(role) = self.roles.get(principal) {
            return *role;
        }
        if self.profiles.contains_key(principal) {
            Role::User
        } else {
            Role::Guest
        }
    }

    fn require_admin(&self, caller: &Caller, action: &str) -> RemoteResult<()> {
        if self.role_of(caller) == Role::Admin {
            Ok(())
        } else {
            Err(RemoteError::unauthorized(action))
        }
    }
}

/// Shared in-process backend. Cloning shares the state.
#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    clock: Clock,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(BackendConfig::default())
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend").finish_non_exhaustive()
    }
}

impl MemoryBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    pub fn with_clock(config: BackendConfig, clock: Clock) -> Self {
        let state = State {
            bootstrap_token: config.bootstrap_token.clone(),
            config,
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            clock,
        }
    }

    /// A handle that makes every call as `caller`.
    pub fn connect(&self, caller: Caller) -> Connection {
        Connection {
            backend: self.clone(),
            caller,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> i64 {
        i64::try_from((self.clock)()).unwrap_or(i64::MAX)
    }
}

/// [`Backend`] bound to one caller.
#[derive(Clone, Debug)]
pub struct Connection {
    backend: MemoryBackend,
    caller: Caller,
}

impl Connection {
    pub fn caller(&self) -> &Caller {
        &self.caller
    }
}

fn require_text(value: &str, field: &str) -> RemoteResult<()> {
    if value.trim().is_empty() {
        Err(RemoteError::trap(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Notices under `Unknown` would never be listed.
fn require_category(category: NoticeCategory) -> RemoteResult<()> {
    if category == NoticeCategory::Unknown {
        Err(RemoteError::trap("Unknown notice category"))
    } else {
        Ok(())
    }
}

fn newest_first<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> (i64, Id)) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

fn sorted_notices<'a>(notices: impl Iterator<Item = &'a Notice>) -> Vec<Notice> {
    newest_first(notices.cloned(), |n| (n.timestamp, n.id))
}

fn sorted_events<'a>(events: impl Iterator<Item = &'a Event>) -> Vec<Event> {
    newest_first(events.cloned(), |e| (e.timestamp, e.id))
}

impl Backend for Connection {
    async fn create_notice(&self, draft: NoticeDraft) -> RemoteResult<Id> {
        let timestamp = self.backend.now();
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "create notices")?;
        require_text(&draft.title, "Title")?;
        require_category(draft.category)?;
        let id = next(&mut state.ids.notice);
        state.notices.insert(
            id,
            Notice {
                id,
                title: draft.title,
                content: draft.content,
                date: draft.date,
                timestamp,
                category: draft.category,
            },
        );
        info!(id, category = draft.category.key(), "notice created");
        Ok(id)
    }

    async fn update_notice(&self, id: Id, draft: NoticeDraft) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "update notices")?;
        require_text(&draft.title, "Title")?;
        require_category(draft.category)?;
        let notice = state
            .notices
            .get_mut(&id)
            .ok_or_else(|| RemoteError::not_found("Notice"))?;
        notice.title = draft.title;
        notice.content = draft.content;
        notice.date = draft.date;
        notice.category = draft.category;
        info!(id, "notice updated");
        Ok(())
    }

    async fn delete_notice(&self, id: Id) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "delete notices")?;
        state
            .notices
            .remove(&id)
            .ok_or_else(|| RemoteError::not_found("Notice"))?;
        info!(id, "notice deleted");
        Ok(())
    }

    async fn notices_by_category(&self, category: NoticeCategory) -> RemoteResult<Vec<Notice>> {
        let state = self.backend.state();
        Ok(sorted_notices(
            state.notices.values().filter(|n| n.category == category),
        ))
    }

    async fn latest_notices(&self, limit: u64) -> RemoteResult<Vec<Notice>> {
        let state = self.backend.state();
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut notices = sorted_notices(state.notices.values());
        notices.truncate(limit);
        Ok(notices)
    }

    async fn create_event(&self, draft: EventDraft) -> RemoteResult<Id> {
        let timestamp = self.backend.now();
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "create events")?;
        require_text(&draft.title, "Title")?;
        let id = next(&mut state.ids.event);
        state.events.insert(
            id,
            Event {
                id,
                title: draft.title,
                description: draft.description,
                date: draft.date,
                is_past: draft.is_past,
                timestamp,
                event_type: draft.event_type,
            },
        );
        info!(id, is_past = draft.is_past, "event created");
        Ok(id)
    }

    async fn update_event(&self, id: Id, draft: EventDraft) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "update events")?;
        require_text(&draft.title, "Title")?;
        let event = state
            .events
            .get_mut(&id)
            .ok_or_else(|| RemoteError::not_found("Event"))?;
        event.title = draft.title;
        event.description = draft.description;
        event.date = draft.date;
        event.is_past = draft.is_past;
        event.event_type = draft.event_type;
        info!(id, "event updated");
        Ok(())
    }

    async fn delete_event(&self, id: Id) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "delete events")?;
        state
            .events
            .remove(&id)
            .ok_or_else(|| RemoteError::not_found("Event"))?;
        info!(id, "event deleted");
        Ok(())
    }

    async fn upcoming_events(&self) -> RemoteResult<Vec<Event>> {
        let state = self.backend.state();
        Ok(sorted_events(state.events.values().filter(|e| !e.is_past)))
    }

    async fn past_events(&self) -> RemoteResult<Vec<Event>> {
        let state = self.backend.state();
        Ok(sorted_events(state.events.values().filter(|e| e.is_past)))
    }

    async fn add_gallery_item(&self, draft: GalleryDraft) -> RemoteResult<Id> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "add gallery items")?;
        require_text(&draft.title, "Title")?;
        require_text(&draft.image_url, "Image URL")?;
        let id = next(&mut state.ids.gallery);
        state.gallery.insert(
            id,
            GalleryItem {
                id,
                title: draft.title,
                description: draft.description,
                image_url: draft.image_url,
            },
        );
        info!(id, "gallery item added");
        Ok(id)
    }

    async fn delete_gallery_item(&self, id: Id) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "delete gallery items")?;
        state
            .gallery
            .remove(&id)
            .ok_or_else(|| RemoteError::not_found("Gallery item"))?;
        info!(id, "gallery item deleted");
        Ok(())
    }

    async fn gallery_items(&self) -> RemoteResult<Vec<GalleryItem>> {
        let state = self.backend.state();
        Ok(state.gallery.values().cloned().collect())
    }

    async fn caller_profile(&self) -> RemoteResult<Option<UserProfile>> {
        let state = self.backend.state();
        Ok(self
            .caller
            .principal()
            .and_then(|p| state.profiles.get(p))
            .cloned())
    }

    async fn save_caller_profile(&self, profile: UserProfile) -> RemoteResult<()> {
        let Caller::Principal(principal) = &self.caller else {
            return Err(RemoteError::new(
                "Unauthorized: Only signed-in users can save profiles",
            ));
        };
        profile.validate().map_err(RemoteError::trap)?;
        let profile = profile.normalized();

        let mut state = self.backend.state();
        if state.config.access.is_admin_email(&profile.email) {
            state.roles.insert(principal.clone(), Role::Admin);
            info!(%principal, "admin role granted from configured email");
        }
        state.profiles.insert(principal.clone(), profile);
        info!(%principal, "profile saved");
        Ok(())
    }

    async fn user_profile(&self, principal: Principal) -> RemoteResult<Option<UserProfile>> {
        let state = self.backend.state();
        let is_self = self.caller.principal() == Some(principal.as_str());
        if !is_self && state.role_of(&self.caller) != Role::Admin {
            return Err(RemoteError::new(
                "Unauthorized: Can only view your own profile",
            ));
        }
        Ok(state.profiles.get(&principal).cloned())
    }

    async fn caller_role(&self) -> RemoteResult<Role> {
        Ok(self.backend.state().role_of(&self.caller))
    }

    async fn is_caller_admin(&self) -> RemoteResult<bool> {
        Ok(self.backend.state().role_of(&self.caller) == Role::Admin)
    }

    async fn assign_role(&self, principal: Principal, role: Role) -> RemoteResult<()> {
        let mut state = self.backend.state();
        state.require_admin(&self.caller, "assign roles")?;
        info!(%principal, role = role.label(), "role assigned");
        state.roles.insert(principal, role);
        Ok(())
    }

    async fn initialize_bootstrap_token(&self, token: String) -> RemoteResult<()> {
        let Caller::Principal(principal) = &self.caller else {
            return Err(RemoteError::new(
                "Unauthorized: Sign in before presenting a bootstrap token",
            ));
        };
        let mut state = self.backend.state();
        match state.bootstrap_token.as_deref() {
            Some(expected) if expected == token => {
                state.bootstrap_token = None;
                state.roles.insert(principal.clone(), Role::Admin);
                info!(%principal, "bootstrap token consumed, admin role granted");
                Ok(())
            }
            _ => Err(RemoteError::trap("Invalid or already used bootstrap token")),
        }
    }

    async fn submit_contact(&self, submission: ContactSubmission) -> RemoteResult<Id> {
        require_text(&submission.name, "Name")?;
        require_text(&submission.email, "Email")?;
        require_text(&submission.message, "Message")?;
        let mut state = self.backend.state();
        let id = next(&mut state.ids.contact);
        state.contacts.insert(id, submission);
        info!(id, "contact message received");
        Ok(id)
    }

    async fn contact_info(&self) -> RemoteResult<ContactInfo> {
        Ok(self.backend.state().config.contact.clone().into())
    }

    async fn submit_membership(&self, registration: MembershipRegistration) -> RemoteResult<Id> {
        require_text(&registration.name, "Name")?;
        require_text(&registration.email, "Email")?;
        let mut state = self.backend.state();
        let id = next(&mut state.ids.membership);
        info!(
            id,
            membership_type = registration.membership_type.key(),
            "membership registration received"
        );
        state.memberships.insert(id, registration);
        Ok(id)
    }

    async fn submit_payment(&self, payment: PaymentSubmission) -> RemoteResult<Id> {
        if payment.amount == 0 {
            return Err(RemoteError::trap("Amount must be greater than zero"));
        }
        let mut state = self.backend.state();
        let id = next(&mut state.ids.payment);
        info!(
            id,
            payment_type = payment.payment_type.key(),
            amount = payment.amount,
            "payment recorded"
        );
        state.payments.insert(id, payment);
        Ok(id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::{normalize, ErrorKind};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock that advances by 100ms on every read.
    pub(crate) fn ticking_clock() -> Clock {
        let now = Arc::new(AtomicU64::new(0));
        Arc::new(move || now.fetch_add(100, Ordering::SeqCst) + 100)
    }

    pub(crate) fn backend_with_admin() -> (MemoryBackend, Connection) {
        let config = BackendConfig {
            bootstrap_token: Some("let-me-in".to_string()),
            ..BackendConfig::default()
        };
        let backend = MemoryBackend::with_clock(config, ticking_clock());
        let admin = backend.connect(Caller::Principal("github:1".to_string()));
        (backend, admin)
    }

    pub(crate) fn notice(category: NoticeCategory, title: &str) -> NoticeDraft {
        NoticeDraft {
            category,
            title: title.to_string(),
            content: "Details inside".to_string(),
            date: "2024-06-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_token_is_single_use() {
        let (backend, admin) = backend_with_admin();
        assert!(!admin.is_caller_admin().await.unwrap());

        admin.initialize_bootstrap_token("wrong".to_string()).await.unwrap_err();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();
        assert!(admin.is_caller_admin().await.unwrap());
        assert_eq!(admin.caller_role().await.unwrap(), Role::Admin);

        let other = backend.connect(Caller::Principal("google:2".to_string()));
        let err = other
            .initialize_bootstrap_token("let-me-in".to_string())
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).kind, ErrorKind::BackendTrap);
        assert!(!other.is_caller_admin().await.unwrap());
    }

    #[tokio::test]
    async fn test_non_admin_mutations_are_rejected() {
        let (backend, _) = backend_with_admin();
        let resident = backend.connect(Caller::Principal("google:7".to_string()));

        let err = resident
            .create_notice(notice(NoticeCategory::General, "Hi"))
            .await
            .unwrap_err();
        assert!(err.message().contains("Unauthorized"));
        assert_eq!(normalize(err.message()).kind, ErrorKind::AuthorizationDenied);

        let err = resident.delete_gallery_item(1).await.unwrap_err();
        assert_eq!(err.message(), "Unauthorized: Only admins can delete gallery items");

        let anonymous = backend.connect(Caller::Anonymous);
        assert!(anonymous.assign_role("x".to_string(), Role::Admin).await.is_err());
        assert_eq!(anonymous.caller_role().await.unwrap(), Role::Guest);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_lists_newest_first() {
        let (_, admin) = backend_with_admin();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();

        let first = admin.create_notice(notice(NoticeCategory::General, "first")).await.unwrap();
        let second = admin.create_notice(notice(NoticeCategory::General, "second")).await.unwrap();
        admin.create_notice(notice(NoticeCategory::Meetings, "minutes")).await.unwrap();
        assert!(second > first);

        let general = admin.notices_by_category(NoticeCategory::General).await.unwrap();
        let titles: Vec<_> = general.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);

        let latest = admin.latest_notices(2).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].title, "minutes");
    }

    #[tokio::test]
    async fn test_missing_ids_report_not_found() {
        let (_, admin) = backend_with_admin();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();

        let err = admin.delete_event(42).await.unwrap_err();
        assert_eq!(err.message(), "Event does not exist");
        let err = admin
            .update_notice(9, notice(NoticeCategory::General, "x"))
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_validation_failures_are_traps() {
        let (_, admin) = backend_with_admin();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();

        let err = admin
            .create_notice(notice(NoticeCategory::General, "   "))
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).message, "Title must not be empty");

        let err = admin
            .create_notice(notice(NoticeCategory::Unknown, "Parking"))
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).message, "Unknown notice category");
        let id = admin
            .create_notice(notice(NoticeCategory::Meetings, "AGM"))
            .await
            .unwrap();
        let err = admin
            .update_notice(id, notice(NoticeCategory::Unknown, "AGM"))
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).kind, ErrorKind::BackendTrap);
        assert_eq!(admin.notices_by_category(NoticeCategory::Meetings).await.unwrap().len(), 1);

        let err = admin
            .submit_payment(PaymentSubmission {
                member_id: 1,
                amount: 0,
                payment_type: PaymentType::MaintenanceFee,
                date: "2024-06-01".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(normalize(err.message()).message, "Amount must be greater than zero");
    }

    #[tokio::test]
    async fn test_events_split_by_past_flag() {
        let (_, admin) = backend_with_admin();
        admin.initialize_bootstrap_token("let-me-in".to_string()).await.unwrap();
        for (title, is_past) in [("Diwali", false), ("AGM", true)] {
            admin
                .create_event(EventDraft {
                    event_type: EventType::CulturalProgram,
                    title: title.to_string(),
                    description: String::new(),
                    date: "2024-11-01".to_string(),
                    is_past,
                })
                .await
                .unwrap();
        }
        assert_eq!(admin.upcoming_events().await.unwrap()[0].title, "Diwali");
        assert_eq!(admin.past_events().await.unwrap()[0].title, "AGM");
    }

    #[tokio::test]
    async fn test_profile_rules() {
        let mut config = BackendConfig::default();
        config.access.admin_emails = vec!["secretary@ncrl.example".to_string()];
        let backend = MemoryBackend::new(config);
        let anonymous = backend.connect(Caller::Anonymous);
        let resident = backend.connect(Caller::Principal("google:3".to_string()));
        let secretary = backend.connect(Caller::Principal("github:4".to_string()));

        let profile = UserProfile {
            name: "Ravi".to_string(),
            email: "ravi@example.org".to_string(),
        };
        assert!(anonymous.save_caller_profile(profile.clone()).await.is_err());

        assert_eq!(resident.caller_role().await.unwrap(), Role::Guest);
        resident.save_caller_profile(profile.clone()).await.unwrap();
        assert_eq!(resident.caller_profile().await.unwrap(), Some(profile));
        assert_eq!(resident.caller_role().await.unwrap(), Role::User);

        secretary
            .save_caller_profile(UserProfile {
                name: "Secretary".to_string(),
                email: " Secretary@ncrl.example ".to_string(),
            })
            .await
            .unwrap();
        assert!(secretary.is_caller_admin().await.unwrap());

        // Residents only see their own profile; admins see anyone's.
        assert!(resident.user_profile("github:4".to_string()).await.is_err());
        assert!(resident.user_profile("google:3".to_string()).await.unwrap().is_some());
        assert!(secretary.user_profile("google:3".to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_submissions_open_to_anyone() {
        let backend = MemoryBackend::default();
        let anonymous = backend.connect(Caller::Anonymous);
        let id = anonymous
            .submit_contact(ContactSubmission::with_subject(
                "Meera".to_string(),
                "meera@example.org".to_string(),
                "Streetlights",
                "Lane 4 is dark.",
                "2024-06-01T10:00:00Z".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(id, 1);
        let id = anonymous
            .submit_membership(MembershipRegistration {
                name: "Meera".to_string(),
                address: "Plot 12".to_string(),
                email: "meera@example.org".to_string(),
                phone: "99999".to_string(),
                membership_type: MembershipType::Premium,
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        let info = anonymous.contact_info().await.unwrap();
        assert_eq!(info.address, "New City Regency Layout (Madhu Reddy Layout)");
    }
}
