//! Cached data hooks.
//!
//! The [`SyncClient`] owns caching and invalidation; the UI only needs to know
//! *when* to ask again. Every hook subscribes to [`Site::epoch`], which is
//! bumped after each write and each session change, and re-reads through the
//! client. Fresh entries come straight from the cache, invalidated ones are
//! refetched.

use api::RemoteBackend;
use dioxus::prelude::*;
use store::models::{ContactInfo, Event, GalleryItem, Notice, NoticeCategory, UserProfile};
use store::{QueryState, SyncClient};

use crate::auth::use_session;

/// Shared handle to the sync client plus the refresh counter.
#[derive(Clone)]
pub struct Site {
    pub client: SyncClient<RemoteBackend>,
    pub epoch: Signal<u64>,
}

impl Site {
    pub fn new(epoch: Signal<u64>) -> Self {
        Self {
            client: SyncClient::new(),
            epoch,
        }
    }

    /// Ask every mounted hook to re-read.
    pub fn notify(&self) {
        let mut epoch = self.epoch;
        epoch.with_mut(|n| *n += 1);
    }
}

pub fn use_site() -> Site {
    use_context::<Site>()
}

/// Current state of a query resource; a resource that has not resolved yet
/// is still loading.
pub fn query_state<T: Clone + 'static>(resource: &Resource<QueryState<T>>) -> QueryState<T> {
    (*resource.read()).clone().unwrap_or(QueryState::Loading)
}

pub fn use_notices(category: Signal<NoticeCategory>) -> Resource<QueryState<Vec<Notice>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        let category = category();
        async move { client.notices_by_category(category).await }
    })
}

pub fn use_latest_notices(limit: u64) -> Resource<QueryState<Vec<Notice>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.latest_notices(limit).await }
    })
}

pub fn use_all_notices() -> Resource<QueryState<Vec<Notice>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.all_notices().await }
    })
}

pub fn use_upcoming_events() -> Resource<QueryState<Vec<Event>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.upcoming_events().await }
    })
}

pub fn use_past_events() -> Resource<QueryState<Vec<Event>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.past_events().await }
    })
}

pub fn use_gallery() -> Resource<QueryState<Vec<GalleryItem>>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.gallery_items().await }
    })
}

pub fn use_contact_info() -> Resource<QueryState<ContactInfo>> {
    let site = use_site();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        async move { client.contact_info().await }
    })
}

/// Own profile; idle while nobody is signed in.
pub fn use_caller_profile() -> Resource<QueryState<Option<UserProfile>>> {
    let site = use_site();
    let session = use_session();
    use_resource(move || {
        let client = site.client.clone();
        let _ = (site.epoch)();
        let logged_in = session.read().is_logged_in();
        async move {
            if logged_in {
                client.caller_profile().await
            } else {
                QueryState::Idle
            }
        }
    })
}
