//! Shared UI for the association site: session context, cached data hooks,
//! public page sections and the admin dashboard.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const SITE_CSS: Asset = asset!("/assets/site.css");

mod client;
pub use client::{
    query_state, use_all_notices, use_caller_profile, use_contact_info, use_gallery,
    use_latest_notices, use_notices, use_past_events, use_site, use_upcoming_events, Site,
};

mod auth;
pub use auth::{use_gate, use_session, AuthProvider, LoginButton, LogoutButton};

mod dates;
pub use dates::today;

mod status;
pub use status::{EmptyState, ErrorBanner, LoadingState, Toast, ToastMessage};

mod layout;
pub use layout::{SiteFooter, SiteHeader};

mod notices;
pub use notices::{LatestNotices, NoticeBoard, NoticeCard};

mod events;
pub use events::{EventCard, EventsBoard, UpcomingEvents};

mod gallery;
pub use gallery::{GalleryGrid, ImageWithFallback, Lightbox};

mod forms;
pub use forms::{ContactDetails, ContactForm, MembershipForm, PaymentForm};

mod profile;
pub use profile::ProfileSetupDialog;

pub mod views;
