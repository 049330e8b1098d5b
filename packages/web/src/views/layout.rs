use dioxus::prelude::*;
use ui::{ProfileSetupDialog, SiteFooter, SiteHeader};

use crate::Route;

/// Header, page body and footer shared by every route.
#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        SiteHeader {
            Link { to: Route::Home {}, active_class: "active", "Home" }
            Link { to: Route::About {}, active_class: "active", "About Us" }
            Link { to: Route::Documents {}, active_class: "active", "Documents" }
            Link { to: Route::Notices {}, active_class: "active", "Notices" }
            Link { to: Route::Events {}, active_class: "active", "Events" }
            Link { to: Route::Membership {}, active_class: "active", "Membership" }
            Link { to: Route::Gallery {}, active_class: "active", "Gallery" }
            Link { to: Route::Contact {}, active_class: "active", "Contact" }
            Link { to: Route::Admin { tab: String::new() }, active_class: "active", "Admin" }
        }
        main { class: "site-main",
            Outlet::<Route> {}
        }
        SiteFooter { site_name: "NCRL Welfare Association" }
        ProfileSetupDialog {}
    }
}
