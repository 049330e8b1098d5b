use chrono::{Datelike, Utc};
use dioxus::prelude::*;
use store::LoginStatus;

use crate::auth::use_session;
use crate::client::{query_state, use_contact_info};
use crate::icons::{FaBars, FaEnvelope, FaLocationDot, FaPhone, FaXmark};
use crate::{Icon, LoginButton, LogoutButton};

/// Top bar: brand, the navigation links passed as children, and the account
/// controls.
#[component]
pub fn SiteHeader(children: Element) -> Element {
    let session = use_session();
    let mut menu_open = use_signal(|| false);

    let nav_class = if menu_open() { "site-nav open" } else { "site-nav" };
    let account = match session.read().status() {
        LoginStatus::Initializing => rsx! {},
        LoginStatus::LoggedIn => {
            let label = session
                .read()
                .identity()
                .map(|identity| identity.label().to_string())
                .unwrap_or_default();
            rsx! {
                span { class: "account-name", "{label}" }
                LogoutButton { class: "btn btn-outline" }
            }
        }
        LoginStatus::LoggedOut => rsx! {
            LoginButton { provider: "github", label: "Login", class: "btn btn-primary" }
        },
    };

    rsx! {
        header { class: "site-header",
            div { class: "container header-row",
                a { class: "brand", href: "/",
                    span { class: "brand-mark", "NCRL" }
                    span { class: "brand-sub", "Welfare Association" }
                }
                button {
                    class: "menu-toggle",
                    aria_label: "Toggle menu",
                    onclick: move |_| menu_open.toggle(),
                    if menu_open() {
                        Icon { icon: FaXmark, width: 18, height: 18 }
                    } else {
                        Icon { icon: FaBars, width: 18, height: 18 }
                    }
                }
                nav {
                    class: "{nav_class}",
                    onclick: move |_| menu_open.set(false),
                    {children}
                }
                div { class: "account",
                    {account}
                }
            }
        }
    }
}

#[component]
pub fn SiteFooter(site_name: String) -> Element {
    let contact = use_contact_info();
    let info = query_state(&contact).data().cloned();
    let year = Utc::now().year();

    rsx! {
        footer { class: "site-footer",
            div { class: "container footer-grid",
                div {
                    h3 { "{site_name}" }
                    p { "Working together for a cleaner, safer and friendlier neighbourhood." }
                }
                div {
                    h3 { "Contact" }
                    if let Some(info) = info {
                        ul { class: "contact-lines",
                            li {
                                Icon { icon: FaLocationDot, width: 12, height: 12 }
                                " {info.address}"
                            }
                            li {
                                Icon { icon: FaPhone, width: 12, height: 12 }
                                " {info.phone}"
                            }
                            li {
                                Icon { icon: FaEnvelope, width: 12, height: 12 }
                                " {info.email}"
                            }
                        }
                    }
                }
            }
            p { class: "container copyright", "© {year} NCRL Welfare Association. All rights reserved." }
        }
    }
}
