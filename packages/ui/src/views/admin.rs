//! # Admin dashboard
//!
//! Renders whatever the [`AdminGate`](store::AdminGate) allows:
//!
//! | Gate / session | Shown |
//! |----------------|-------|
//! | identity lookup running | loading |
//! | signed out | login card |
//! | checking | loading |
//! | check failed | error with retry |
//! | not an admin | access denied, principal and bootstrap token form |
//! | admin | tabbed content management |

use dioxus::prelude::*;
use store::models::Role;
use store::{AdminTab, GateState, LoginStatus};

use crate::auth::{use_gate, use_session, LoginButton};
use crate::client::use_site;
use crate::icons::{FaShieldHalved, FaUserShield};
use crate::status::{ErrorBanner, LoadingState, Toast, ToastMessage};
use crate::Icon;

use super::{EventsAdmin, GalleryAdmin, NoticesAdmin};

#[component]
pub fn AdminDashboard(tab: AdminTab, on_select: EventHandler<AdminTab>) -> Element {
    let session = use_session();
    let mut gate = use_gate();

    let status = session.read().status();
    let state = gate.read().state().clone();

    match (status, state) {
        (LoginStatus::Initializing, _) => rsx! {
            LoadingState { message: "Loading admin dashboard..." }
        },
        (LoginStatus::LoggedOut, _) => rsx! { AdminLogin {} },
        (LoginStatus::LoggedIn, GateState::Unauthenticated | GateState::CheckingAdmin) => rsx! {
            LoadingState { message: "Loading admin dashboard..." }
        },
        (LoginStatus::LoggedIn, GateState::AdminError(message)) => rsx! {
            div { class: "container narrow",
                ErrorBanner {
                    message: "Could not verify admin access: {message}",
                    on_retry: move |_| gate.write().retry(),
                }
            }
        },
        (LoginStatus::LoggedIn, GateState::NonAdmin) => rsx! { AccessDenied {} },
        (LoginStatus::LoggedIn, GateState::Admin) => rsx! {
            AdminContent { tab, on_select }
        },
    }
}

#[component]
fn AdminLogin() -> Element {
    rsx! {
        div { class: "card narrow center",
            div { class: "badge-icon",
                Icon { icon: FaShieldHalved, width: 28, height: 28 }
            }
            h2 { "Admin Access" }
            p { class: "muted", "Please log in to access the admin dashboard" }
            div { class: "stack",
                LoginButton { provider: "github", label: "Login with GitHub", class: "btn btn-primary wide" }
                LoginButton { provider: "google", label: "Login with Google", class: "btn btn-outline wide" }
            }
        }
    }
}

/// Signed in without the admin role. Shows the caller's principal to pass
/// on to an administrator, and accepts the one-time bootstrap token.
#[component]
fn AccessDenied() -> Element {
    let site = use_site();
    let session = use_session();
    let mut gate = use_gate();
    let mut token = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let principal = session
        .read()
        .identity()
        .map(|identity| identity.principal.clone())
        .unwrap_or_default();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let value = token().trim().to_string();
            if value.is_empty() {
                error.set(Some("Please enter the bootstrap token".to_string()));
                return;
            }
            submitting.set(true);
            match site.client.initialize_bootstrap_token(value).await {
                Ok(()) => {
                    tracing::info!("Bootstrap token accepted");
                    error.set(None);
                    token.set(String::new());
                    gate.write().recheck();
                    site.notify();
                }
                Err(e) => {
                    tracing::warn!("Bootstrap token rejected: {}", e);
                    error.set(Some(e.message));
                }
            }
            submitting.set(false);
        }
    };

    rsx! {
        div { class: "card narrow danger",
            div { class: "center",
                div { class: "badge-icon danger",
                    Icon { icon: FaShieldHalved, width: 28, height: 28 }
                }
                h2 { "Access Denied" }
                p { class: "muted",
                    "You do not have permission to access the admin dashboard. Please contact an administrator if you believe this is an error."
                }
            }
            div { class: "field",
                label { r#for: "principal-id", "Your Principal ID" }
                input {
                    id: "principal-id",
                    class: "mono",
                    readonly: true,
                    value: "{principal}",
                }
                p { class: "muted small", "Share this ID with an administrator to request access." }
            }
            form { class: "form", onsubmit,
                div { class: "field",
                    label { r#for: "bootstrap-token", "Bootstrap Token" }
                    input {
                        id: "bootstrap-token",
                        r#type: "password",
                        placeholder: "First-time setup token",
                        value: token(),
                        oninput: move |evt: FormEvent| token.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "field-error", "{message}" }
                }
                button {
                    class: "btn btn-outline wide",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Checking..." } else { "Claim Admin Access" }
                }
            }
        }
    }
}

#[component]
fn AdminContent(tab: AdminTab, on_select: EventHandler<AdminTab>) -> Element {
    let toast = use_signal(|| None::<ToastMessage>);

    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Admin Dashboard" }
                p { class: "muted", "Manage notices, events and gallery content" }
            }
            div { class: "tabs",
                for candidate in AdminTab::ALL {
                    button {
                        key: "{candidate}",
                        class: if candidate == tab { "tab active" } else { "tab" },
                        onclick: move |_| on_select.call(candidate),
                        "{candidate.label()}"
                    }
                }
            }
            {match tab {
                AdminTab::Notices => rsx! { NoticesAdmin { toast } },
                AdminTab::Events => rsx! { EventsAdmin { toast } },
                AdminTab::Gallery => rsx! { GalleryAdmin { toast } },
            }}
            RoleAssignment { toast }
        }
        Toast { message: toast }
    }
}

fn parse_role(key: &str) -> Role {
    match key {
        "admin" => Role::Admin,
        "user" => Role::User,
        _ => Role::Guest,
    }
}

fn role_key(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::User => "user",
        Role::Guest => "guest",
    }
}

/// Grant or revoke roles by principal.
#[component]
fn RoleAssignment(toast: Signal<Option<ToastMessage>>) -> Element {
    let site = use_site();
    let mut toast = toast;
    let mut principal = use_signal(String::new);
    let mut role = use_signal(|| Role::User);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let target = principal().trim().to_string();
            if target.is_empty() {
                toast.set(Some(ToastMessage::Error("Please enter a principal ID".to_string())));
                return;
            }
            submitting.set(true);
            match site.client.assign_role(target, role()).await {
                Ok(()) => {
                    toast.set(Some(ToastMessage::Success("Role assigned successfully!".to_string())));
                    principal.set(String::new());
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
            submitting.set(false);
        }
    };

    rsx! {
        section { class: "card",
            div { class: "card-head",
                Icon { icon: FaUserShield, width: 16, height: 16 }
                h3 { "Assign Role" }
            }
            form { class: "form inline", onsubmit,
                input {
                    class: "mono",
                    placeholder: "Principal ID, e.g. github:12345",
                    value: principal(),
                    oninput: move |evt: FormEvent| principal.set(evt.value()),
                }
                select {
                    value: role_key(role()),
                    onchange: move |evt: FormEvent| role.set(parse_role(&evt.value())),
                    for option_role in [Role::Admin, Role::User, Role::Guest] {
                        option { key: "{role_key(option_role)}", value: role_key(option_role), "{option_role.label()}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Assign"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_keys_round_trip() {
        for role in [Role::Admin, Role::User, Role::Guest] {
            assert_eq!(parse_role(role_key(role)), role);
        }
        assert_eq!(parse_role("owner"), Role::Guest);
    }
}
