//! Session context, admin gate driver and login/logout buttons.

use api::RemoteBackend;
use dioxus::prelude::*;
use store::gate::check_admin;
use store::{AdminGate, Session};

use crate::client::Site;

/// The signed-in caller, if any. Updates on login and logout.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_gate() -> Signal<AdminGate> {
    use_context::<Signal<AdminGate>>()
}

/// Provides [`Site`], the [`Session`] and the [`AdminGate`] to the app.
///
/// Public pages can read as soon as this mounts: the client is connected
/// anonymously right away and rebound once the identity lookup returns.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let epoch = use_signal(|| 0u64);
    let mut session = use_signal(Session::new);
    let mut gate = use_signal(AdminGate::new);
    let site = use_context_provider(|| Site::new(epoch));
    use_context_provider(|| session);
    use_context_provider(|| gate);

    use_hook({
        let site = site.clone();
        move || site.client.connect(RemoteBackend)
    });

    // Fetch the current identity on mount
    let init_site = site.clone();
    let _ = use_resource(move || {
        let site = init_site.clone();
        async move {
            let identity = match api::get_current_identity().await {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!("Identity lookup failed: {}", e);
                    None
                }
            };
            session
                .write()
                .initialize(identity, RemoteBackend, &site.client, &mut gate.write());
            site.notify();
        }
    });

    // Run the admin check whenever the gate asks for one
    let check_site = site.clone();
    use_effect(move || {
        if !gate.read().is_checking() {
            return;
        }
        let client = check_site.client.clone();
        spawn(async move {
            let result = check_admin(&client).await;
            if let Err(e) = &result {
                tracing::warn!("Admin check failed: {}", e.message());
            }
            gate.write().on_admin_check(result);
        });
    });

    rsx! {
        {children}
    }
}

/// Button to initiate login with a specific provider.
#[component]
pub fn LoginButton(
    provider: String,
    #[props(default = "Login".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let provider = provider.clone();
        async move {
            loading.set(true);
            match api::get_login_url(provider).await {
                Ok(url) => redirect(&url),
                Err(e) => {
                    tracing::error!("Failed to get login URL: {}", e);
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Logging in..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
///
/// Clears every cached read before reconnecting anonymously so nothing from
/// the previous caller is shown to the next one.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let site = use_context::<Site>();
    let mut session = use_session();
    let mut gate = use_gate();

    let onclick = move |_| {
        let site = site.clone();
        async move {
            if let Err(e) = api::logout().await {
                tracing::error!("Logout failed: {}", e);
                return;
            }
            session.write().teardown(&site.client, &mut gate.write());
            session
                .write()
                .initialize(None, RemoteBackend, &site.client, &mut gate.write());
            site.notify();
            redirect("/");
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

fn redirect(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("Redirect requested to {}", url);
    }
}

/// Browser confirmation prompt; always true off the web.
pub(crate) fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("Auto-confirming: {}", message);
        true
    }
}
