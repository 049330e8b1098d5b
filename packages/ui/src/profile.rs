use dioxus::prelude::*;
use store::gate::needs_profile_completion;
use store::models::UserProfile;

use crate::auth::{use_gate, use_session};
use crate::client::{query_state, use_caller_profile, use_site};
use crate::views::ModalOverlay;

/// Asks a signed-in caller for their name and email until the saved profile
/// has both. Saving re-runs the admin check, since the server may grant a
/// role based on the address.
#[component]
pub fn ProfileSetupDialog() -> Element {
    let site = use_site();
    let session = use_session();
    let mut gate = use_gate();
    let profile = use_caller_profile();
    let mut dismissed = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let state = query_state(&profile);
    // Prefill whatever the caller already saved.
    use_effect(use_reactive!(|state| {
        if let Some(Some(existing)) = state.data() {
            name.set(existing.name.clone());
            email.set(existing.email.clone());
        }
    }));

    if dismissed() || !needs_profile_completion(session.read().is_logged_in(), &state) {
        return rsx! {};
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let draft = UserProfile {
                name: name(),
                email: email(),
            };
            if let Err(message) = draft.validate() {
                error.set(Some(message.to_string()));
                return;
            }
            saving.set(true);
            match site.client.save_caller_profile(draft.normalized()).await {
                Ok(()) => {
                    error.set(None);
                    gate.write().recheck();
                    site.notify();
                }
                Err(e) => {
                    tracing::error!("Profile save failed: {}", e);
                    error.set(Some(e.message));
                }
            }
            saving.set(false);
        }
    };

    rsx! {
        ModalOverlay { on_close: move |_| dismissed.set(true),
            form { class: "dialog", onsubmit,
                h2 { "Welcome! Set up your profile" }
                p { class: "muted", "Please enter your name and email to continue" }
                if let Some(message) = error() {
                    div { class: "alert alert-error", "{message}" }
                }
                div { class: "field",
                    label { r#for: "profile-name", "Your Name" }
                    input {
                        id: "profile-name",
                        placeholder: "Enter your name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                div { class: "field",
                    label { r#for: "profile-email", "Email" }
                    input {
                        id: "profile-email",
                        r#type: "email",
                        placeholder: "your.email@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div { class: "row",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Continue" }
                    }
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| dismissed.set(true),
                        "Later"
                    }
                }
            }
        }
    }
}
