//! Loading, empty, error and toast presentation.

use std::time::Duration;

use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaSpinner};
use crate::Icon;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[component]
pub fn LoadingState(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div { class: "status status-loading",
            Icon { icon: FaSpinner, width: 20, height: 20, class: "spin" }
            p { "{message}" }
        }
    }
}

#[component]
pub fn EmptyState(title: String, description: String) -> Element {
    rsx! {
        div { class: "status status-empty",
            h3 { "{title}" }
            p { "{description}" }
        }
    }
}

/// Inline failure message, optionally with a retry action.
#[component]
pub fn ErrorBanner(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "status status-error", role: "alert",
            Icon { icon: FaCircleExclamation, width: 16, height: 16 }
            span { "{message}" }
            if let Some(on_retry) = on_retry {
                button {
                    class: "btn btn-outline",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastMessage {
    Success(String),
    Error(String),
}

/// Transient notice shown after a write. Clears itself after a few seconds
/// unless a newer message replaced it in the meantime.
#[component]
pub fn Toast(message: Signal<Option<ToastMessage>>) -> Element {
    let mut message = message;

    use_effect(move || {
        let Some(shown) = message.read().clone() else {
            return;
        };
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::sleep(TOAST_LIFETIME).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(TOAST_LIFETIME).await;

            if message.peek().as_ref() == Some(&shown) {
                message.set(None);
            }
        });
    });

    let current = message.read().clone();
    match current {
        Some(ToastMessage::Success(text)) => rsx! {
            div { class: "toast toast-success", role: "status",
                Icon { icon: FaCircleCheck, width: 16, height: 16 }
                span { "{text}" }
            }
        },
        Some(ToastMessage::Error(text)) => rsx! {
            div { class: "toast toast-error", role: "alert",
                Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                span { "{text}" }
            }
        },
        None => rsx! {},
    }
}

/// User-facing text for a failed read.
pub(crate) fn read_error(err: &store::RemoteError) -> String {
    store::NormalizedError::from(err.clone()).message
}
