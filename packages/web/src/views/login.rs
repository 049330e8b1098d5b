use dioxus::prelude::*;
use store::LoginStatus;
use ui::icons::FaShieldHalved;
use ui::{use_session, Icon, LoginButton};

use crate::Route;

/// Text for the `error` query parameter set by the OAuth callbacks.
fn error_message(code: &str) -> Option<&'static str> {
    match code {
        "" => None,
        "missing_code" | "missing_state" => Some("The sign-in provider returned an incomplete response."),
        "config_error" => Some("Sign-in is not configured on this server."),
        "oauth_error" => Some("Sign-in failed or expired. Please try again."),
        "session_error" | "session_save_error" => Some("Could not start your session. Please try again."),
        _ => Some("Sign-in failed. Please try again."),
    }
}

#[component]
pub fn Login(error: String) -> Element {
    let session = use_session();
    let nav = navigator();

    use_effect(move || {
        if session.read().status() == LoginStatus::LoggedIn {
            nav.replace(Route::Admin { tab: String::new() });
        }
    });

    let message = error_message(&error);

    rsx! {
        div { class: "card narrow center",
            div { class: "badge-icon",
                Icon { icon: FaShieldHalved, width: 28, height: 28 }
            }
            h2 { "Sign in" }
            p { class: "muted", "Choose your preferred sign-in method:" }
            if let Some(message) = message {
                p { class: "field-error", "{message}" }
            }
            div { class: "stack",
                LoginButton { provider: "github", label: "Continue with GitHub", class: "btn btn-primary wide" }
                LoginButton { provider: "google", label: "Continue with Google", class: "btn btn-outline wide" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(""), None);
        assert!(error_message("oauth_error").is_some());
        assert!(error_message("something_else").is_some());
    }
}
