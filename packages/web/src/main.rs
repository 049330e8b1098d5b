use dioxus::prelude::*;

use ui::AuthProvider;
use views::{About, Admin, Contact, Documents, Events, Gallery, Home, Login, Membership, Notices, SiteLayout};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/documents")]
        Documents {},
        #[route("/notices")]
        Notices {},
        #[route("/events")]
        Events {},
        #[route("/membership")]
        Membership {},
        #[route("/gallery")]
        Gallery {},
        #[route("/contact")]
        Contact {},
        #[route("/admin?:tab")]
        Admin { tab: String },
        #[route("/login?:error")]
        Login { error: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Failed to start runtime: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(launch_server()) {
            tracing::error!("Server stopped: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> std::io::Result<()> {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

    dotenvy::dotenv().ok();

    // Fail fast on a broken site.toml instead of on the first request
    if let Err(e) = api::backend::get_backend().await {
        return Err(std::io::Error::other(e));
    }

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = axum::Router::new()
        .route("/auth/github/callback", get(github_callback))
        .route("/auth/google/callback", get(google_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await
}

#[cfg(feature = "server")]
type CallbackParams = axum::extract::Query<std::collections::HashMap<String, String>>;

#[cfg(feature = "server")]
async fn github_callback(
    params: CallbackParams,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback(api::auth::Provider::GitHub, params, session).await
}

#[cfg(feature = "server")]
async fn google_callback(
    params: CallbackParams,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback(api::auth::Provider::Google, params, session).await
}

/// Finish an OAuth login: verify state, resolve the account and store the
/// caller in the session.
#[cfg(feature = "server")]
async fn oauth_callback(
    provider: api::auth::Provider,
    axum::extract::Query(params): CallbackParams,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use api::auth::{OAuthLogin, SESSION_DISPLAY_NAME_KEY, SESSION_PRINCIPAL_KEY};
    use axum::response::Redirect;

    let name = provider.as_str();
    let Some(code) = params.get("code") else {
        tracing::error!("{} callback missing code", name);
        return Redirect::to("/login?error=missing_code");
    };
    let Some(state) = params.get("state") else {
        tracing::error!("{} callback missing state", name);
        return Redirect::to("/login?error=missing_state");
    };

    let login = match OAuthLogin::new(provider) {
        Ok(login) => login,
        Err(e) => {
            tracing::error!("Failed to configure {} OAuth: {}", name, e);
            return Redirect::to("/login?error=config_error");
        }
    };
    let identity = match login.complete(&session, code, state).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!("{} OAuth error: {}", name, e);
            return Redirect::to("/login?error=oauth_error");
        }
    };

    if let Err(e) = session.cycle_id().await {
        tracing::error!("Failed to rotate session id: {}", e);
        return Redirect::to("/login?error=session_error");
    }
    if let Err(e) = session
        .insert(SESSION_PRINCIPAL_KEY, identity.principal.clone())
        .await
    {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/login?error=session_error");
    }
    if let Some(display_name) = &identity.display_name {
        if let Err(e) = session.insert(SESSION_DISPLAY_NAME_KEY, display_name).await {
            tracing::error!("Failed to set session: {}", e);
            return Redirect::to("/login?error=session_error");
        }
    }
    if let Err(e) = session.save().await {
        tracing::error!("Failed to save session: {}", e);
        return Redirect::to("/login?error=session_save_error");
    }

    tracing::info!(principal = %identity.principal, "signed in");
    Redirect::to("/admin")
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::SITE_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
