//! Authentication state shared by the gate and the sync client.
//!
//! [`Session::initialize`] connects the client and feeds the gate;
//! [`Session::teardown`] clears every cached read, disconnects and resets the
//! gate so nothing from the previous caller survives a logout.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::{Backend, Principal};
use crate::gate::AdminGate;
use crate::sync::SyncClient;

/// The signed-in caller as established by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub principal: Principal,
    pub display_name: Option<String>,
}

impl Identity {
    /// Display name when known, otherwise the principal.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.principal)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginStatus {
    /// Identity lookup still in flight.
    #[default]
    Initializing,
    LoggedOut,
    LoggedIn,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    status: LoginStatus,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn status(&self) -> LoginStatus {
        self.status
    }

    pub fn is_logged_in(&self) -> bool {
        self.status == LoginStatus::LoggedIn
    }

    /// Record the caller (or its absence) and open the backend connection.
    pub fn initialize<B: Backend + Clone>(
        &mut self,
        identity: Option<Identity>,
        backend: B,
        client: &SyncClient<B>,
        gate: &mut AdminGate,
    ) {
        client.connect(backend);
        gate.on_connection(true);
        self.status = if identity.is_some() {
            LoginStatus::LoggedIn
        } else {
            LoginStatus::LoggedOut
        };
        if let Some(identity) = &identity {
            info!(principal = %identity.principal, "session initialized");
            gate.on_login();
        }
        self.identity = identity;
    }

    /// Forget the caller: empty the cache, disconnect, reset the gate.
    pub fn teardown<B: Backend + Clone>(&mut self, client: &SyncClient<B>, gate: &mut AdminGate) {
        if let Some(identity) = self.identity.take() {
            info!(principal = %identity.principal, "session torn down");
        }
        client.cache().clear();
        client.disconnect();
        gate.on_connection(false);
        gate.on_logout();
        self.status = LoginStatus::LoggedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateState;
    use crate::memory::tests::backend_with_admin;
    use crate::memory::{Caller, Connection};
    use crate::query::QueryState;
    use crate::sync::keys;

    fn identity() -> Identity {
        Identity {
            principal: "github:1".to_string(),
            display_name: Some("Asha".to_string()),
        }
    }

    #[tokio::test]
    async fn test_initialize_then_teardown() {
        let (backend, admin) = backend_with_admin();
        let client: SyncClient<Connection> = SyncClient::new();
        let mut gate = AdminGate::new();
        let mut session = Session::new();
        assert_eq!(session.status(), LoginStatus::Initializing);

        session.initialize(Some(identity()), admin, &client, &mut gate);
        assert!(session.is_logged_in());
        assert_eq!(gate.state(), &GateState::CheckingAdmin);

        client.latest_notices(5).await;
        assert!(client.cache().status(&keys::latest_notices(5)).is_some());

        session.teardown(&client, &mut gate);
        assert_eq!(session.identity(), None);
        assert_eq!(session.status(), LoginStatus::LoggedOut);
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        assert!(!client.is_connected());
        assert_eq!(client.cache().status(&keys::latest_notices(5)), None);
        assert_eq!(client.latest_notices(5).await, QueryState::Idle);

        // Anonymous visitors still get a connection for public pages.
        session.initialize(None, backend.connect(Caller::Anonymous), &client, &mut gate);
        assert_eq!(session.status(), LoginStatus::LoggedOut);
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        assert!(client.is_connected());
    }

    #[test]
    fn test_identity_label() {
        assert_eq!(identity().label(), "Asha");
        let bare = Identity {
            principal: "google:5".to_string(),
            display_name: Some(" ".to_string()),
        };
        assert_eq!(bare.label(), "google:5");
    }
}
