//! # Admin gate
//!
//! Decides what the admin dashboard may show. The gate starts
//! [`GateState::Unauthenticated`] and begins an admin check once the caller
//! is signed in *and* the backend connection is ready, in either order.
//!
//! ```text
//! Unauthenticated ──login + connection──▶ CheckingAdmin
//! CheckingAdmin ──Ok(true)──▶ Admin
//! CheckingAdmin ──Ok(false)─▶ NonAdmin
//! CheckingAdmin ──Err───────▶ AdminError ──retry──▶ CheckingAdmin
//! Admin | NonAdmin | AdminError ──recheck──▶ CheckingAdmin
//! any ──logout──▶ Unauthenticated
//! ```
//!
//! A check result arriving when the gate is no longer checking (say, after
//! logout) is dropped. Admin status only ever comes from the backend's
//! is-admin answer.

use crate::backend::Backend;
use crate::errors::{NormalizedError, RemoteError, ACTOR_NOT_AVAILABLE};
use crate::models::UserProfile;
use crate::query::QueryState;
use crate::sync::SyncClient;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    CheckingAdmin,
    /// The check itself failed; carries the normalized message.
    AdminError(String),
    NonAdmin,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminGate {
    authenticated: bool,
    connected: bool,
    state: GateState,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminGate {
    pub fn new() -> Self {
        Self {
            authenticated: false,
            connected: false,
            state: GateState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// True while a check should be running.
    pub fn is_checking(&self) -> bool {
        self.state == GateState::CheckingAdmin
    }

    pub fn on_login(&mut self) {
        self.authenticated = true;
        self.start_if_ready();
    }

    pub fn on_connection(&mut self, ready: bool) {
        self.connected = ready;
        self.start_if_ready();
    }

    pub fn on_logout(&mut self) {
        self.authenticated = false;
        self.state = GateState::Unauthenticated;
    }

    pub fn on_admin_check(&mut self, result: Result<bool, RemoteError>) {
        if !self.is_checking() {
            return;
        }
        self.state = match result {
            Ok(true) => GateState::Admin,
            Ok(false) => GateState::NonAdmin,
            Err(err) => GateState::AdminError(NormalizedError::from(err).message),
        };
    }

    /// User-initiated retry after a failed check.
    pub fn retry(&mut self) {
        if matches!(self.state, GateState::AdminError(_)) {
            self.state = GateState::CheckingAdmin;
        }
    }

    /// Re-run the check from any resolved state, e.g. after a profile save.
    pub fn recheck(&mut self) {
        if matches!(
            self.state,
            GateState::Admin | GateState::NonAdmin | GateState::AdminError(_)
        ) {
            self.state = GateState::CheckingAdmin;
        }
    }

    fn start_if_ready(&mut self) {
        if self.authenticated && self.connected && self.state == GateState::Unauthenticated {
            self.state = GateState::CheckingAdmin;
        }
    }
}

/// Ask the backend whether the caller is an admin, through the cache.
pub async fn check_admin<B: Backend + Clone>(client: &SyncClient<B>) -> Result<bool, RemoteError> {
    match client.is_caller_admin().await {
        QueryState::Success(is_admin) => Ok(is_admin),
        QueryState::Error(err) => Err(err),
        QueryState::Idle | QueryState::Loading => Err(RemoteError::new(ACTOR_NOT_AVAILABLE)),
    }
}

/// Whether to prompt a signed-in caller for their name and email.
pub fn needs_profile_completion(
    authenticated: bool,
    profile: &QueryState<Option<UserProfile>>,
) -> bool {
    if !authenticated {
        return false;
    }
    match profile {
        QueryState::Success(None) => true,
        QueryState::Success(Some(profile)) => !profile.is_complete(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ACCESS_DENIED_MESSAGE;
    use crate::memory::tests::backend_with_admin;
    use crate::memory::{Caller, Connection};

    #[test]
    fn test_check_starts_after_login_and_connection_in_either_order() {
        let mut gate = AdminGate::new();
        gate.on_login();
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        gate.on_connection(true);
        assert_eq!(gate.state(), &GateState::CheckingAdmin);

        let mut gate = AdminGate::new();
        gate.on_connection(true);
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        gate.on_login();
        assert!(gate.is_checking());
    }

    #[test]
    fn test_check_outcomes() {
        let mut gate = AdminGate::new();
        gate.on_connection(true);
        gate.on_login();
        gate.on_admin_check(Ok(false));
        assert_eq!(gate.state(), &GateState::NonAdmin);

        gate.recheck();
        gate.on_admin_check(Ok(true));
        assert_eq!(gate.state(), &GateState::Admin);

        gate.recheck();
        gate.on_admin_check(Err(RemoteError::unauthorized("check roles")));
        assert_eq!(
            gate.state(),
            &GateState::AdminError(ACCESS_DENIED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_retry_only_from_error() {
        let mut gate = AdminGate::new();
        gate.on_connection(true);
        gate.on_login();
        gate.on_admin_check(Ok(false));
        gate.retry();
        assert_eq!(gate.state(), &GateState::NonAdmin);

        gate.recheck();
        gate.on_admin_check(Err(RemoteError::new("network down")));
        gate.retry();
        assert!(gate.is_checking());
    }

    #[test]
    fn test_logout_resets_and_drops_late_results() {
        let mut gate = AdminGate::new();
        gate.on_connection(true);
        gate.on_login();
        gate.on_logout();
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        gate.on_admin_check(Ok(true));
        assert_eq!(gate.state(), &GateState::Unauthenticated);

        // Logging back in starts a new check on the still-open connection.
        gate.on_login();
        assert!(gate.is_checking());
    }

    #[test]
    fn test_profile_prompt() {
        let blank = UserProfile {
            name: "Ravi".to_string(),
            email: " ".to_string(),
        };
        assert!(needs_profile_completion(true, &QueryState::Success(None)));
        assert!(needs_profile_completion(true, &QueryState::Success(Some(blank))));
        assert!(!needs_profile_completion(false, &QueryState::Success(None)));
        assert!(!needs_profile_completion(true, &QueryState::Loading));
        assert!(!needs_profile_completion(
            true,
            &QueryState::Error(RemoteError::new("boom"))
        ));
    }

    #[tokio::test]
    async fn test_check_admin_against_backend() {
        let (backend, admin) = backend_with_admin();
        let client: SyncClient<Connection> = SyncClient::new();
        assert_eq!(
            check_admin(&client).await,
            Err(RemoteError::new(ACTOR_NOT_AVAILABLE))
        );

        client.connect(admin);
        assert_eq!(check_admin(&client).await, Ok(false));
        client
            .initialize_bootstrap_token("let-me-in".to_string())
            .await
            .unwrap();
        assert_eq!(check_admin(&client).await, Ok(true));

        client.connect(backend.connect(Caller::Anonymous));
        client.cache().clear();
        assert_eq!(check_admin(&client).await, Ok(false));
    }
}
