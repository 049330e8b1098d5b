//! # Backend error normalization
//!
//! The backend reports failures as free-form text. [`normalize`] turns that
//! text into a [`NormalizedError`]: a taxonomy [`ErrorKind`] plus a message fit
//! for showing to a resident or admin.
//!
//! Classification is substring based and order sensitive; the first matching
//! rule wins:
//!
//! 1. `Unauthorized` / `Only admins` → [`ErrorKind::AuthorizationDenied`]
//! 2. `trap` / `Trap` → [`ErrorKind::BackendTrap`], keeping the text after a
//!    case-insensitive `trap:` when there is any
//! 3. `does not exist` → [`ErrorKind::NotFound`]
//! 4. `Actor not` → [`ErrorKind::ConnectionNotReady`]
//! 5. anything else → [`ErrorKind::Unclassified`], message passed through
//!
//! Changing backend wording can break these matches. A structured error from
//! the backend would make this exact; until then the heuristic is kept as is.

use thiserror::Error;

pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied: You do not have permission to perform this action";
pub const BACKEND_FAILURE_MESSAGE: &str = "Operation failed due to a backend error";
pub const NOT_FOUND_MESSAGE: &str = "The requested item does not exist";
pub const CONNECTION_MESSAGE: &str = "Backend connection not available. Please try again.";
pub const UNKNOWN_MESSAGE: &str = "An unknown error occurred";

/// Raw message a disconnected client reports before any remote call.
pub const ACTOR_NOT_AVAILABLE: &str = "Actor not available";

/// A failure reported by the remote backend, message untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A remote-side failure with a reason, in the `trap: <reason>` shape.
    pub fn trap(reason: impl AsRef<str>) -> Self {
        Self::new(format!("trap: {}", reason.as_ref()))
    }

    pub fn unauthorized(action: &str) -> Self {
        Self::new(format!("Unauthorized: Only admins can {action}"))
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(format!("{resource} does not exist"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Client-observable error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    ConnectionNotReady,
    AuthorizationDenied,
    NotFound,
    BackendTrap,
    Unclassified,
}

/// A classified error carrying the message to present.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl NormalizedError {
    pub fn connection_not_ready() -> Self {
        normalize(ACTOR_NOT_AVAILABLE)
    }
}

impl From<RemoteError> for NormalizedError {
    fn from(err: RemoteError) -> Self {
        normalize(err.message())
    }
}

/// Classify a raw backend message.
pub fn normalize(raw: &str) -> NormalizedError {
    let (kind, message) = classify(raw);
    NormalizedError { kind, message }
}

/// Message-only form of [`normalize`].
pub fn normalize_backend_error(raw: &str) -> String {
    normalize(raw).message
}

fn classify(raw: &str) -> (ErrorKind, String) {
    if raw.is_empty() {
        return (ErrorKind::Unclassified, UNKNOWN_MESSAGE.to_string());
    }
    if raw.contains("Unauthorized") || raw.contains("Only admins") {
        return (ErrorKind::AuthorizationDenied, ACCESS_DENIED_MESSAGE.to_string());
    }
    if raw.contains("trap") || raw.contains("Trap") {
        let message = extract_trap_reason(raw)
            .map(str::to_string)
            .unwrap_or_else(|| BACKEND_FAILURE_MESSAGE.to_string());
        return (ErrorKind::BackendTrap, message);
    }
    if raw.contains("does not exist") {
        return (ErrorKind::NotFound, NOT_FOUND_MESSAGE.to_string());
    }
    if raw.contains("Actor not") {
        return (ErrorKind::ConnectionNotReady, CONNECTION_MESSAGE.to_string());
    }
    (ErrorKind::Unclassified, raw.to_string())
}

/// Text after the first `trap:` (any case) that is followed by a non-empty line.
fn extract_trap_reason(raw: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lower = raw.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find("trap:") {
        let start = from + pos + "trap:".len();
        let rest = raw[start..].trim_start();
        let line = rest.split(['\n', '\r']).next().unwrap_or_default();
        if !line.is_empty() {
            return Some(line);
        }
        from = start;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_markers() {
        assert_eq!(
            normalize_backend_error("Unauthorized: Only admins can create notices"),
            ACCESS_DENIED_MESSAGE
        );
        assert_eq!(
            normalize_backend_error("Reject text: Only admins may do that"),
            ACCESS_DENIED_MESSAGE
        );
        // Authorization wins over trap.
        let err = normalize("trap: Unauthorized");
        assert_eq!(err.kind, ErrorKind::AuthorizationDenied);
    }

    #[test]
    fn test_trap_extraction() {
        assert_eq!(normalize_backend_error("trap: disk full"), "disk full");
        assert_eq!(
            normalize_backend_error("Canister trapped explicitly. TRAP:   title is empty"),
            "title is empty"
        );
        assert_eq!(
            normalize_backend_error("Canister trapped"),
            BACKEND_FAILURE_MESSAGE
        );
        assert_eq!(normalize("trap:   ").kind, ErrorKind::BackendTrap);
        assert_eq!(normalize_backend_error("trap:   "), BACKEND_FAILURE_MESSAGE);
    }

    #[test]
    fn test_trap_reason_stops_at_line_end() {
        assert_eq!(
            normalize_backend_error("trap: quota exceeded\nstack: ..."),
            "quota exceeded"
        );
    }

    #[test]
    fn test_not_found_and_connection() {
        let err = normalize("Notice does not exist");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, NOT_FOUND_MESSAGE);

        let err = NormalizedError::connection_not_ready();
        assert_eq!(err.kind, ErrorKind::ConnectionNotReady);
        assert_eq!(err.message, CONNECTION_MESSAGE);
    }

    #[test]
    fn test_passthrough() {
        let err = normalize("connection reset");
        assert_eq!(err.kind, ErrorKind::Unclassified);
        assert_eq!(err.message, "connection reset");
        assert_eq!(normalize_backend_error(""), UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_remote_error_constructors_classify() {
        assert_eq!(
            NormalizedError::from(RemoteError::unauthorized("delete events")).kind,
            ErrorKind::AuthorizationDenied
        );
        assert_eq!(
            NormalizedError::from(RemoteError::trap("Title must not be empty")).message,
            "Title must not be empty"
        );
        assert_eq!(
            NormalizedError::from(RemoteError::not_found("Gallery item")).kind,
            ErrorKind::NotFound
        );
    }
}
