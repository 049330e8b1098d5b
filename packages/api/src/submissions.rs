//! Contact, membership and payment server functions. Open to every caller.

use dioxus::prelude::*;
use store::models::{ContactInfo, ContactSubmission, Id, MembershipRegistration, PaymentSubmission};

#[cfg(feature = "server")]
use crate::backend::call;
#[cfg(feature = "server")]
use store::Backend;

#[cfg(feature = "server")]
#[post("/api/contact", session: tower_sessions::Session)]
pub async fn submit_contact(submission: ContactSubmission) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.submit_contact(submission).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/contact")]
pub async fn submit_contact(submission: ContactSubmission) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/contact/info", session: tower_sessions::Session)]
pub async fn contact_info() -> Result<ContactInfo, ServerFnError> {
    call(&session, |c| async move { c.contact_info().await }).await
}

#[cfg(not(feature = "server"))]
#[get("/api/contact/info")]
pub async fn contact_info() -> Result<ContactInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/membership", session: tower_sessions::Session)]
pub async fn submit_membership(registration: MembershipRegistration) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.submit_membership(registration).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/membership")]
pub async fn submit_membership(registration: MembershipRegistration) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/payments", session: tower_sessions::Session)]
pub async fn submit_payment(payment: PaymentSubmission) -> Result<Id, ServerFnError> {
    call(&session, |c| async move { c.submit_payment(payment).await }).await
}

#[cfg(not(feature = "server"))]
#[post("/api/payments")]
pub async fn submit_payment(payment: PaymentSubmission) -> Result<Id, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
