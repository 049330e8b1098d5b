//! Public submission forms and the association's contact card.
//!
//! Submissions go through the sync client but invalidate nothing; the forms
//! only track their own submit status.

use std::collections::HashMap;
use std::sync::LazyLock;

use dioxus::prelude::*;
use regex::Regex;
use store::models::{
    ContactSubmission, Id, MembershipRegistration, MembershipType, PaymentSubmission, PaymentType,
};

use crate::client::{query_state, use_contact_info, use_site};
use crate::dates::today;
use crate::icons::{FaCircleCheck, FaEnvelope, FaLocationDot, FaPhone};
use crate::Icon;

#[derive(Clone, Debug, PartialEq)]
enum SubmitStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

type FieldErrors = HashMap<&'static str, &'static str>;

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, message: &'static str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex")
});

fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn email(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !looks_like_email(value) {
        errors.insert("email", "Invalid email address");
    }
}

#[component]
fn FieldError(errors: Signal<FieldErrors>, field: &'static str) -> Element {
    let message = errors.read().get(field).copied();
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", "{message}" }
        }
    }
}

#[component]
fn SubmitBanner(status: Signal<SubmitStatus>, success: &'static str, failure: &'static str) -> Element {
    match status() {
        SubmitStatus::Success => rsx! {
            div { class: "alert alert-success",
                Icon { icon: FaCircleCheck, width: 14, height: 14 }
                " {success}"
            }
        },
        SubmitStatus::Error => rsx! {
            div { class: "alert alert-error", "{failure}" }
        },
        SubmitStatus::Idle | SubmitStatus::Submitting => rsx! {},
    }
}

#[component]
pub fn ContactForm() -> Element {
    let site = use_site();
    let mut name = use_signal(String::new);
    let mut email_address = use_signal(String::new);
    let mut subject = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut status = use_signal(|| SubmitStatus::Idle);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let mut found = FieldErrors::new();
            required(&mut found, "name", &name(), "Name is required");
            email(&mut found, &email_address());
            required(&mut found, "subject", &subject(), "Subject is required");
            required(&mut found, "message", &message(), "Message is required");
            let valid = found.is_empty();
            errors.set(found);
            if !valid {
                return;
            }

            status.set(SubmitStatus::Submitting);
            let submission = ContactSubmission::with_subject(
                name().trim().to_string(),
                email_address().trim().to_string(),
                subject().trim(),
                message().trim(),
                today(),
            );
            match site.client.submit_contact(submission).await {
                Ok(id) => {
                    tracing::info!("Contact submission {} sent", id);
                    status.set(SubmitStatus::Success);
                    name.set(String::new());
                    email_address.set(String::new());
                    subject.set(String::new());
                    message.set(String::new());
                }
                Err(e) => {
                    tracing::error!("Contact submission failed: {}", e);
                    status.set(SubmitStatus::Error);
                }
            }
        }
    };

    rsx! {
        form { class: "form", onsubmit,
            SubmitBanner {
                status,
                success: "Your message has been sent successfully!",
                failure: "Failed to send message. Please try again.",
            }
            div { class: "field",
                label { r#for: "contact-name", "Name *" }
                input {
                    id: "contact-name",
                    placeholder: "Your name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                FieldError { errors, field: "name" }
            }
            div { class: "field",
                label { r#for: "contact-email", "Email *" }
                input {
                    id: "contact-email",
                    r#type: "email",
                    placeholder: "your.email@example.com",
                    value: email_address(),
                    oninput: move |evt: FormEvent| email_address.set(evt.value()),
                }
                FieldError { errors, field: "email" }
            }
            div { class: "field",
                label { r#for: "contact-subject", "Subject *" }
                input {
                    id: "contact-subject",
                    placeholder: "Message subject",
                    value: subject(),
                    oninput: move |evt: FormEvent| subject.set(evt.value()),
                }
                FieldError { errors, field: "subject" }
            }
            div { class: "field",
                label { r#for: "contact-message", "Message *" }
                textarea {
                    id: "contact-message",
                    rows: "5",
                    placeholder: "Your message or query",
                    value: message(),
                    oninput: move |evt: FormEvent| message.set(evt.value()),
                }
                FieldError { errors, field: "message" }
            }
            button {
                class: "btn btn-primary wide",
                r#type: "submit",
                disabled: status() == SubmitStatus::Submitting,
                if status() == SubmitStatus::Submitting { "Sending..." } else { "Send Message" }
            }
        }
    }
}

#[component]
pub fn MembershipForm() -> Element {
    let site = use_site();
    let mut name = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut email_address = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut membership_type = use_signal(|| MembershipType::Regular);
    let mut errors = use_signal(FieldErrors::new);
    let mut status = use_signal(|| SubmitStatus::Idle);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let mut found = FieldErrors::new();
            required(&mut found, "name", &name(), "Name is required");
            required(&mut found, "address", &address(), "Address is required");
            email(&mut found, &email_address());
            required(&mut found, "phone", &phone(), "Phone is required");
            let valid = found.is_empty();
            errors.set(found);
            if !valid {
                return;
            }

            status.set(SubmitStatus::Submitting);
            let registration = MembershipRegistration {
                name: name().trim().to_string(),
                address: address().trim().to_string(),
                email: email_address().trim().to_string(),
                phone: phone().trim().to_string(),
                membership_type: membership_type(),
            };
            match site.client.submit_membership(registration).await {
                Ok(id) => {
                    tracing::info!("Membership registration {} submitted", id);
                    status.set(SubmitStatus::Success);
                    name.set(String::new());
                    address.set(String::new());
                    email_address.set(String::new());
                    phone.set(String::new());
                    membership_type.set(MembershipType::Regular);
                }
                Err(e) => {
                    tracing::error!("Membership registration failed: {}", e);
                    status.set(SubmitStatus::Error);
                }
            }
        }
    };

    rsx! {
        form { class: "form", onsubmit,
            SubmitBanner {
                status,
                success: "Your membership registration has been submitted successfully!",
                failure: "Failed to submit registration. Please try again.",
            }
            div { class: "field",
                label { r#for: "member-name", "Full Name *" }
                input {
                    id: "member-name",
                    placeholder: "Enter your full name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                FieldError { errors, field: "name" }
            }
            div { class: "field",
                label { r#for: "member-address", "House/Flat Identifier *" }
                input {
                    id: "member-address",
                    placeholder: "e.g., House No. 123, Block A",
                    value: address(),
                    oninput: move |evt: FormEvent| address.set(evt.value()),
                }
                FieldError { errors, field: "address" }
            }
            div { class: "field",
                label { r#for: "member-email", "Email *" }
                input {
                    id: "member-email",
                    r#type: "email",
                    placeholder: "your.email@example.com",
                    value: email_address(),
                    oninput: move |evt: FormEvent| email_address.set(evt.value()),
                }
                FieldError { errors, field: "email" }
            }
            div { class: "field",
                label { r#for: "member-phone", "Phone *" }
                input {
                    id: "member-phone",
                    r#type: "tel",
                    placeholder: "+91 1234567890",
                    value: phone(),
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
                FieldError { errors, field: "phone" }
            }
            div { class: "field",
                label { r#for: "member-type", "Membership Type *" }
                select {
                    id: "member-type",
                    value: membership_type().key(),
                    onchange: move |evt: FormEvent| {
                        membership_type.set(MembershipType::from_key(&evt.value()))
                    },
                    for kind in MembershipType::ALL {
                        option { key: "{kind.key()}", value: kind.key(), "{kind.label()}" }
                    }
                }
            }
            button {
                class: "btn btn-primary wide",
                r#type: "submit",
                disabled: status() == SubmitStatus::Submitting,
                if status() == SubmitStatus::Submitting { "Submitting..." } else { "Submit Registration" }
            }
        }
    }
}

/// Parsed payment fields, or the per-field problems.
fn parse_payment(member_id: &str, amount: &str) -> Result<(Id, u64), FieldErrors> {
    let mut errors = FieldErrors::new();
    let member_id = member_id.trim().parse::<Id>();
    if member_id.is_err() {
        errors.insert("member_id", "Member ID must be a number");
    }
    let amount = amount.trim().parse::<u64>().ok().filter(|amount| *amount > 0);
    if amount.is_none() {
        errors.insert("amount", "Amount must be a whole number greater than zero");
    }
    match (member_id, amount) {
        (Ok(member_id), Some(amount)) => Ok((member_id, amount)),
        _ => Err(errors),
    }
}

/// Records a maintenance fee or welfare fund payment made offline.
#[component]
pub fn PaymentForm() -> Element {
    let site = use_site();
    let mut member_id = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut payment_type = use_signal(|| PaymentType::MaintenanceFee);
    let mut errors = use_signal(FieldErrors::new);
    let mut status = use_signal(|| SubmitStatus::Idle);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = site.clone();
        async move {
            let (id, rupees) = match parse_payment(&member_id(), &amount()) {
                Ok(parsed) => {
                    errors.set(FieldErrors::new());
                    parsed
                }
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };

            status.set(SubmitStatus::Submitting);
            let payment = PaymentSubmission {
                member_id: id,
                amount: rupees,
                payment_type: payment_type(),
                date: today(),
            };
            match site.client.submit_payment(payment).await {
                Ok(id) => {
                    tracing::info!("Payment {} recorded", id);
                    status.set(SubmitStatus::Success);
                    member_id.set(String::new());
                    amount.set(String::new());
                }
                Err(e) => {
                    tracing::error!("Payment submission failed: {}", e);
                    status.set(SubmitStatus::Error);
                }
            }
        }
    };

    rsx! {
        div { class: "payment-options",
            div {
                h3 { "Maintenance Fees" }
                p { class: "muted", "Monthly contributions towards the upkeep of roads, lighting and common areas." }
            }
            div {
                h3 { "Welfare Fund Contributions" }
                p { class: "muted", "Voluntary contributions supporting community welfare drives and events." }
            }
            p { class: "muted small", "Payment gateway integration coming soon. Record payments made at the office below." }
        }
        form { class: "form", onsubmit,
            SubmitBanner {
                status,
                success: "Your payment has been recorded successfully!",
                failure: "Failed to record payment. Please try again.",
            }
            div { class: "field",
                label { r#for: "payment-member", "Member ID *" }
                input {
                    id: "payment-member",
                    inputmode: "numeric",
                    placeholder: "Your membership number",
                    value: member_id(),
                    oninput: move |evt: FormEvent| member_id.set(evt.value()),
                }
                FieldError { errors, field: "member_id" }
            }
            div { class: "field",
                label { r#for: "payment-amount", "Amount (₹) *" }
                input {
                    id: "payment-amount",
                    inputmode: "numeric",
                    placeholder: "500",
                    value: amount(),
                    oninput: move |evt: FormEvent| amount.set(evt.value()),
                }
                FieldError { errors, field: "amount" }
            }
            div { class: "field",
                label { r#for: "payment-type", "Payment Type *" }
                select {
                    id: "payment-type",
                    value: payment_type().key(),
                    onchange: move |evt: FormEvent| payment_type.set(PaymentType::from_key(&evt.value())),
                    for kind in PaymentType::ALL {
                        option { key: "{kind.key()}", value: kind.key(), "{kind.label()}" }
                    }
                }
            }
            button {
                class: "btn btn-primary wide",
                r#type: "submit",
                disabled: status() == SubmitStatus::Submitting,
                if status() == SubmitStatus::Submitting { "Recording..." } else { "Record Payment" }
            }
        }
    }
}

/// Office address, phone and email, with placeholders until configured.
#[component]
pub fn ContactDetails() -> Element {
    let contact = use_contact_info();
    let info = query_state(&contact).data().cloned();

    let non_empty = |value: Option<String>, fallback: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };
    let address = non_empty(
        info.as_ref().map(|i| i.address.clone()),
        "New City Regency Layout (Madhu Reddy Layout), [Local Address]",
    );
    let phone = non_empty(info.as_ref().map(|i| i.phone.clone()), "[Number]");
    let email = non_empty(info.as_ref().map(|i| i.email.clone()), "[Email Address]");

    rsx! {
        ul { class: "contact-details",
            li {
                Icon { icon: FaLocationDot, width: 16, height: 16 }
                div {
                    p { class: "strong", "Address" }
                    p { class: "muted", "{address}" }
                }
            }
            li {
                Icon { icon: FaPhone, width: 16, height: 16 }
                div {
                    p { class: "strong", "Phone" }
                    p { class: "muted", "{phone}" }
                }
            }
            li {
                Icon { icon: FaEnvelope, width: 16, height: 16 }
                div {
                    p { class: "strong", "Email" }
                    p { class: "muted", "{email}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("asha@example.org"));
        assert!(looks_like_email(" ravi.k+rwa@mail.co.in "));
        assert!(!looks_like_email("asha@example"));
        assert!(!looks_like_email("@example.org"));
        assert!(!looks_like_email("asha@@example.org"));
        assert!(!looks_like_email("asha@example.c0m"));
        assert!(!looks_like_email("a b@example.com"));
        assert!(!looks_like_email("asha@exa mple.com"));
        assert!(looks_like_email("ASHA@EXAMPLE.ORG"));
    }

    #[test]
    fn test_required_fields() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", "  ", "Name is required");
        email(&mut errors, "");
        assert_eq!(errors.get("name"), Some(&"Name is required"));
        assert_eq!(errors.get("email"), Some(&"Email is required"));

        let mut errors = FieldErrors::new();
        email(&mut errors, "not-an-email");
        assert_eq!(errors.get("email"), Some(&"Invalid email address"));
    }

    #[test]
    fn test_parse_payment() {
        assert_eq!(parse_payment(" 12 ", "500"), Ok((12, 500)));

        let errors = parse_payment("abc", "0").unwrap_err();
        assert!(errors.contains_key("member_id"));
        assert!(errors.contains_key("amount"));

        let errors = parse_payment("7", "12.50").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("amount"));
    }
}
