//! # Domain models exchanged with the association backend
//!
//! Every type here is `Serialize + Deserialize` so it can cross the
//! server/client boundary via Dioxus server functions unchanged.
//!
//! ## Records
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Notice`] | An announcement in one of the fixed [`NoticeCategory`] buckets. |
//! | [`Event`] | A community event; `is_past` is set by the admin, never derived from the date. |
//! | [`GalleryItem`] | A photo reference (URL or `data:image/` URL) with a caption. |
//! | [`UserProfile`] | The caller's own name and email. |
//! | [`ContactInfo`] | The association's published address, phone and email. |
//!
//! ## Drafts
//!
//! Mutations take the complete field set of the remote operation as a draft
//! struct ([`NoticeDraft`], [`EventDraft`], [`GalleryDraft`],
//! [`ContactSubmission`], [`MembershipRegistration`], [`PaymentSubmission`]).
//! Identifiers are never part of a draft: they are always assigned remotely.
//!
//! ## Labels
//!
//! Each wire enum carries an `Unknown` variant (`#[serde(other)]`) so a value
//! added on the server still deserializes; its label is the generic fallback.

use serde::{Deserialize, Serialize};

/// Remote-assigned identifier. Monotonic per resource.
pub type Id = u64;

/// Notice bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeCategory {
    WaterSupply,
    CivicIssues,
    Meetings,
    General,
    #[serde(other)]
    Unknown,
}

impl NoticeCategory {
    /// The categories an admin can publish to, in tab order.
    pub const ALL: [NoticeCategory; 4] = [
        NoticeCategory::WaterSupply,
        NoticeCategory::CivicIssues,
        NoticeCategory::Meetings,
        NoticeCategory::General,
    ];

    /// Long display label.
    pub fn label(self) -> &'static str {
        match self {
            NoticeCategory::WaterSupply => "Water Supply Schedules and Updates",
            NoticeCategory::CivicIssues => "Civic Issues and Resolutions",
            NoticeCategory::Meetings => "Association Meeting Minutes",
            NoticeCategory::General => "Important Notices for Residents",
            NoticeCategory::Unknown => "General",
        }
    }

    /// Short label used for tabs and selects.
    pub fn short_label(self) -> &'static str {
        match self {
            NoticeCategory::WaterSupply => "Water Supply",
            NoticeCategory::CivicIssues => "Civic Issues",
            NoticeCategory::Meetings => "Meetings",
            NoticeCategory::General | NoticeCategory::Unknown => "General",
        }
    }

    /// Stable key used in cache keys and form values.
    pub fn key(self) -> &'static str {
        match self {
            NoticeCategory::WaterSupply => "waterSupply",
            NoticeCategory::CivicIssues => "civicIssues",
            NoticeCategory::Meetings => "meetings",
            NoticeCategory::General => "general",
            NoticeCategory::Unknown => "unknown",
        }
    }

    /// Inverse of [`key`](Self::key). Unrecognized keys map to `Unknown`.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .unwrap_or(NoticeCategory::Unknown)
    }
}

/// Kind of community event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    CulturalProgram,
    AssociationMeeting,
    WelfareDrive,
    #[serde(other)]
    Unknown,
}

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::AssociationMeeting,
        EventType::CulturalProgram,
        EventType::WelfareDrive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::AssociationMeeting => "Monthly Association Meeting",
            EventType::CulturalProgram => "Cultural Programs and Festivals",
            EventType::WelfareDrive => "Welfare Drives and Community Service",
            EventType::Unknown => "Event",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            EventType::CulturalProgram => "culturalProgram",
            EventType::AssociationMeeting => "associationMeeting",
            EventType::WelfareDrive => "welfareDrive",
            EventType::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .unwrap_or(EventType::Unknown)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MembershipType {
    Regular,
    Premium,
    #[serde(other)]
    Unknown,
}

impl MembershipType {
    pub const ALL: [MembershipType; 2] = [MembershipType::Regular, MembershipType::Premium];

    pub fn label(self) -> &'static str {
        match self {
            MembershipType::Regular => "Regular Membership",
            MembershipType::Premium => "Premium Membership",
            MembershipType::Unknown => "Membership",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MembershipType::Regular => "regular",
            MembershipType::Premium => "premium",
            MembershipType::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .unwrap_or(MembershipType::Unknown)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentType {
    MaintenanceFee,
    WelfareFund,
    #[serde(other)]
    Unknown,
}

impl PaymentType {
    pub const ALL: [PaymentType; 2] = [PaymentType::MaintenanceFee, PaymentType::WelfareFund];

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::MaintenanceFee => "Maintenance Fee",
            PaymentType::WelfareFund => "Welfare Fund Contribution",
            PaymentType::Unknown => "Payment",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PaymentType::MaintenanceFee => "maintenanceFee",
            PaymentType::WelfareFund => "welfareFund",
            PaymentType::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .unwrap_or(PaymentType::Unknown)
    }
}

/// Server-determined authorization level of a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "Member",
            Role::Guest => "Guest",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Id,
    pub title: String,
    pub content: String,
    /// Display date as entered by the admin, e.g. "2024-06-01".
    pub date: String,
    /// Creation time in milliseconds; used only for recency ordering.
    pub timestamp: i64,
    pub category: NoticeCategory,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_past: bool,
    pub timestamp: i64,
    pub event_type: EventType,
}

impl Event {
    pub fn status_label(&self) -> &'static str {
        if self.is_past {
            "Past"
        } else {
            "Upcoming"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: Id,
    pub title: String,
    pub description: String,
    /// `http(s)://`, site-relative `/...` or `data:image/...` reference.
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Trimmed copy, as saved.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }

    /// Required-field check shared by the profile form and the backend.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Please enter a valid email");
        }
        Ok(())
    }

    /// A profile lacking an email still prompts for completion.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub category: NoticeCategory,
    pub title: String,
    pub content: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub event_type: EventType,
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_past: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryDraft {
    pub title: String,
    pub image_url: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}

impl ContactSubmission {
    /// Folds a subject line into the message body the way the contact form sends it.
    pub fn with_subject(name: String, email: String, subject: &str, body: &str, date: String) -> Self {
        Self {
            name,
            email,
            message: format!("Subject: {subject}\n\n{body}"),
            date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipRegistration {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub membership_type: MembershipType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub member_id: Id,
    pub amount: u64,
    pub payment_type: PaymentType,
    pub date: String,
}

/// Sort notices most recent first.
pub fn sort_by_recency(notices: &mut [Notice]) {
    notices.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_total() {
        assert_eq!(NoticeCategory::WaterSupply.label(), "Water Supply Schedules and Updates");
        assert_eq!(NoticeCategory::General.label(), "Important Notices for Residents");
        assert_eq!(NoticeCategory::Unknown.label(), "General");
        assert_eq!(EventType::WelfareDrive.label(), "Welfare Drives and Community Service");
        assert_eq!(EventType::Unknown.label(), "Event");
    }

    #[test]
    fn test_unknown_wire_value_deserializes() {
        let category: NoticeCategory = serde_json::from_str("\"parking\"").unwrap();
        assert_eq!(category, NoticeCategory::Unknown);
        assert_eq!(category.label(), "General");

        let known: EventType = serde_json::from_str("\"culturalProgram\"").unwrap();
        assert_eq!(known, EventType::CulturalProgram);
    }

    #[test]
    fn test_key_roundtrip() {
        for category in NoticeCategory::ALL {
            assert_eq!(NoticeCategory::from_key(category.key()), category);
        }
        assert_eq!(EventType::from_key("nope"), EventType::Unknown);
        assert_eq!(MembershipType::from_key("premium"), MembershipType::Premium);
        assert_eq!(PaymentType::from_key("welfareFund"), PaymentType::WelfareFund);
    }

    #[test]
    fn test_profile_validation() {
        let profile = UserProfile {
            name: "  Asha ".to_string(),
            email: " asha@example.org ".to_string(),
        };
        assert!(profile.validate().is_ok());
        assert_eq!(profile.normalized().name, "Asha");

        let missing_email = UserProfile {
            name: "Asha".to_string(),
            email: "   ".to_string(),
        };
        assert_eq!(missing_email.validate(), Err("Please enter a valid email"));
        assert!(!missing_email.is_complete());
    }

    #[test]
    fn test_sort_by_recency() {
        let mut notices = vec![
            Notice {
                id: 1,
                title: "old".to_string(),
                content: String::new(),
                date: String::new(),
                timestamp: 100,
                category: NoticeCategory::General,
            },
            Notice {
                id: 2,
                title: "new".to_string(),
                content: String::new(),
                date: String::new(),
                timestamp: 200,
                category: NoticeCategory::General,
            },
        ];
        sort_by_recency(&mut notices);
        assert_eq!(notices[0].title, "new");
    }
}
