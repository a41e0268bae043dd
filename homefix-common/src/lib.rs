//! Shared types for the HomeFix intake API.
//!
//! This crate contains the records exchanged between:
//! - the landing page forms (waitlist signup, contact form)
//! - homefix-server (the backend that validates and stores them)
//!
//! Any changes to the wire format should be made here.

pub mod schema;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use schema::{
    parse_contact_message, parse_waitlist_entry, validate, FieldIssue, FieldKind, FieldSpec,
    Schema, ValidationError, CONTACT_MESSAGE_SCHEMA, WAITLIST_ENTRY_SCHEMA,
};

/// Service categories offered on the waitlist form
pub const SERVICE_OPTIONS: &[&str] = &[
    "Computer & Laptop Help",
    "Smart Home Setup",
    "Wi-Fi & Network Help",
    "Phone & Tablet Support",
    "Home Entertainment Setup",
    "Data Backup & Recovery",
];

/// `preferredContact` values the waitlist form submits.
///
/// The server stores the field as free text; "Text" is shown as "Text Message".
pub const CONTACT_METHODS: &[&str] = &["Email", "Phone", "Text"];

/// Budget brackets offered on the waitlist form (free text server-side)
pub const BUDGET_RANGES: &[&str] = &[
    "Under $500",
    "$500 - $1,000",
    "$1,000 - $2,500",
    "$2,500 - $5,000",
    "$5,000+",
];

/// Waitlist signup as submitted, before the store assigns identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWaitlistEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    /// Requested service categories, in the order they were picked
    pub services: Vec<String>,

    pub preferred_contact: String,
    pub budget_range: String,

    #[serde(default)]
    pub additional_details: Option<String>,
}

impl NewWaitlistEntry {
    /// Attach identity and creation time, producing the stored record
    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> WaitlistEntry {
        WaitlistEntry {
            id: id.to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            services: self.services,
            preferred_contact: self.preferred_contact,
            budget_range: self.budget_range,
            additional_details: self.additional_details,
            created_at,
        }
    }
}

/// A stored waitlist signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    /// Unique entry ID (UUID v4)
    pub id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub services: Vec<String>,
    pub preferred_contact: String,
    pub budget_range: String,
    pub additional_details: Option<String>,

    /// When the store accepted the entry
    pub created_at: DateTime<Utc>,
}

/// Contact form message as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub subject: Option<String>,

    pub message: String,
}

impl NewContactMessage {
    /// Attach identity and creation time, producing the stored record
    pub fn into_message(self, id: Uuid, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id: id.to_string(),
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            created_at,
        }
    }
}

/// A stored contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Records that carry a store-assigned creation time
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Timestamped for WaitlistEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timestamped for ContactMessage {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
