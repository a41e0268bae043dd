//! Intake service: validate a submission, then record it.
//!
//! Validation runs to completion before the store is touched, so a failed
//! submission never leaves a partial record behind.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use homefix_common::{
    parse_contact_message, parse_waitlist_entry, ContactMessage, NewWaitlistEntry,
    ValidationError, WaitlistEntry,
};

use crate::storage::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum IntakeError {
    /// Caller sent a missing or malformed field
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Anything else; reported to callers without detail
    #[error("Unexpected failure: {0}")]
    Unexpected(#[from] StorageError),
}

/// Business rules applied on top of the shape check
#[derive(Debug, Clone, Copy)]
pub struct IntakePolicy {
    /// Reject waitlist entries with an empty `services` list
    pub require_service: bool,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            require_service: true,
        }
    }
}

impl IntakePolicy {
    fn check_waitlist_entry(&self, entry: &NewWaitlistEntry) -> Result<(), ValidationError> {
        if self.require_service && entry.services.is_empty() {
            return Err(ValidationError::single(
                "services",
                "Please select at least one service",
            ));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct IntakeService {
    storage: Arc<dyn Storage>,
    policy: IntakePolicy,
}

impl IntakeService {
    pub fn new(storage: Arc<dyn Storage>, policy: IntakePolicy) -> Self {
        Self { storage, policy }
    }

    pub async fn submit_waitlist_entry(&self, raw: &Value) -> Result<WaitlistEntry, IntakeError> {
        let entry = parse_waitlist_entry(raw)?;
        self.policy.check_waitlist_entry(&entry)?;

        let stored = self.storage.create_waitlist_entry(entry).await?;
        info!(
            id = %stored.id,
            services = stored.services.len(),
            "Waitlist entry recorded"
        );
        Ok(stored)
    }

    pub async fn submit_contact_message(&self, raw: &Value) -> Result<ContactMessage, IntakeError> {
        let message = parse_contact_message(raw)?;

        let stored = self.storage.create_contact_message(message).await?;
        info!(id = %stored.id, "Contact message recorded");
        Ok(stored)
    }

    pub async fn waitlist_count(&self) -> Result<usize, IntakeError> {
        let count = self.storage.waitlist_count().await?;
        debug!("Waitlist count: {}", count);
        Ok(count)
    }

    /// Not routed; kept for administrative tooling
    pub async fn list_waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, IntakeError> {
        Ok(self.storage.waitlist_entries().await?)
    }

    /// Not routed; kept for administrative tooling
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, IntakeError> {
        Ok(self.storage.contact_messages().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use serde_json::json;

    fn service(policy: IntakePolicy) -> IntakeService {
        IntakeService::new(Arc::new(MemStorage::new()), policy)
    }

    fn waitlist_body() -> Value {
        json!({
            "firstName": "Ann",
            "lastName": "Lee",
            "email": "a@example.com",
            "services": ["Wi-Fi Help"],
            "preferredContact": "Email",
            "budgetRange": "Under $500"
        })
    }

    #[tokio::test]
    async fn test_submit_waitlist_entry() {
        let intake = service(IntakePolicy::default());

        let entry = intake.submit_waitlist_entry(&waitlist_body()).await.unwrap();
        assert!(!entry.id.is_empty());
        assert_eq!(entry.email, "a@example.com");
        assert_eq!(intake.waitlist_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_identity_fields_leave_store_unchanged() {
        let intake = service(IntakePolicy::default());
        intake.submit_waitlist_entry(&waitlist_body()).await.unwrap();

        for field in ["firstName", "lastName", "email"] {
            let mut body = waitlist_body();
            body.as_object_mut().unwrap().remove(field);

            let err = intake.submit_waitlist_entry(&body).await.unwrap_err();
            match err {
                IntakeError::Validation(e) => assert!(e.mentions(field)),
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        assert_eq!(intake.waitlist_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_services_rejected_by_default() {
        let intake = service(IntakePolicy::default());
        let mut body = waitlist_body();
        body["services"] = json!([]);

        let err = intake.submit_waitlist_entry(&body).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation(ref e) if e.mentions("services")));
        assert_eq!(intake.waitlist_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_services_allowed_when_policy_off() {
        let intake = service(IntakePolicy {
            require_service: false,
        });
        let mut body = waitlist_body();
        body["services"] = json!([]);

        let entry = intake.submit_waitlist_entry(&body).await.unwrap();
        assert!(entry.services.is_empty());
    }

    #[tokio::test]
    async fn test_free_text_choices_are_accepted() {
        let intake = service(IntakePolicy::default());
        let mut body = waitlist_body();
        body["preferredContact"] = json!("Carrier pigeon");
        body["budgetRange"] = json!("Whatever it takes");

        let entry = intake.submit_waitlist_entry(&body).await.unwrap();
        assert_eq!(entry.preferred_contact, "Carrier pigeon");
    }

    #[tokio::test]
    async fn test_listing_returns_newest_first() {
        let intake = service(IntakePolicy::default());
        let first = intake
            .submit_contact_message(&json!({"name": "A", "email": "a@x.io", "message": "one"}))
            .await
            .unwrap();
        let second = intake
            .submit_contact_message(&json!({"name": "B", "email": "b@x.io", "message": "two"}))
            .await
            .unwrap();

        let listed = intake.list_contact_messages().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert!(intake.list_waitlist_entries().await.unwrap().is_empty());
    }
}
