//! Record storage.
//!
//! The [`Storage`] trait is the seam between the intake layer and whatever
//! keeps the records. The only backend is [`MemStorage`], which lives for the
//! lifetime of the process.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use homefix_common::{ContactMessage, NewContactMessage, NewWaitlistEntry, WaitlistEntry};

pub use memory::{Collection, IdSources, MemStorage};

/// Storage-level failures. Content is never rejected here.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Every generated identifier collided with a stored one
    #[error("Could not allocate a unique id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

/// Insert / list / count for both entity types
#[async_trait]
pub trait Storage: Send + Sync {
    /// Assign id and creation time, store, and return the full record
    async fn create_waitlist_entry(
        &self,
        entry: NewWaitlistEntry,
    ) -> Result<WaitlistEntry, StorageError>;

    /// All waitlist entries, newest first
    async fn waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StorageError>;

    async fn waitlist_count(&self) -> Result<usize, StorageError>;

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StorageError>;

    /// All contact messages, newest first
    async fn contact_messages(&self) -> Result<Vec<ContactMessage>, StorageError>;
}
