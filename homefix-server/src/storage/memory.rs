//! In-memory storage backend.
//!
//! Each entity type gets its own [`Collection`]: a map keyed by id behind a
//! `tokio::sync::RwLock`. Inserts take the write lock for the whole
//! allocate-stamp-store sequence, so concurrent submissions can neither
//! overwrite each other nor share an id. Lists and counts take the read lock
//! and see a consistent snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use homefix_common::{
    ContactMessage, NewContactMessage, NewWaitlistEntry, Timestamped, WaitlistEntry,
};

use super::{Storage, StorageError};

/// Fresh ids tried per insert before giving up
pub const MAX_ID_ATTEMPTS: usize = 4;

/// Where a collection gets identifiers and the current time
#[derive(Debug, Clone, Copy)]
pub struct IdSources {
    pub id: fn() -> Uuid,
    pub clock: fn() -> DateTime<Utc>,
}

impl Default for IdSources {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4,
            clock: Utc::now,
        }
    }
}

struct Slot<T> {
    /// Insertion order, breaks `created_at` ties when listing
    seq: u64,
    record: T,
}

struct Inner<T> {
    records: HashMap<String, Slot<T>>,
    next_seq: u64,
    last_issued: Option<DateTime<Utc>>,
}

impl<T> Inner<T> {
    fn allocate_id(&self, source: fn() -> Uuid) -> Result<Uuid, StorageError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = source();
            if !self.records.contains_key(&id.to_string()) {
                return Ok(id);
            }
            warn!("Generated id {} already in use, retrying", id);
        }
        Err(StorageError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Current time, held at the last issued stamp if the clock stepped back
    fn stamp(&mut self, clock: fn() -> DateTime<Utc>) -> DateTime<Utc> {
        let now = clock();
        let created_at = match self.last_issued {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_issued = Some(created_at);
        created_at
    }
}

/// Process-lifetime record collection for one entity type
pub struct Collection<T> {
    inner: RwLock<Inner<T>>,
    sources: IdSources,
}

impl<T> Collection<T>
where
    T: Clone + Timestamped + Send + Sync,
{
    pub fn new() -> Self {
        Self::with_sources(IdSources::default())
    }

    pub fn with_sources(sources: IdSources) -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: HashMap::new(),
                next_seq: 0,
                last_issued: None,
            }),
            sources,
        }
    }

    /// Allocate an id and timestamp, let `build` produce the record, and
    /// store it. Returns a copy of what was stored.
    pub async fn insert<F>(&self, build: F) -> Result<T, StorageError>
    where
        F: FnOnce(Uuid, DateTime<Utc>) -> T,
    {
        let mut inner = self.inner.write().await;

        let id = inner.allocate_id(self.sources.id)?;
        let created_at = inner.stamp(self.sources.clock);
        let record = build(id, created_at);

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            id.to_string(),
            Slot {
                seq,
                record: record.clone(),
            },
        );

        debug!("Stored record {} (#{})", id, seq);
        Ok(record)
    }

    /// Snapshot of every record, most recent first
    pub async fn list(&self) -> Vec<T> {
        let inner = self.inner.read().await;

        let mut slots: Vec<&Slot<T>> = inner.records.values().collect();
        slots.sort_by(|a, b| {
            b.record
                .created_at()
                .cmp(&a.record.created_at())
                .then(b.seq.cmp(&a.seq))
        });

        slots.into_iter().map(|slot| slot.record.clone()).collect()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }
}

impl<T> Default for Collection<T>
where
    T: Clone + Timestamped + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Both collections, created empty at startup and dropped with the process
#[derive(Default)]
pub struct MemStorage {
    waitlist: Collection<WaitlistEntry>,
    contacts: Collection<ContactMessage>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(sources: IdSources) -> Self {
        Self {
            waitlist: Collection::with_sources(sources),
            contacts: Collection::with_sources(sources),
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn create_waitlist_entry(
        &self,
        entry: NewWaitlistEntry,
    ) -> Result<WaitlistEntry, StorageError> {
        self.waitlist
            .insert(|id, created_at| entry.into_entry(id, created_at))
            .await
    }

    async fn waitlist_entries(&self) -> Result<Vec<WaitlistEntry>, StorageError> {
        Ok(self.waitlist.list().await)
    }

    async fn waitlist_count(&self) -> Result<usize, StorageError> {
        Ok(self.waitlist.count().await)
    }

    async fn create_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, StorageError> {
        self.contacts
            .insert(|id, created_at| message.into_message(id, created_at))
            .await
    }

    async fn contact_messages(&self) -> Result<Vec<ContactMessage>, StorageError> {
        Ok(self.contacts.list().await)
    }
}
