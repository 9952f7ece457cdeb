//! Ephemeral storage for rendered documents.
//!
//! A rendered Form 1040 exists for exactly one retrieval: the caller gets a
//! handle back from the submission, exchanges it once for the bytes, and the
//! handle becomes invalid. Documents that are never retrieved are purged
//! after a bounded idle period so abandoned submissions cannot grow storage
//! without limit.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

struct StoredDocument {
    bytes: Vec<u8>,
    created_at: DateTime<Utc>,
}

/// In-memory store of rendered documents keyed by one-time handles.
///
/// Interior mutability behind a mutex; submissions otherwise share no state.
pub struct DocumentStore {
    documents: Mutex<HashMap<Uuid, StoredDocument>>,
    ttl: Duration,
}

/// How long an unretrieved document is kept before [`DocumentStore::purge_expired`]
/// removes it.
pub const DEFAULT_DOCUMENT_TTL_SECS: i64 = 15 * 60;

impl DocumentStore {
    /// Creates a store with the default retention period.
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_DOCUMENT_TTL_SECS))
    }

    /// Creates a store that keeps unretrieved documents for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a rendered document and returns its one-time handle.
    pub fn put(&self, bytes: Vec<u8>) -> Uuid {
        let id = Uuid::new_v4();
        let mut documents = self.documents.lock().expect("document store poisoned");
        documents.insert(
            id,
            StoredDocument {
                bytes,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Removes and returns the document for `id`.
    ///
    /// Returns `None` for an unknown handle, a handle that was already
    /// retrieved, or a document past its retention period. The document is
    /// gone afterwards in every case.
    pub fn take(&self, id: Uuid) -> Option<Vec<u8>> {
        let mut documents = self.documents.lock().expect("document store poisoned");
        let document = documents.remove(&id)?;
        if Utc::now() - document.created_at > self.ttl {
            return None;
        }
        Some(document.bytes)
    }

    /// Removes every document past its retention period.
    ///
    /// Returns the number of documents removed. Intended to be driven by a
    /// periodic task in the hosting binary.
    pub fn purge_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut documents = self.documents.lock().expect("document store poisoned");
        let before = documents.len();
        documents.retain(|_, doc| doc.created_at > cutoff);
        before - documents.len()
    }

    /// Returns the number of documents currently held.
    pub fn len(&self) -> usize {
        self.documents.lock().expect("document store poisoned").len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
