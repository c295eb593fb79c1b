//! Document-collection adapter.
//!
//! [`DocumentCollection`] is the seam to a document database driver: a handful
//! of single-call operations, each atomic on its own. [`CollectionStore`] maps
//! the [`TodoStore`] contract onto it one call per operation.
//!
//! Identifiers are [`ObjectId`]s: 12 bytes rendered as 24 lowercase hex
//! characters. The store rejects anything else before talking to the
//! collection, including the literal `"undefined"` and `"null"` that careless
//! clients send when they lost track of an id.

use super::TodoStore;
use crate::error::{Result, TodoError};
use crate::model::Todo;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;
use uuid::Uuid;

const ABSENT_MARKERS: [&str; 2] = ["undefined", "null"];

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&random.as_bytes()[..5]);
    bytes
});

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let b = random.as_bytes();
    AtomicU32::new(u32::from_be_bytes([0, b[0], b[1], b[2]]))
});

/// A 12-byte document identifier: seconds timestamp, process-unique bytes, counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let secs = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse the 24-hex-character form. `None` for any other shape.
    pub fn parse_str(s: &str) -> Option<Self> {
        if !is_valid_object_id(s) {
            return None;
        }
        let decoded = hex::decode(s).ok()?;
        let bytes: [u8; 12] = decoded.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s).ok_or_else(|| TodoError::InvalidIdentifier(s.to_string()))
    }
}

/// Whether `id` is shaped like an [`ObjectId`].
pub fn is_valid_object_id(id: &str) -> bool {
    if ABSENT_MARKERS.contains(&id) {
        return false;
    }
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: ObjectId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for Todo {
    fn from(doc: Document) -> Self {
        Todo {
            id: doc.id.to_hex(),
            text: doc.text,
            completed: doc.completed,
            created_at: doc.created_at,
        }
    }
}

/// A document before the collection assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Insertion order
    Natural,
    /// Newest `created_at` first
    CreatedAtDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFilter {
    All,
    Completed(bool),
}

impl DocFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            DocFilter::All => true,
            DocFilter::Completed(flag) => doc.completed == *flag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocUpdate {
    SetCompleted(bool),
}

impl DocUpdate {
    pub fn apply(&self, doc: &mut Document) {
        match self {
            DocUpdate::SetCompleted(flag) => doc.completed = *flag,
        }
    }
}

/// The operations a document database driver offers. Each call is atomic.
pub trait DocumentCollection: Send + Sync {
    fn find(&self, filter: DocFilter, sort: SortOrder) -> Result<Vec<Document>>;

    fn insert_one(&self, doc: NewDocument) -> Result<Document>;

    /// Apply `update` and return the document as it is afterwards.
    fn find_one_and_update(&self, id: &ObjectId, update: DocUpdate) -> Result<Option<Document>>;

    fn find_one_and_delete(&self, id: &ObjectId) -> Result<Option<Document>>;

    fn delete_many(&self, filter: DocFilter) -> Result<usize>;
}

/// [`TodoStore`] over a [`DocumentCollection`].
pub struct CollectionStore<C: DocumentCollection> {
    collection: C,
}

impl<C: DocumentCollection> CollectionStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    fn parse_id(&self, id: &str) -> Result<ObjectId> {
        id.parse()
    }
}

impl<C: DocumentCollection> TodoStore for CollectionStore<C> {
    fn list(&self) -> Result<Vec<Todo>> {
        let docs = self
            .collection
            .find(DocFilter::All, SortOrder::CreatedAtDesc)?;
        Ok(docs.into_iter().map(Todo::from).collect())
    }

    fn insert(&self, text: &str) -> Result<Todo> {
        let doc = self.collection.insert_one(NewDocument {
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        })?;
        debug!(id = %doc.id, "inserted document");
        Ok(doc.into())
    }

    fn update_completed(&self, id: &str, completed: bool) -> Result<Option<Todo>> {
        let oid = self.parse_id(id)?;
        let doc = self
            .collection
            .find_one_and_update(&oid, DocUpdate::SetCompleted(completed))?;
        Ok(doc.map(Todo::from))
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        let oid = self.parse_id(id)?;
        Ok(self.collection.find_one_and_delete(&oid)?.is_some())
    }

    fn delete_where_completed(&self) -> Result<usize> {
        let removed = self.collection.delete_many(DocFilter::Completed(true))?;
        debug!(removed, "deleted completed documents");
        Ok(removed)
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_valid_object_id(id)
    }
}
