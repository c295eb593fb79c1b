use super::collection::{
    DocFilter, DocUpdate, Document, DocumentCollection, NewDocument, ObjectId, SortOrder,
};
use crate::error::{Result, TodoError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process document collection.
///
/// Every operation takes the lock once, so each call is atomic with respect to
/// the others. Data lives as long as the value does.
#[derive(Default)]
pub struct MemCollection {
    docs: Mutex<Vec<Document>>,
    simulate_failure: AtomicBool,
}

impl MemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, for testing error handling.
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.docs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.lock().is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(TodoError::Store("Simulated collection failure".to_string()));
        }
        Ok(())
    }
}

impl DocumentCollection for MemCollection {
    fn find(&self, filter: DocFilter, sort: SortOrder) -> Result<Vec<Document>> {
        self.check_available()?;
        let docs = self.docs.lock();
        let mut found: Vec<Document> = docs.iter().filter(|d| filter.matches(d)).cloned().collect();
        if sort == SortOrder::CreatedAtDesc {
            // Stable sort over reversed insertion order: ties stay newest first.
            found.reverse();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Ok(found)
    }

    fn insert_one(&self, doc: NewDocument) -> Result<Document> {
        self.check_available()?;
        let stored = Document {
            id: ObjectId::new(),
            text: doc.text,
            completed: doc.completed,
            created_at: doc.created_at,
        };
        self.docs.lock().push(stored.clone());
        Ok(stored)
    }

    fn find_one_and_update(&self, id: &ObjectId, update: DocUpdate) -> Result<Option<Document>> {
        self.check_available()?;
        let mut docs = self.docs.lock();
        Ok(docs.iter_mut().find(|d| d.id == *id).map(|doc| {
            update.apply(doc);
            doc.clone()
        }))
    }

    fn find_one_and_delete(&self, id: &ObjectId) -> Result<Option<Document>> {
        self.check_available()?;
        let mut docs = self.docs.lock();
        let position = docs.iter().position(|d| d.id == *id);
        Ok(position.map(|i| docs.remove(i)))
    }

    fn delete_many(&self, filter: DocFilter) -> Result<usize> {
        self.check_available()?;
        let mut docs = self.docs.lock();
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok(before - docs.len())
    }
}
