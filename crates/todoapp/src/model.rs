//! # Domain Model
//!
//! A [`Todo`] is the only entity. It is serialized with camelCase field names,
//! both on the wire and in the JSON files written by the stores:
//!
//! ```text
//! { "id": "…", "text": "Buy milk", "completed": false, "createdAt": "2024-05-01T09:30:00Z" }
//! ```
//!
//! ## Identity
//!
//! `id` is an opaque string. Who assigns it depends on the storage:
//! - `FileStore`: a random UUID v4
//! - `CollectionStore`: the collection's 24-hex object id
//! - local-only client: a millisecond timestamp
//!
//! Once assigned it never changes.
//!
//! ## Text
//!
//! Text is trimmed and must be non-empty at creation. There is no edit
//! operation, so it is immutable afterwards. `completed` is the only mutable
//! field and is never optional: records missing it fail to deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Trims `raw` and returns it, or `None` when nothing but whitespace is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_todo_starts_active() {
        let todo = Todo::new("1", "Buy milk");
        assert!(!todo.completed);
        assert!(todo.is_active());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let todo = Todo::new("abc", "Walk dog");
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["text"], "Walk dog");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_string());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn rejects_record_without_completed() {
        let raw = json!({
            "id": "abc",
            "text": "Walk dog",
            "createdAt": "2024-05-01T09:30:00Z"
        });
        assert!(serde_json::from_value::<Todo>(raw).is_err());
    }

    #[test]
    fn normalize_text_trims() {
        assert_eq!(normalize_text("  Buy milk \n"), Some("Buy milk".to_string()));
    }

    #[test]
    fn normalize_text_rejects_blank() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   \t"), None);
    }
}
