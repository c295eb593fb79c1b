use super::helpers::validate_id;
use crate::error::{Result, TodoError};
use crate::model::Todo;
use crate::store::TodoStore;

pub const COMPLETED_REQUIRED: &str = "Completed status is required";

/// Set `completed` on the todo with `id`.
///
/// `completed` is optional at this level because a missing value is an input
/// error, distinct from `false`.
pub fn run<S: TodoStore + ?Sized>(store: &S, id: &str, completed: Option<bool>) -> Result<Todo> {
    let completed =
        completed.ok_or_else(|| TodoError::InvalidInput(COMPLETED_REQUIRED.to_string()))?;
    validate_id(store, id)?;
    store
        .update_completed(id, completed)?
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}
