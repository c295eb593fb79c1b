use super::helpers::validate_id;
use crate::error::{Result, TodoError};
use crate::store::TodoStore;

pub fn run<S: TodoStore + ?Sized>(store: &S, id: &str) -> Result<()> {
    validate_id(store, id)?;
    if store.delete_one(id)? {
        Ok(())
    } else {
        Err(TodoError::NotFound(id.to_string()))
    }
}
