use crate::error::Result;
use crate::store::TodoStore;

/// Remove every completed todo. Returns how many were removed.
pub fn run<S: TodoStore + ?Sized>(store: &S) -> Result<usize> {
    store.delete_where_completed()
}
