use crate::error::{Result, TodoError};
use crate::store::TodoStore;

/// Reject ids the store could never have issued, before any lookup.
pub fn validate_id<S: TodoStore + ?Sized>(store: &S, id: &str) -> Result<()> {
    if store.is_valid_id(id) {
        Ok(())
    } else {
        Err(TodoError::InvalidIdentifier(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mem_store, TestEnv};

    #[test]
    fn collection_ids_must_be_object_ids() {
        let store = mem_store();
        assert!(validate_id(&store, "not-a-real-id").is_err());
        assert!(validate_id(&store, "65f1c0ffee00000000000000").is_ok());
    }

    #[test]
    fn file_ids_only_need_content() {
        let env = TestEnv::new();
        assert!(validate_id(&env.store, "not-a-real-id").is_ok());
        assert!(matches!(
            validate_id(&env.store, ""),
            Err(TodoError::InvalidIdentifier(_))
        ));
    }
}
