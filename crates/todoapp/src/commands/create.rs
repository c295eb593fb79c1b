use crate::error::{Result, TodoError};
use crate::model::{normalize_text, Todo};
use crate::store::TodoStore;

pub const TEXT_REQUIRED: &str = "Todo text is required";

pub fn run<S: TodoStore + ?Sized>(store: &S, text: Option<&str>) -> Result<Todo> {
    let text = text
        .and_then(normalize_text)
        .ok_or_else(|| TodoError::InvalidInput(TEXT_REQUIRED.to_string()))?;
    store.insert(&text)
}
