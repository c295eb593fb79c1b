use crate::error::Result;
use crate::model::Todo;
use crate::store::TodoStore;

pub fn run<S: TodoStore + ?Sized>(store: &S) -> Result<Vec<Todo>> {
    store.list()
}
