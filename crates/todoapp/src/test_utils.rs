use crate::api::TodoApi;
use crate::store::collection::CollectionStore;
use crate::store::file::FileStore;
use crate::store::mem_collection::MemCollection;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub path: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("data").join("todos.json");
        let store = FileStore::new(path.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            path,
        }
    }
}

pub type MemStore = CollectionStore<MemCollection>;

pub fn mem_store() -> MemStore {
    CollectionStore::new(MemCollection::new())
}

pub fn mem_api() -> TodoApi<MemStore> {
    TodoApi::new(mem_store())
}
