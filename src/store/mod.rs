mod memory_store;
mod schema;
mod scoped_store;
mod sqlite_scoped_store;

pub use memory_store::MemoryScopedStore;
pub use scoped_store::{
    load_collection, save_collection, scope_key, Namespace, ScopedStore, StorageError,
};
pub use sqlite_scoped_store::SqliteScopedStore;
