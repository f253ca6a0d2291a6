use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// The two logical collections persisted per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Favorites,
    Workouts,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Favorites => "favorites",
            Namespace::Workouts => "workouts",
        }
    }
}

/// Builds the storage key for a `(namespace, user_id)` scope.
/// Keys never collide across users as long as user ids are unique.
pub fn scope_key(namespace: Namespace, user_id: &str) -> String {
    format!("{}_{}", namespace.as_str(), user_id)
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value store for whole JSON collections, scoped by
/// `(namespace, user_id)`. All operations are synchronous.
pub trait ScopedStore: Send + Sync {
    /// Returns the raw JSON stored for the scope, or None if nothing was
    /// ever saved there.
    fn load(&self, namespace: Namespace, user_id: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the scope with the given JSON value.
    fn save(&self, namespace: Namespace, user_id: &str, value: &str) -> Result<(), StorageError>;

    /// Erases the scope. Absent scopes are a no-op.
    fn clear(&self, namespace: Namespace, user_id: &str) -> Result<(), StorageError>;
}

/// Loads a collection for the scope, falling back to the empty default when
/// nothing is stored, the stored value is malformed, or the read fails.
/// A malformed value is not an error: it is treated as absent data.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn ScopedStore,
    namespace: Namespace,
    user_id: &str,
) -> Vec<T> {
    match store.load(namespace, user_id) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(collection) => collection,
            Err(err) => {
                warn!(
                    "Malformed {} collection for user {}, resetting to empty: {}",
                    namespace.as_str(),
                    user_id,
                    err
                );
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(
                "Failed to load {} collection for user {}: {}",
                namespace.as_str(),
                user_id,
                err
            );
            Vec::new()
        }
    }
}

/// Serializes and overwrites the whole collection for the scope.
pub fn save_collection<T: Serialize>(
    store: &dyn ScopedStore,
    namespace: Namespace,
    user_id: &str,
    collection: &[T],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(collection)?;
    store.save(namespace, user_id, &raw)
}
