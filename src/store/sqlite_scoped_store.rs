use super::schema::{DB_VERSION, SCOPED_COLLECTION_TABLE, TABLES};
use super::scoped_store::{scope_key, Namespace, ScopedStore, StorageError};
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// SQLite-backed scoped store. One row per `(namespace, user_id)` scope,
/// value is the whole collection as a JSON array.
#[derive(Clone)]
pub struct SqliteScopedStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteScopedStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = if db_path.as_ref().exists() {
            Connection::open_with_flags(
                &db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("Failed to open store at {:?}", db_path.as_ref()))?
        } else {
            info!("Creating store database at {:?}", db_path.as_ref());
            let conn = Connection::open(&db_path)
                .with_context(|| format!("Failed to create store at {:?}", db_path.as_ref()))?;
            Self::create_schema(&conn)?;
            conn
        };

        let version = conn
            .query_row("PRAGMA user_version;", [], |row| row.get::<usize, i64>(0))
            .context("Failed to read database version")?;

        if version != DB_VERSION {
            bail!(
                "Unsupported store database version {} (expected {})",
                version,
                DB_VERSION
            );
        }

        Ok(SqliteScopedStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        for table in TABLES {
            conn.execute(table.schema, [])?;
            for index in table.indices {
                conn.execute(index, [])?;
            }
        }
        conn.execute(&format!("PRAGMA user_version = {}", DB_VERSION), [])?;
        Ok(())
    }
}

impl ScopedStore for SqliteScopedStore {
    fn load(&self, namespace: Namespace, user_id: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT value FROM {} WHERE key = ?1",
            SCOPED_COLLECTION_TABLE.name
        ))?;
        let value = stmt
            .query_row(params![scope_key(namespace, user_id)], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn save(&self, namespace: Namespace, user_id: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                 updated = cast(strftime('%s','now') as int)",
                SCOPED_COLLECTION_TABLE.name
            ),
            params![scope_key(namespace, user_id), value],
        )?;
        Ok(())
    }

    fn clear(&self, namespace: Namespace, user_id: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!("DELETE FROM {} WHERE key = ?1", SCOPED_COLLECTION_TABLE.name),
            params![scope_key(namespace, user_id)],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tmp_store() -> (SqliteScopedStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let temp_file_path = temp_dir.path().join("test.db");
        let store = SqliteScopedStore::new(&temp_file_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_load_missing_scope_is_none() {
        let (store, _temp_dir) = create_tmp_store();
        assert!(store.load(Namespace::Favorites, "u1").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let (store, _temp_dir) = create_tmp_store();

        store.save(Namespace::Favorites, "u1", "[1]").unwrap();
        store.save(Namespace::Favorites, "u1", "[1,2]").unwrap();

        let value = store.load(Namespace::Favorites, "u1").unwrap();
        assert_eq!(value.as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_scopes_do_not_leak_across_users_or_namespaces() {
        let (store, _temp_dir) = create_tmp_store();

        store.save(Namespace::Favorites, "u1", "[\"a\"]").unwrap();
        store.save(Namespace::Favorites, "u2", "[\"b\"]").unwrap();
        store.save(Namespace::Workouts, "u1", "[\"c\"]").unwrap();

        assert_eq!(
            store.load(Namespace::Favorites, "u1").unwrap().as_deref(),
            Some("[\"a\"]")
        );
        assert_eq!(
            store.load(Namespace::Favorites, "u2").unwrap().as_deref(),
            Some("[\"b\"]")
        );
        assert_eq!(
            store.load(Namespace::Workouts, "u1").unwrap().as_deref(),
            Some("[\"c\"]")
        );
    }

    #[test]
    fn test_clear_erases_only_the_target_scope() {
        let (store, _temp_dir) = create_tmp_store();

        store.save(Namespace::Favorites, "u1", "[\"a\"]").unwrap();
        store.save(Namespace::Workouts, "u1", "[\"b\"]").unwrap();

        store.clear(Namespace::Favorites, "u1").unwrap();

        assert!(store.load(Namespace::Favorites, "u1").unwrap().is_none());
        assert!(store.load(Namespace::Workouts, "u1").unwrap().is_some());
    }

    #[test]
    fn test_clear_missing_scope_is_noop() {
        let (store, _temp_dir) = create_tmp_store();
        store.clear(Namespace::Favorites, "nobody").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.db");

        {
            let store = SqliteScopedStore::new(&path).unwrap();
            store.save(Namespace::Favorites, "u1", "[\"a\"]").unwrap();
        }

        let reopened = SqliteScopedStore::new(&path).unwrap();
        assert_eq!(
            reopened.load(Namespace::Favorites, "u1").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }

    #[test]
    fn test_rejects_newer_database_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.db");

        {
            let store = SqliteScopedStore::new(&path).unwrap();
            let conn = store.conn.lock().unwrap();
            conn.execute(&format!("PRAGMA user_version = {}", DB_VERSION + 1), [])
                .unwrap();
        }

        assert!(SqliteScopedStore::new(&path).is_err());
    }
}
