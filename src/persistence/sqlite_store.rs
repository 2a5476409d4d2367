use super::{check_store_key, KeyValueStore, StoreError};
use crate::shared::clock::now_secs;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value entries in a single `kv_entries` table.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.db_path).map_err(|source| StoreError::Open {
            path: self.db_path.display().to_string(),
            source,
        })
    }

    fn ensure_schema(&self) -> Result<(), StoreError> {
        let connection = self.connect()?;
        connection
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS kv_entries (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                ",
            )
            .map_err(|source| StoreError::Sql { source })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_store_key(key)?;
        let connection = self.connect()?;
        connection
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|source| StoreError::Sql { source })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_store_key(key)?;
        let connection = self.connect()?;
        connection
            .execute(
                "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now_secs()],
            )
            .map_err(|source| StoreError::Sql { source })?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let connection = self.connect()?;
        let mut statement = connection
            .prepare("SELECT key FROM kv_entries ORDER BY key")
            .map_err(|source| StoreError::Sql { source })?;
        let rows = statement
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|source| StoreError::Sql { source })?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|source| StoreError::Sql { source })
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        check_store_key(key)?;
        let connection = self.connect()?;
        let removed = connection
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
            .map_err(|source| StoreError::Sql { source })?;
        Ok(removed > 0)
    }
}
