// SQLite-backed blob store - isolates all database side effects
use rusqlite::{params, OptionalExtension};

use super::BlobStore;
use crate::db::DbPool;
use crate::error::StoreError;

pub struct SqliteBlobStore {
    pool: DbPool,
}

impl SqliteBlobStore {
    /// Expects a pool that has already been migrated
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;

        let value = conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, value],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteBlobStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();

        (SqliteBlobStore::new(pool), temp_dir)
    }

    #[test]
    fn test_put_and_get() {
        let (mut store, _temp) = create_test_store();

        store.put("tastyNest_user", r#"{"id":"1"}"#).unwrap();

        let loaded = store.get("tastyNest_user").unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[test]
    fn test_put_is_upsert() {
        let (mut store, _temp) = create_test_store();

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

        let conn = store.pool.get().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM blobs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_missing_key() {
        let (store, _temp) = create_test_store();
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_unmigrated_database_reports_error() {
        let pool = db::create_memory_pool().unwrap();
        let store = SqliteBlobStore::new(pool);
        assert!(matches!(store.get("k"), Err(StoreError::Database(_))));
    }
}
