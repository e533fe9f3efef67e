use crate::{Error, Result};
use libsql::{Builder, Connection, Database};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

#[derive(Default)]
struct Fallback {
    entries: HashMap<String, String>,
    counters: HashMap<String, i64>,
}

/// Durable key-value store with a counter keyspace. Falls back to memory
/// when the database cannot be opened or a statement fails.
pub struct KeyValueStore {
    db: Option<(Database, Connection)>,
    fallback: Arc<Mutex<Fallback>>,
}

impl KeyValueStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let mut store = Self {
            db: None,
            fallback: Arc::new(Mutex::new(Fallback::default())),
        };

        match store.init_database(db_path).await {
            Ok(()) => {
                info!("Database initialized successfully: {}", db_path);
            }
            Err(e) => {
                warn!(
                    "Database initialization failed, using in-memory fallback: {}",
                    e
                );
            }
        }

        Ok(store)
    }

    async fn init_database(&mut self, db_path: &str) -> Result<()> {
        let db = Builder::new_local(db_path).build().await?;

        // One long-lived connection, so ":memory:" databases keep their tables.
        let conn = db.connect()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            (),
        )
        .await?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS counters (
                key TEXT PRIMARY KEY,
                count INTEGER NOT NULL
            )
            "#,
            (),
        )
        .await?;

        self.db = Some((db, conn));
        Ok(())
    }

    pub fn is_durable(&self) -> bool {
        self.db.is_some()
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some((_, ref conn)) = self.db {
            match Self::get_from_db(conn, key).await {
                Ok(value) => {
                    debug!("Read key {} from database (present: {})", key, value.is_some());
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Failed to read from database, using fallback: {}", e);
                }
            }
        }

        let fallback = self.lock_fallback()?;
        Ok(fallback.entries.get(key).cloned())
    }

    async fn get_from_db(conn: &Connection, key: &str) -> Result<Option<String>> {
        let mut rows = conn
            .query("SELECT value FROM entries WHERE key = ?", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some((_, ref conn)) = self.db {
            match Self::set_in_db(conn, key, value).await {
                Ok(()) => {
                    debug!("Stored key {} in database", key);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Failed to save to database, using fallback: {}", e);
                }
            }
        }

        let mut fallback = self.lock_fallback()?;
        fallback.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_in_db(conn: &Connection, key: &str, value: &str) -> Result<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO entries (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, updated_at.as_str()),
        )
        .await?;
        Ok(())
    }

    /// Adds one to the counter at `key` and returns the new value.
    pub async fn increment(&self, key: &str) -> Result<i64> {
        if let Some((_, ref conn)) = self.db {
            match Self::increment_in_db(conn, key).await {
                Ok(count) => {
                    debug!("Counter {} is now {}", key, count);
                    return Ok(count);
                }
                Err(e) => {
                    warn!("Failed to update counter in database, using fallback: {}", e);
                }
            }
        }

        let mut fallback = self.lock_fallback()?;
        let count = fallback.counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn increment_in_db(conn: &Connection, key: &str) -> Result<i64> {
        let mut rows = conn
            .query(
                "INSERT INTO counters (key, count) VALUES (?, 1) \
                 ON CONFLICT(key) DO UPDATE SET count = count + 1 \
                 RETURNING count",
                [key],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| Error::internal("counter upsert returned no row"))?;
        Ok(row.get::<i64>(0)?)
    }

    /// Current counter value; 0 when the key has never been incremented.
    pub async fn counter(&self, key: &str) -> Result<i64> {
        if let Some((_, ref conn)) = self.db {
            match Self::counter_from_db(conn, key).await {
                Ok(count) => return Ok(count),
                Err(e) => {
                    warn!("Failed to read counter from database, using fallback: {}", e);
                }
            }
        }

        let fallback = self.lock_fallback()?;
        Ok(fallback.counters.get(key).copied().unwrap_or(0))
    }

    async fn counter_from_db(conn: &Connection, key: &str) -> Result<i64> {
        let mut rows = conn
            .query("SELECT count FROM counters WHERE key = ?", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }

    fn lock_fallback(&self) -> Result<std::sync::MutexGuard<'_, Fallback>> {
        self.fallback
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }
}
