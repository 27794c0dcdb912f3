/// Database connection management with connection pooling
///
/// Provides a thread-safe connection pool to the LightBnB SQLite database.

use crate::config::Config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Maximum number of database connections in the pool
const MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("../../database/schema.sql");

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database file and apply the schema
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(Database)` - Successfully created database instance
    /// * `Err(LightbnbError)` - If connection fails
    ///
    /// # Examples
    /// ```no_run
    /// use lightbnb_lib::db::Database;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::new("/var/lib/lightbnb/lightbnb.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;
        tracing::debug!(path = %db.db_path.display(), "database ready");

        Ok(db)
    }

    /// Open the database named by the loaded config
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.db_path).await
    }

    /// Create a test database in memory
    ///
    /// Pinned to a single long-lived connection: every new in-memory
    /// connection would otherwise see its own empty database.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path: PathBuf::from(":memory:"),
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Initialize database schema
    ///
    /// Creates all required tables and indexes if they don't exist.
    async fn initialize_schema(&self) -> Result<()> {
        // One statement per execute call
        for statement in SCHEMA.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(self.pool.as_ref()).await?;
            }
        }

        Ok(())
    }

    /// Get reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Close all connections in the pool
    ///
    /// Any query issued afterwards fails with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Row counts and pool state, for `lightbnb status`
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool())
            .await?;

        let (properties,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(self.pool())
            .await?;

        let (reservations,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations")
            .fetch_one(self.pool())
            .await?;

        let (reviews,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM property_reviews")
            .fetch_one(self.pool())
            .await?;

        Ok(DatabaseStats {
            total_users: users,
            total_properties: properties,
            total_reservations: reservations,
            total_reviews: reviews,
            pool_size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_users: i64,
    pub total_properties: i64,
    pub total_reservations: i64,
    pub total_reviews: i64,
    pub pool_size: u32,
    pub idle_connections: usize,
}
