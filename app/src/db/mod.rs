//! Database connection and schema management
//!
//! The tracker keeps everything in one local SQLite file. The pool is capped
//! at a single connection, so it acts as the one owned handle to that file and
//! every operation acquires it only for its own duration.

use crate::config::{AppConfig, DatabaseConfig};
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Path that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        gender TEXT NOT NULL,
        weight REAL NOT NULL,
        height REAL NOT NULL,
        age INTEGER NOT NULL,
        activity TEXT NOT NULL
    )
"#;

const CREATE_ENTRIES: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        product TEXT NOT NULL,
        grams REAL,
        calories_per_100g REAL,
        calories REAL NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
"#;

const CREATE_ENTRIES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries (user_id, date)";

/// Columns added to `entries` after the first schema
const LATER_ENTRY_COLUMNS: &[(&str, &str)] = &[("grams", "REAL"), ("calories_per_100g", "REAL")];

/// Open the configured database file, creating it if needed
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let connect_options = if config.path == IN_MEMORY {
        SqliteConnectOptions::from_str("sqlite::memory:")?
    } else {
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
    }
    .foreign_keys(true)
    .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    // One connection that is never recycled: an in-memory database lives
    // exactly as long as its connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await?;

    info!(path = %config.path, "Database opened");

    Ok(pool)
}

/// Open a private in-memory database
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        path: IN_MEMORY.to_string(),
        ..AppConfig::default().database
    };
    create_pool(&config).await
}

/// Create the schema if absent and bring older `entries` tables up to date
///
/// Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_USERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_ENTRIES).execute(&mut *tx).await?;
    let added = add_missing_entry_columns(&mut *tx).await?;
    sqlx::query(CREATE_ENTRIES_INDEX).execute(&mut *tx).await?;

    tx.commit().await?;

    if added.is_empty() {
        info!("Database schema ready");
    } else {
        info!(columns = ?added, "Database schema upgraded");
    }
    Ok(())
}

/// Names of the columns of a table
pub async fn table_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<String>> {
    let columns = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?)")
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;
    Ok(columns)
}

async fn add_missing_entry_columns(conn: &mut SqliteConnection) -> Result<Vec<&'static str>> {
    let existing = table_columns(conn, "entries").await?;
    let mut added = Vec::new();

    for (column, column_type) in LATER_ENTRY_COLUMNS {
        if existing.iter().any(|c| c == column) {
            continue;
        }
        sqlx::query(&format!("ALTER TABLE entries ADD COLUMN {} {}", column, column_type))
            .execute(&mut *conn)
            .await?;
        added.push(*column);
    }

    Ok(added)
}

/// Check database health
pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
