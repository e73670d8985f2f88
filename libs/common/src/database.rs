//! Database module for handling SQLite connections and operations
//!
//! This module provides connection pooling, configuration, schema creation
//! and health checks for the single-file SQLite database.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: SQLite connection URL (default: "sqlite://data/app.db")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/app.db".to_string());

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Initialize a SQLite connection pool
///
/// Creates the database file if it does not exist yet and enables foreign
/// key enforcement on every connection.
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<SqlitePool>` - SQLite connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    info!("Initializing database connection pool");

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Create the application tables if they do not exist yet
///
/// Owns the whole schema: users, events, friendships and tickets.
pub async fn initialize_schema(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL,
            UNIQUE(email, role)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            created_at TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            max_tickets INTEGER NOT NULL,
            tickets_redeemed INTEGER NOT NULL DEFAULT 0,
            organizer_id INTEGER NOT NULL,
            staff_ids TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(organizer_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS friendships (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            requester_client_id INTEGER NOT NULL,
            requested_client_id INTEGER NOT NULL,
            status TEXT NOT NULL,
            accepted_at TEXT NULL,
            UNIQUE(requester_client_id, requested_client_id),
            FOREIGN KEY(requester_client_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY(requested_client_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    // One friendship row covers a pair in both directions; the expression
    // index rejects a reversed duplicate that the ordered UNIQUE would miss.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_friendships_pair
        ON friendships (
            MIN(requester_client_id, requested_client_id),
            MAX(requester_client_id, requested_client_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL,
            client_id INTEGER NOT NULL,
            code TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(code),
            FOREIGN KEY(event_id) REFERENCES events(id) ON DELETE CASCADE,
            FOREIGN KEY(client_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::Schema)?;

    info!("Database schema initialized");
    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - SQLite connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if connection is successful, false otherwise
pub async fn health_check(pool: &SqlitePool) -> DatabaseResult<bool> {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Database health check failed: {}", e);
            Err(DatabaseError::Query(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        let config = DatabaseConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        init_pool(&config).await.expect("Failed to create pool")
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = memory_pool().await;
        initialize_schema(&pool).await.expect("first init failed");
        initialize_schema(&pool).await.expect("second init failed");
        assert!(health_check(&pool).await.expect("health check failed"));
    }

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let pool = memory_pool().await;
        initialize_schema(&pool).await.expect("init failed");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('users', 'events', 'friendships', 'tickets')",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");

        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn test_friendship_pair_index_exists() {
        let pool = memory_pool().await;
        initialize_schema(&pool).await.expect("init failed");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' \
             AND name = 'idx_friendships_pair'",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");

        assert_eq!(count, 1);
    }
}
