//! User repository for database operations

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::user::{NewUser, StaffSummary, User, UserRole};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Hashes the raw password with argon2 before writing the row.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.email);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| Error::PasswordHash(e.to_string()))?
            .to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(new_user.role)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash,
            role: new_user.role,
        })
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: row.get("role"),
        }))
    }

    /// Find a user by email within a single role
    ///
    /// Emails are unique per role, not globally, so the role is part of the
    /// lookup key.
    pub async fn find_by_email_and_role(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role
            FROM users
            WHERE email = ? AND role = ?
            "#,
        )
        .bind(email)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: row.get("role"),
        }))
    }

    /// Verify a user's password against the stored hash
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|e| Error::PasswordHash(e.to_string()))?;

        let argon2 = Argon2::default();
        Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }

    /// List staff users granted validation rights on events
    ///
    /// `staff_ids` is stored as a comma-separated list on the events table;
    /// the delimiter join below matches a staff id anywhere in that list.
    pub async fn list_staffs(
        &self,
        page: i64,
        page_size: i64,
        event_id: Option<i64>,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(Vec<StaffSummary>, i64)> {
        let base = r#"
            FROM users u
            JOIN events e ON (',' || e.staff_ids || ',') LIKE ('%,' || CAST(u.id AS TEXT) || ',%')
            WHERE u.role = 'STAFF'
              AND (?1 IS NULL OR e.id = ?1)
              AND (?2 IS NULL OR u.name = ?2)
              AND (?3 IS NULL OR u.email = ?3)
        "#;

        let select_query = format!(
            "SELECT DISTINCT u.id, u.name, u.email {base} ORDER BY u.id ASC LIMIT ?4 OFFSET ?5"
        );
        let count_query = format!("SELECT COUNT(DISTINCT u.id) {base}");

        let rows = sqlx::query(&select_query)
            .bind(event_id)
            .bind(name)
            .bind(email)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(event_id)
            .bind(name)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        let staffs = rows
            .into_iter()
            .map(|row| StaffSummary {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
            })
            .collect();

        Ok((staffs, total))
    }
}
