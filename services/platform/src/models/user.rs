//! User model and related functionality

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user registered under
///
/// The same email may register once per role, so the role is part of a
/// user's identity rather than a permission flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum UserRole {
    Client,
    Organizer,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "CLIENT",
            UserRole::Organizer => "ORGANIZER",
            UserRole::Staff => "STAFF",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// New user registration payload
///
/// Carries the raw password; hashing happens in the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Staff identity row for the staff listing read model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}
