//! Friendship model and invite state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Friendship invite status
///
/// There is no rejected state: declining a pending invite deletes the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Accepted => "ACCEPTED",
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Friendship entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub requester_client_id: i64,
    pub requested_client_id: i64,
    pub status: FriendshipStatus,
    pub accepted_at: Option<DateTime<Utc>>,
}

/// New friendship payload, validated by [`NewFriendship::create`]
#[derive(Debug, Clone)]
pub struct NewFriendship {
    pub requester_client_id: i64,
    pub requested_client_id: i64,
    pub status: FriendshipStatus,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl NewFriendship {
    /// Validate and build a pending invite
    ///
    /// Self-friending is rejected here, before any persistence attempt.
    pub fn create(requester_client_id: i64, requested_client_id: i64) -> Result<Self> {
        if requester_client_id <= 0 {
            return Err(Error::InvalidRequesterClientId(requester_client_id));
        }
        if requested_client_id <= 0 {
            return Err(Error::InvalidRequestedClientId(requested_client_id));
        }
        if requester_client_id == requested_client_id {
            return Err(Error::CannotFriendYourself);
        }
        Ok(NewFriendship {
            requester_client_id,
            requested_client_id,
            status: FriendshipStatus::Pending,
            accepted_at: None,
        })
    }
}

impl Friendship {
    /// Transition Pending -> Accepted, stamping `accepted_at`
    ///
    /// The transition is one-way; accepting an already accepted friendship
    /// is an error.
    pub fn accept(&self) -> Result<Friendship> {
        if self.status == FriendshipStatus::Accepted {
            return Err(Error::FriendshipAlreadyAccepted(self.id));
        }
        let mut accepted = self.clone();
        accepted.status = FriendshipStatus::Accepted;
        accepted.accepted_at = Some(Utc::now());
        Ok(accepted)
    }
}

/// Friendship row joined with both users' identity, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipSummary {
    pub id: i64,
    pub requester_client_id: i64,
    pub requester_name: String,
    pub requester_email: String,
    pub requested_client_id: i64,
    pub requested_name: String,
    pub requested_email: String,
    pub status: FriendshipStatus,
    pub accepted_at: Option<DateTime<Utc>>,
}
