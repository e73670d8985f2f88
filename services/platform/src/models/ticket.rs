//! Ticket model and validation transition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Pending,
    Validated,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "PENDING",
            TicketStatus::Validated => "VALIDATED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket entity
///
/// `code` is the short human-entered identifier scanned at the door; it is
/// unique across all tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub event_id: i64,
    pub client_id: i64,
    pub code: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// New ticket payload, validated by [`NewTicket::create`]
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub event_id: i64,
    pub client_id: i64,
    pub code: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl NewTicket {
    pub fn create(event_id: i64, client_id: i64, code: &str) -> Result<Self> {
        if event_id <= 0 {
            return Err(Error::InvalidEventId(event_id));
        }
        if client_id <= 0 {
            return Err(Error::InvalidClientId(client_id));
        }
        if code.trim().is_empty() {
            return Err(Error::InvalidTicketCode(code.to_string()));
        }
        Ok(NewTicket {
            event_id,
            client_id,
            code: code.to_string(),
            status: TicketStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

impl Ticket {
    /// Transition Pending -> Validated
    ///
    /// A ticket is validated at most once; a second attempt is an error.
    pub fn validate(&self) -> Result<Ticket> {
        if self.status != TicketStatus::Pending {
            return Err(Error::TicketAlreadyValidated(self.code.clone()));
        }
        let mut validated = self.clone();
        validated.status = TicketStatus::Validated;
        Ok(validated)
    }
}
