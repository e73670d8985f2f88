//! Custom error types for the platform service
//!
//! One typed taxonomy for the whole core: not-found, validation, conflict,
//! unauthorized and infrastructure errors. Every variant carries enough
//! context to render a human-readable message; the UI boundary displays
//! them verbatim.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::user::UserRole;

/// Platform error type
#[derive(Error, Debug)]
pub enum Error {
    // Not found
    #[error("User with email '{email}' and role '{role}' not found")]
    UserNotFound { email: String, role: UserRole },

    #[error("User with ID '{0}' not found")]
    UserIdNotFound(i64),

    #[error("Event with ID '{0}' not found")]
    EventNotFound(i64),

    #[error("Ticket with code '{0}' not found")]
    TicketNotFound(String),

    #[error("Event with ID '{0}' not found for ticket validation")]
    TicketEventNotFound(i64),

    #[error("Friendship with ID '{0}' does not exist")]
    FriendshipNotFound(i64),

    #[error("Requester with client email '{0}' does not exist")]
    RequesterNotFound(String),

    #[error("Requested user with client email '{0}' does not exist")]
    RequestedNotFound(String),

    // Validation
    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Invalid email: '{0}'")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid location: '{0}'")]
    InvalidLocation(String),

    #[error("Invalid event dates: start {start}, end {end}")]
    InvalidEventDates {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid ticket quantity: {0}")]
    InvalidTicketQuantity(i64),

    #[error("Invalid organizer ID: '{0}'")]
    InvalidOrganizerId(i64),

    #[error("Invalid event ID: '{0}'")]
    InvalidEventId(i64),

    #[error("Invalid client ID: '{0}'")]
    InvalidClientId(i64),

    #[error("Invalid ticket code: '{0}'")]
    InvalidTicketCode(String),

    #[error("Invalid requester client ID: '{0}'")]
    InvalidRequesterClientId(i64),

    #[error("Invalid requested client ID: '{0}'")]
    InvalidRequestedClientId(i64),

    #[error("Cannot send a friend request to yourself")]
    CannotFriendYourself,

    #[error("Invalid page number: {0}")]
    InvalidPage(i64),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(i64),

    #[error("End date {0} is in the past")]
    PastDate(DateTime<Utc>),

    // Conflict
    #[error("User with email '{email}' and role '{role}' already exists")]
    EmailAlreadyRegistered { email: String, role: UserRole },

    #[error("Friendship invitation between '{requester_email}' and '{requested_email}' is already pending")]
    FriendshipPending {
        requester_email: String,
        requested_email: String,
    },

    #[error("Friendship between '{requester_email}' and '{requested_email}' already exists")]
    FriendshipAlreadyExists {
        requester_email: String,
        requested_email: String,
    },

    #[error("Friendship with ID '{0}' is already accepted")]
    FriendshipAlreadyAccepted(i64),

    #[error("Event '{0}' has no tickets available")]
    NoTicketsAvailable(String),

    #[error("Generated ticket code already exists. Try again")]
    TicketCodeAlreadyExists,

    #[error("Ticket with code '{0}' has already been validated")]
    TicketAlreadyValidated(String),

    #[error("Staff with ID '{0}' has already been added")]
    StaffAlreadyAdded(i64),

    #[error("Staff with ID '{0}' is not assigned to this event")]
    StaffNotAssigned(i64),

    #[error("New capacity {requested} is below the {redeemed} tickets already redeemed")]
    CapacityBelowRedeemed { requested: i64, redeemed: i64 },

    // Unauthorized
    #[error("User with ID '{user_id}' and role '{user_role}' is not authorized to validate ticket with code '{code}'")]
    UnauthorizedValidation {
        user_id: i64,
        user_role: UserRole,
        code: String,
    },

    #[error("Wrong password")]
    WrongPassword,

    #[error("Ticket validation is only allowed between {start} and {end} for event ID {event_id}")]
    TicketValidationTime {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        event_id: i64,
    },

    // Infrastructure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pool(#[from] common::error::DatabaseError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Email error: {0}")]
    Email(String),
}

/// Type alias for platform results
pub type Result<T> = std::result::Result<T, Error>;
