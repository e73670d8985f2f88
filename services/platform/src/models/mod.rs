//! Domain models
//!
//! Immutable value records with factory validation and state transitions.
//! They never touch persistence themselves; repositories map them to and
//! from rows.

pub mod event;
pub mod friendship;
pub mod ticket;
pub mod user;

pub use event::{Event, NewEvent};
pub use friendship::{Friendship, FriendshipStatus, FriendshipSummary, NewFriendship};
pub use ticket::{NewTicket, Ticket, TicketStatus};
pub use user::{NewUser, StaffSummary, User, UserRole};
