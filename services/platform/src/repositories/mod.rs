//! Repositories
//!
//! One repository per entity. Repositories exclusively own persistence:
//! they translate domain records to and from rows and build pagination and
//! filter queries. Row-shaped data never crosses into use-case logic.

pub mod events;
pub mod friendships;
pub mod tickets;
pub mod users;

pub use events::{EventAvailability, EventRepository};
pub use friendships::{FriendshipFilter, FriendshipRepository};
pub use tickets::TicketRepository;
pub use users::UserRepository;
