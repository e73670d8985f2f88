//! Application use cases
//!
//! Each use case orchestrates repositories and domain rules for one
//! operation: it takes an input struct, runs to completion on the calling
//! task, and returns a typed result or error. No retries, no background
//! work; the only best-effort step is the redemption email.

pub mod events;
pub mod friendships;
pub mod tickets;
pub mod users;

pub use events::{
    AddEventStaffUseCase, CreateEventInput, CreateEventUseCase, DeleteEventInput,
    DeleteEventUseCase, EventStaffInput, ListEventStaffInput, ListEventStaffUseCase,
    ListEventsInput, ListEventsUseCase, RemoveEventStaffUseCase, UpdateEventInput,
    UpdateEventUseCase,
};
pub use friendships::{
    AcceptFriendshipInviteInput, AcceptFriendshipInviteUseCase, DeleteFriendshipInput,
    DeleteFriendshipUseCase, ListFriendshipsInput, ListFriendshipsUseCase,
    SendFriendshipInviteInput, SendFriendshipInviteUseCase,
};
pub use tickets::{
    ListClientTicketsInput, ListClientTicketsUseCase, RedeemTicketsInput, RedeemTicketsUseCase,
    ValidateTicketInput, ValidateTicketUseCase,
};
pub use users::{
    AuthenticateUserInput, AuthenticateUserUseCase, RegisterUserInput, RegisterUserUseCase,
};

use crate::error::{Error, Result};

/// Reject out-of-range pagination before any query runs
pub(crate) fn ensure_valid_page(page: i64, page_size: i64) -> Result<()> {
    if page < 1 {
        return Err(Error::InvalidPage(page));
    }
    if page_size < 1 {
        return Err(Error::InvalidPageSize(page_size));
    }
    Ok(())
}
