//! Application state shared with the UI layer
//!
//! The composition root: wires concrete repositories into use cases and
//! exposes them as a flat bag of collaborators.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::email::EmailSender;
use crate::repositories::{
    EventRepository, FriendshipRepository, TicketRepository, UserRepository,
};
use crate::templates::TemplateEngine;
use crate::usecases::{
    AcceptFriendshipInviteUseCase, AddEventStaffUseCase, AuthenticateUserUseCase,
    CreateEventUseCase, DeleteEventUseCase, DeleteFriendshipUseCase, ListClientTicketsUseCase,
    ListEventStaffUseCase, ListEventsUseCase, ListFriendshipsUseCase, RedeemTicketsUseCase,
    RegisterUserUseCase, RemoveEventStaffUseCase, SendFriendshipInviteUseCase,
    UpdateEventUseCase, ValidateTicketUseCase,
};

/// Application state shared with the UI layer
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,

    pub user_repository: UserRepository,
    pub event_repository: EventRepository,
    pub friendship_repository: FriendshipRepository,
    pub ticket_repository: TicketRepository,

    pub register_user: RegisterUserUseCase,
    pub authenticate_user: AuthenticateUserUseCase,

    pub create_event: CreateEventUseCase,
    pub update_event: UpdateEventUseCase,
    pub delete_event: DeleteEventUseCase,
    pub list_events: ListEventsUseCase,
    pub add_event_staff: AddEventStaffUseCase,
    pub remove_event_staff: RemoveEventStaffUseCase,
    pub list_event_staff: ListEventStaffUseCase,

    pub send_friendship_invite: SendFriendshipInviteUseCase,
    pub accept_friendship_invite: AcceptFriendshipInviteUseCase,
    pub delete_friendship: DeleteFriendshipUseCase,
    pub list_friendships: ListFriendshipsUseCase,

    pub redeem_tickets: RedeemTicketsUseCase,
    pub validate_ticket: ValidateTicketUseCase,
    pub list_client_tickets: ListClientTicketsUseCase,
}

impl AppState {
    /// Wire repositories and use cases on top of a pool
    ///
    /// No notification sender is attached; see [`AppState::with_mailer`].
    pub fn build(pool: SqlitePool) -> Self {
        let user_repository = UserRepository::new(pool.clone());
        let event_repository = EventRepository::new(pool.clone());
        let friendship_repository = FriendshipRepository::new(pool.clone());
        let ticket_repository = TicketRepository::new(pool.clone());

        AppState {
            register_user: RegisterUserUseCase::new(user_repository.clone()),
            authenticate_user: AuthenticateUserUseCase::new(user_repository.clone()),

            create_event: CreateEventUseCase::new(
                event_repository.clone(),
                user_repository.clone(),
            ),
            update_event: UpdateEventUseCase::new(event_repository.clone()),
            delete_event: DeleteEventUseCase::new(event_repository.clone()),
            list_events: ListEventsUseCase::new(event_repository.clone()),
            add_event_staff: AddEventStaffUseCase::new(
                event_repository.clone(),
                user_repository.clone(),
            ),
            remove_event_staff: RemoveEventStaffUseCase::new(event_repository.clone()),
            list_event_staff: ListEventStaffUseCase::new(user_repository.clone()),

            send_friendship_invite: SendFriendshipInviteUseCase::new(
                friendship_repository.clone(),
                user_repository.clone(),
            ),
            accept_friendship_invite: AcceptFriendshipInviteUseCase::new(
                friendship_repository.clone(),
            ),
            delete_friendship: DeleteFriendshipUseCase::new(friendship_repository.clone()),
            list_friendships: ListFriendshipsUseCase::new(friendship_repository.clone()),

            redeem_tickets: RedeemTicketsUseCase::new(
                ticket_repository.clone(),
                event_repository.clone(),
                user_repository.clone(),
            ),
            validate_ticket: ValidateTicketUseCase::new(
                ticket_repository.clone(),
                event_repository.clone(),
            ),
            list_client_tickets: ListClientTicketsUseCase::new(ticket_repository.clone()),

            user_repository,
            event_repository,
            friendship_repository,
            ticket_repository,
            db_pool: pool,
        }
    }

    /// Attach a notification sender to the redemption flow
    pub fn with_mailer(
        mut self,
        mailer: Arc<dyn EmailSender>,
        templates: Option<TemplateEngine>,
    ) -> Self {
        self.redeem_tickets = self.redeem_tickets.with_mailer(mailer, templates);
        self
    }
}
