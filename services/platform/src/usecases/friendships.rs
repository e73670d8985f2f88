//! Friendship invite lifecycle use cases

use tracing::info;

use crate::error::{Error, Result};
use crate::models::friendship::{Friendship, FriendshipStatus, FriendshipSummary, NewFriendship};
use crate::models::user::UserRole;
use crate::repositories::{FriendshipFilter, FriendshipRepository, UserRepository};
use crate::usecases::ensure_valid_page;

/// Invite request, by client email on both sides
#[derive(Debug, Clone)]
pub struct SendFriendshipInviteInput {
    pub requester_client_email: String,
    pub requested_client_email: String,
}

/// Send a friendship invite between two clients
#[derive(Clone)]
pub struct SendFriendshipInviteUseCase {
    friendships: FriendshipRepository,
    users: UserRepository,
}

impl SendFriendshipInviteUseCase {
    pub fn new(friendships: FriendshipRepository, users: UserRepository) -> Self {
        Self { friendships, users }
    }

    pub async fn execute(&self, input: SendFriendshipInviteInput) -> Result<Friendship> {
        let requester = self
            .users
            .find_by_email_and_role(&input.requester_client_email, UserRole::Client)
            .await?
            .ok_or_else(|| Error::RequesterNotFound(input.requester_client_email.clone()))?;

        let requested = self
            .users
            .find_by_email_and_role(&input.requested_client_email, UserRole::Client)
            .await?
            .ok_or_else(|| Error::RequestedNotFound(input.requested_client_email.clone()))?;

        // A single row covers the pair in both directions.
        if self
            .friendships
            .exists_between(requester.id, requested.id)
            .await?
        {
            if self
                .friendships
                .pending_between(requester.id, requested.id)
                .await?
            {
                return Err(Error::FriendshipPending {
                    requester_email: input.requester_client_email,
                    requested_email: input.requested_client_email,
                });
            }
            return Err(Error::FriendshipAlreadyExists {
                requester_email: input.requester_client_email,
                requested_email: input.requested_client_email,
            });
        }

        let invite = NewFriendship::create(requester.id, requested.id)?;
        let added = self.friendships.add(&invite).await?;

        info!(
            "Friendship invite {} sent from client {} to client {}",
            added.id, requester.id, requested.id
        );

        Ok(added)
    }
}

/// Accept request
#[derive(Debug, Clone)]
pub struct AcceptFriendshipInviteInput {
    pub friendship_id: i64,
}

/// Accept a pending friendship invite
#[derive(Clone)]
pub struct AcceptFriendshipInviteUseCase {
    friendships: FriendshipRepository,
}

impl AcceptFriendshipInviteUseCase {
    pub fn new(friendships: FriendshipRepository) -> Self {
        Self { friendships }
    }

    pub async fn execute(&self, input: AcceptFriendshipInviteInput) -> Result<Friendship> {
        let friendship = self
            .friendships
            .get_by_id(input.friendship_id)
            .await?
            .ok_or(Error::FriendshipNotFound(input.friendship_id))?;

        if friendship.status == FriendshipStatus::Accepted {
            return Err(Error::FriendshipAlreadyAccepted(friendship.id));
        }

        let accepted = friendship.accept()?;
        self.friendships.update(&accepted).await?;

        Ok(accepted)
    }
}

/// Delete request; used both to decline a pending invite and to unfriend
#[derive(Debug, Clone)]
pub struct DeleteFriendshipInput {
    pub friendship_id: i64,
}

/// Hard-delete a friendship
#[derive(Clone)]
pub struct DeleteFriendshipUseCase {
    friendships: FriendshipRepository,
}

impl DeleteFriendshipUseCase {
    pub fn new(friendships: FriendshipRepository) -> Self {
        Self { friendships }
    }

    pub async fn execute(&self, input: DeleteFriendshipInput) -> Result<Friendship> {
        let friendship = self
            .friendships
            .get_by_id(input.friendship_id)
            .await?
            .ok_or(Error::FriendshipNotFound(input.friendship_id))?;

        self.friendships.delete(friendship.id).await?;
        Ok(friendship)
    }
}

/// Listing request
#[derive(Debug, Clone, Default)]
pub struct ListFriendshipsInput {
    pub page: i64,
    pub page_size: i64,
    pub participant_client_id: Option<i64>,
    pub requester_client_id: Option<i64>,
    pub requested_client_id: Option<i64>,
    pub status: Option<FriendshipStatus>,
}

/// Paginated friendship listing joined with user identity for display
#[derive(Clone)]
pub struct ListFriendshipsUseCase {
    friendships: FriendshipRepository,
}

impl ListFriendshipsUseCase {
    pub fn new(friendships: FriendshipRepository) -> Self {
        Self { friendships }
    }

    pub async fn execute(
        &self,
        input: ListFriendshipsInput,
    ) -> Result<(Vec<FriendshipSummary>, i64)> {
        ensure_valid_page(input.page, input.page_size)?;

        let filter = FriendshipFilter {
            participant_client_id: input.participant_client_id,
            requester_client_id: input.requester_client_id,
            requested_client_id: input.requested_client_id,
            status: input.status,
        };

        self.friendships
            .list_with_user_email_and_name(filter, input.page, input.page_size)
            .await
    }
}
