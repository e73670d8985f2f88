//! Friendship repository for database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::Result;
use crate::models::friendship::{Friendship, FriendshipStatus, FriendshipSummary, NewFriendship};

/// Filters for the friendship listing read model
///
/// `participant_client_id` matches either side of the relationship and
/// takes precedence over the per-side filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriendshipFilter {
    pub participant_client_id: Option<i64>,
    pub requester_client_id: Option<i64>,
    pub requested_client_id: Option<i64>,
    pub status: Option<FriendshipStatus>,
}

/// Friendship repository
#[derive(Clone)]
pub struct FriendshipRepository {
    pool: SqlitePool,
}

fn map_friendship(row: SqliteRow) -> Friendship {
    Friendship {
        id: row.get("id"),
        requester_client_id: row.get("requester_client_id"),
        requested_client_id: row.get("requested_client_id"),
        status: row.get("status"),
        accepted_at: row.get("accepted_at"),
    }
}

impl FriendshipRepository {
    /// Create a new friendship repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new invite
    pub async fn add(&self, new_friendship: &NewFriendship) -> Result<Friendship> {
        let result = sqlx::query(
            r#"
            INSERT INTO friendships (requester_client_id, requested_client_id, status, accepted_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(new_friendship.requester_client_id)
        .bind(new_friendship.requested_client_id)
        .bind(new_friendship.status)
        .bind(new_friendship.accepted_at)
        .execute(&self.pool)
        .await?;

        Ok(Friendship {
            id: result.last_insert_rowid(),
            requester_client_id: new_friendship.requester_client_id,
            requested_client_id: new_friendship.requested_client_id,
            status: new_friendship.status,
            accepted_at: new_friendship.accepted_at,
        })
    }

    /// Get a friendship by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Friendship>> {
        let row = sqlx::query(
            r#"
            SELECT id, requester_client_id, requested_client_id, status, accepted_at
            FROM friendships
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_friendship))
    }

    /// Whether any relationship exists between the pair, in either direction
    pub async fn exists_between(&self, client_a: i64, client_b: i64) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1
            FROM friendships
            WHERE (requester_client_id = ?1 AND requested_client_id = ?2)
               OR (requester_client_id = ?2 AND requested_client_id = ?1)
            "#,
        )
        .bind(client_a)
        .bind(client_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Whether a pending invite exists between the pair, in either direction
    pub async fn pending_between(&self, client_a: i64, client_b: i64) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1
            FROM friendships
            WHERE ((requester_client_id = ?1 AND requested_client_id = ?2)
                OR (requester_client_id = ?2 AND requested_client_id = ?1))
              AND status = ?3
            "#,
        )
        .bind(client_a)
        .bind(client_b)
        .bind(FriendshipStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Persist a friendship's state transition
    pub async fn update(&self, friendship: &Friendship) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE friendships
            SET status = ?, accepted_at = ?
            WHERE id = ?
            "#,
        )
        .bind(friendship.status)
        .bind(friendship.accepted_at)
        .bind(friendship.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Hard-delete a friendship (decline or unfriend)
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM friendships WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Paginated listing joined with both users' name and email
    ///
    /// The JOIN avoids an N+1 lookup when rendering friend lists.
    pub async fn list_with_user_email_and_name(
        &self,
        filter: FriendshipFilter,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<FriendshipSummary>, i64)> {
        // When a participant filter is set the per-side filters are ignored.
        let (requester, requested) = if filter.participant_client_id.is_some() {
            (None, None)
        } else {
            (filter.requester_client_id, filter.requested_client_id)
        };

        let base = r#"
            FROM friendships f
            JOIN users u1 ON f.requester_client_id = u1.id
            JOIN users u2 ON f.requested_client_id = u2.id
            WHERE (?1 IS NULL OR f.requester_client_id = ?1 OR f.requested_client_id = ?1)
              AND (?2 IS NULL OR f.requester_client_id = ?2)
              AND (?3 IS NULL OR f.requested_client_id = ?3)
              AND (?4 IS NULL OR f.status = ?4)
        "#;

        let select_query = format!(
            "SELECT f.id, f.status, f.accepted_at, \
             f.requester_client_id, u1.name AS requester_name, u1.email AS requester_email, \
             f.requested_client_id, u2.name AS requested_name, u2.email AS requested_email \
             {base} ORDER BY f.id ASC LIMIT ?5 OFFSET ?6"
        );
        let count_query = format!("SELECT COUNT(*) {base}");

        let rows = sqlx::query(&select_query)
            .bind(filter.participant_client_id)
            .bind(requester)
            .bind(requested)
            .bind(filter.status)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.participant_client_id)
            .bind(requester)
            .bind(requested)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await?;

        let summaries = rows
            .into_iter()
            .map(|row| FriendshipSummary {
                id: row.get("id"),
                requester_client_id: row.get("requester_client_id"),
                requester_name: row.get("requester_name"),
                requester_email: row.get("requester_email"),
                requested_client_id: row.get("requested_client_id"),
                requested_name: row.get("requested_name"),
                requested_email: row.get("requested_email"),
                status: row.get("status"),
                accepted_at: row.get("accepted_at"),
            })
            .collect();

        Ok((summaries, total))
    }
}
