//! Ticket repository for database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::Result;
use crate::models::ticket::{NewTicket, Ticket};

/// Ticket repository
#[derive(Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

fn map_ticket(row: SqliteRow) -> Ticket {
    Ticket {
        id: row.get("id"),
        event_id: row.get("event_id"),
        client_id: row.get("client_id"),
        code: row.get("code"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

impl TicketRepository {
    /// Create a new ticket repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a ticket by its code
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Ticket>> {
        let row = sqlx::query(
            r#"
            SELECT id, event_id, client_id, code, status, created_at
            FROM tickets
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_ticket))
    }

    /// Check whether a code is already taken
    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM tickets WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Atomically reserve capacity and insert a batch of tickets
    ///
    /// The capacity check and the counter increment are one conditional
    /// UPDATE: it only matches while `tickets_redeemed + n <= max_tickets`,
    /// so two concurrent redemptions cannot oversubscribe the last seats.
    /// Returns `None` (after rollback) when capacity is insufficient.
    pub async fn redeem_batch(
        &self,
        event_id: i64,
        tickets: &[NewTicket],
    ) -> Result<Option<Vec<Ticket>>> {
        let count = tickets.len() as i64;
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            r#"
            UPDATE events
            SET tickets_redeemed = tickets_redeemed + ?1
            WHERE id = ?2 AND tickets_redeemed + ?1 <= max_tickets
            "#,
        )
        .bind(count)
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let mut issued = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            let result = sqlx::query(
                r#"
                INSERT INTO tickets (event_id, client_id, code, status, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(ticket.event_id)
            .bind(ticket.client_id)
            .bind(&ticket.code)
            .bind(ticket.status)
            .bind(ticket.created_at)
            .execute(&mut *tx)
            .await?;

            issued.push(Ticket {
                id: result.last_insert_rowid(),
                event_id: ticket.event_id,
                client_id: ticket.client_id,
                code: ticket.code.clone(),
                status: ticket.status,
                created_at: ticket.created_at,
            });
        }

        tx.commit().await?;
        info!("Issued {} tickets for event {}", count, event_id);

        Ok(Some(issued))
    }

    /// Persist a ticket's status transition
    pub async fn update(&self, ticket: &Ticket) -> Result<()> {
        sqlx::query("UPDATE tickets SET status = ? WHERE id = ?")
            .bind(ticket.status)
            .bind(ticket.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List a client's tickets with pagination
    pub async fn list_by_client(
        &self,
        client_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Ticket>, i64)> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_id, client_id, code, status, created_at
            FROM tickets
            WHERE client_id = ?
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(client_id)
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE client_id = ?")
            .bind(client_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((rows.into_iter().map(map_ticket).collect(), total))
    }
}
