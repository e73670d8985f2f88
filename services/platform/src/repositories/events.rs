//! Event repository for database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::Result;
use crate::models::event::{Event, NewEvent};

/// Availability filter for event listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAvailability {
    All,
    WithTickets,
    SoldOut,
}

impl EventAvailability {
    fn as_str(&self) -> &'static str {
        match self {
            EventAvailability::All => "ALL",
            EventAvailability::WithTickets => "WITH_TICKETS",
            EventAvailability::SoldOut => "SOLD_OUT",
        }
    }
}

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

fn encode_staff_ids(staff_ids: &[i64]) -> String {
    staff_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_staff_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}

fn map_event(row: SqliteRow) -> Event {
    let staff_ids: String = row.get("staff_ids");
    Event {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        created_at: row.get("created_at"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        max_tickets: row.get("max_tickets"),
        tickets_redeemed: row.get("tickets_redeemed"),
        organizer_id: row.get("organizer_id"),
        staff_ids: decode_staff_ids(&staff_ids),
    }
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new event with an empty staff set and zero redemptions
    pub async fn create(&self, new_event: &NewEvent) -> Result<Event> {
        info!("Creating new event: {}", new_event.name);

        let result = sqlx::query(
            r#"
            INSERT INTO events
                (name, location, created_at, start_date, end_date, max_tickets, tickets_redeemed, organizer_id, staff_ids)
            VALUES (?, ?, ?, ?, ?, ?, 0, ?, '')
            "#,
        )
        .bind(&new_event.name)
        .bind(&new_event.location)
        .bind(new_event.created_at)
        .bind(new_event.start_date)
        .bind(new_event.end_date)
        .bind(new_event.max_tickets)
        .bind(new_event.organizer_id)
        .execute(&self.pool)
        .await?;

        Ok(Event {
            id: result.last_insert_rowid(),
            name: new_event.name.clone(),
            location: new_event.location.clone(),
            created_at: new_event.created_at,
            start_date: new_event.start_date,
            end_date: new_event.end_date,
            max_tickets: new_event.max_tickets,
            tickets_redeemed: 0,
            organizer_id: new_event.organizer_id,
            staff_ids: Vec::new(),
        })
    }

    /// Get an event by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Event>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, location, created_at, start_date, end_date,
                   max_tickets, tickets_redeemed, organizer_id, staff_ids
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_event))
    }

    /// Persist event edits (details, capacity, counter and staff set)
    pub async fn update(&self, event: &Event) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = ?, location = ?, start_date = ?, end_date = ?,
                max_tickets = ?, tickets_redeemed = ?, staff_ids = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.name)
        .bind(&event.location)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.max_tickets)
        .bind(event.tickets_redeemed)
        .bind(encode_staff_ids(&event.staff_ids))
        .bind(event.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete an event
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List events with pagination and an availability filter
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        availability: EventAvailability,
    ) -> Result<(Vec<Event>, i64)> {
        let base = r#"
            FROM events
            WHERE (?1 = 'ALL'
                OR (?1 = 'WITH_TICKETS' AND tickets_redeemed < max_tickets)
                OR (?1 = 'SOLD_OUT' AND tickets_redeemed >= max_tickets))
        "#;

        let select_query = format!(
            "SELECT id, name, location, created_at, start_date, end_date, \
             max_tickets, tickets_redeemed, organizer_id, staff_ids \
             {base} ORDER BY id ASC LIMIT ?2 OFFSET ?3"
        );
        let count_query = format!("SELECT COUNT(*) {base}");

        let rows = sqlx::query(&select_query)
            .bind(availability.as_str())
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(availability.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok((rows.into_iter().map(map_event).collect(), total))
    }
}
