//! Shared test fixtures: in-memory database, seeded users and events

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use platform::models::event::{Event, NewEvent};
use platform::models::user::{User, UserRole};
use platform::state::AppState;
use platform::usecases::RegisterUserInput;

/// Build an AppState on a fresh in-memory database
pub async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    common::database::initialize_schema(&pool)
        .await
        .expect("schema init failed");

    AppState::build(pool)
}

pub async fn register_user(state: &AppState, name: &str, email: &str, role: UserRole) -> User {
    state
        .register_user
        .execute(RegisterUserInput {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            role,
        })
        .await
        .expect("user registration failed")
}

pub async fn register_client(state: &AppState, email: &str) -> User {
    register_user(state, "Client", email, UserRole::Client).await
}

pub async fn register_organizer(state: &AppState, email: &str) -> User {
    register_user(state, "Organizer", email, UserRole::Organizer).await
}

pub async fn register_staff(state: &AppState, email: &str) -> User {
    register_user(state, "Staff", email, UserRole::Staff).await
}

/// Seed an event directly through the repository so tests can place its
/// validation window around the current time (the creation use case only
/// accepts future dates).
pub async fn seed_event(
    state: &AppState,
    organizer_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    max_tickets: i64,
) -> Event {
    let created_at = start - Duration::hours(24);
    let new_event = NewEvent::create(
        "Door Test Night",
        "Main Hall",
        start,
        end,
        max_tickets,
        organizer_id,
        created_at,
    )
    .expect("event factory failed");

    state
        .event_repository
        .create(&new_event)
        .await
        .expect("event insert failed")
}

/// An event currently inside its validation window
pub async fn seed_running_event(state: &AppState, organizer_id: i64, max_tickets: i64) -> Event {
    let now = Utc::now();
    seed_event(
        state,
        organizer_id,
        now - Duration::hours(1),
        now + Duration::hours(3),
        max_tickets,
    )
    .await
}
