//! Event lifecycle and staff management use cases

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::event::{Event, NewEvent};
use crate::models::user::{StaffSummary, UserRole};
use crate::repositories::{EventAvailability, EventRepository, UserRepository};
use crate::usecases::ensure_valid_page;

/// Event creation request
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    pub name: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_tickets: i64,
    pub organizer_id: i64,
}

/// Create an event owned by an organizer
#[derive(Clone)]
pub struct CreateEventUseCase {
    events: EventRepository,
    users: UserRepository,
}

impl CreateEventUseCase {
    pub fn new(events: EventRepository, users: UserRepository) -> Self {
        Self { events, users }
    }

    pub async fn execute(&self, input: CreateEventInput) -> Result<Event> {
        let organizer = self.users.find_by_id(input.organizer_id).await?;
        if !organizer.is_some_and(|u| u.role == UserRole::Organizer) {
            return Err(Error::InvalidOrganizerId(input.organizer_id));
        }

        let new_event = NewEvent::create(
            &input.name,
            &input.location,
            input.start_date,
            input.end_date,
            input.max_tickets,
            input.organizer_id,
            Utc::now(),
        )?;

        let created = self.events.create(&new_event).await?;
        info!("Event {} created by organizer {}", created.id, created.organizer_id);
        Ok(created)
    }
}

/// Event edit request; ownership and staff set are untouched by edits
#[derive(Debug, Clone)]
pub struct UpdateEventInput {
    pub event_id: i64,
    pub name: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_tickets: i64,
}

/// Edit an event's details, dates and capacity
#[derive(Clone)]
pub struct UpdateEventUseCase {
    events: EventRepository,
}

impl UpdateEventUseCase {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    pub async fn execute(&self, input: UpdateEventInput) -> Result<Event> {
        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(Error::EventNotFound(input.event_id))?;

        // Capacity can never drop below tickets already redeemed.
        if input.max_tickets < event.tickets_redeemed {
            return Err(Error::CapacityBelowRedeemed {
                requested: input.max_tickets,
                redeemed: event.tickets_redeemed,
            });
        }

        if input.end_date < Utc::now() {
            return Err(Error::PastDate(input.end_date));
        }

        let revalidated = NewEvent::create(
            &input.name,
            &input.location,
            input.start_date,
            input.end_date,
            input.max_tickets,
            event.organizer_id,
            event.created_at,
        )?;

        let updated = Event {
            id: event.id,
            name: revalidated.name,
            location: revalidated.location,
            created_at: revalidated.created_at,
            start_date: revalidated.start_date,
            end_date: revalidated.end_date,
            max_tickets: revalidated.max_tickets,
            tickets_redeemed: event.tickets_redeemed,
            organizer_id: event.organizer_id,
            staff_ids: event.staff_ids,
        };

        self.events.update(&updated).await?;
        Ok(updated)
    }
}

/// Event deletion request
#[derive(Debug, Clone)]
pub struct DeleteEventInput {
    pub event_id: i64,
}

/// Delete an event
#[derive(Clone)]
pub struct DeleteEventUseCase {
    events: EventRepository,
}

impl DeleteEventUseCase {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    pub async fn execute(&self, input: DeleteEventInput) -> Result<Event> {
        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(Error::EventNotFound(input.event_id))?;

        self.events.delete(event.id).await?;
        Ok(event)
    }
}

/// Event listing request
#[derive(Debug, Clone)]
pub struct ListEventsInput {
    pub page: i64,
    pub page_size: i64,
    pub availability: EventAvailability,
}

/// Paginated event listing with an availability filter
#[derive(Clone)]
pub struct ListEventsUseCase {
    events: EventRepository,
}

impl ListEventsUseCase {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    pub async fn execute(&self, input: ListEventsInput) -> Result<(Vec<Event>, i64)> {
        ensure_valid_page(input.page, input.page_size)?;
        self.events
            .list(input.page, input.page_size, input.availability)
            .await
    }
}

/// Staff grant/revoke request
#[derive(Debug, Clone)]
pub struct EventStaffInput {
    pub event_id: i64,
    pub staff_id: i64,
}

/// Grant a staff user validation rights on an event
#[derive(Clone)]
pub struct AddEventStaffUseCase {
    events: EventRepository,
    users: UserRepository,
}

impl AddEventStaffUseCase {
    pub fn new(events: EventRepository, users: UserRepository) -> Self {
        Self { events, users }
    }

    pub async fn execute(&self, input: EventStaffInput) -> Result<Event> {
        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(Error::EventNotFound(input.event_id))?;

        let staff = self.users.find_by_id(input.staff_id).await?;
        if !staff.is_some_and(|u| u.role == UserRole::Staff) {
            return Err(Error::UserIdNotFound(input.staff_id));
        }

        let updated = event.add_staff(input.staff_id)?;
        self.events.update(&updated).await?;

        info!("Staff {} added to event {}", input.staff_id, updated.id);
        Ok(updated)
    }
}

/// Revoke a staff user's validation rights on an event
#[derive(Clone)]
pub struct RemoveEventStaffUseCase {
    events: EventRepository,
}

impl RemoveEventStaffUseCase {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    pub async fn execute(&self, input: EventStaffInput) -> Result<Event> {
        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(Error::EventNotFound(input.event_id))?;

        let updated = event.remove_staff(input.staff_id)?;
        self.events.update(&updated).await?;
        Ok(updated)
    }
}

/// Staff listing request
#[derive(Debug, Clone, Default)]
pub struct ListEventStaffInput {
    pub page: i64,
    pub page_size: i64,
    pub event_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Paginated staff listing for events
#[derive(Clone)]
pub struct ListEventStaffUseCase {
    users: UserRepository,
}

impl ListEventStaffUseCase {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: ListEventStaffInput) -> Result<(Vec<StaffSummary>, i64)> {
        ensure_valid_page(input.page, input.page_size)?;
        self.users
            .list_staffs(
                input.page,
                input.page_size,
                input.event_id,
                input.name.as_deref(),
                input.email.as_deref(),
            )
            .await
    }
}
