//! Event model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Event entity
///
/// `tickets_redeemed` is the running counter deducted from `max_tickets`;
/// it never exceeds the capacity. `staff_ids` is the set of staff users
/// granted validation rights at the door.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_tickets: i64,
    pub tickets_redeemed: i64,
    pub organizer_id: i64,
    pub staff_ids: Vec<i64>,
}

/// New event payload, validated by [`NewEvent::create`]
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_tickets: i64,
    pub organizer_id: i64,
}

impl NewEvent {
    /// Validate and build a new event
    ///
    /// Enforces the creation invariants: non-blank name and location,
    /// `end_date >= start_date`, neither date before `created_at`, a
    /// non-negative capacity and a positive organizer id.
    pub fn create(
        name: &str,
        location: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        max_tickets: i64,
        organizer_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name.to_string()));
        }
        if location.trim().is_empty() {
            return Err(Error::InvalidLocation(location.to_string()));
        }
        if end_date < start_date || start_date < created_at || end_date < created_at {
            return Err(Error::InvalidEventDates {
                start: start_date,
                end: end_date,
            });
        }
        if max_tickets < 0 {
            return Err(Error::InvalidTicketQuantity(max_tickets));
        }
        if organizer_id <= 0 {
            return Err(Error::InvalidOrganizerId(organizer_id));
        }

        Ok(NewEvent {
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            created_at,
            start_date,
            end_date,
            max_tickets,
            organizer_id,
        })
    }
}

impl Event {
    /// Tickets still available for redemption
    pub fn remaining_capacity(&self) -> i64 {
        (self.max_tickets - self.tickets_redeemed).max(0)
    }

    pub fn has_tickets(&self) -> bool {
        self.remaining_capacity() > 0
    }

    /// Whether `at` falls within the event's validation window
    pub fn is_running_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }

    /// Grant validation rights to a staff user, returning the updated event
    pub fn add_staff(&self, staff_id: i64) -> Result<Event> {
        if self.staff_ids.contains(&staff_id) {
            return Err(Error::StaffAlreadyAdded(staff_id));
        }
        let mut updated = self.clone();
        updated.staff_ids.push(staff_id);
        Ok(updated)
    }

    /// Revoke a staff user's validation rights, returning the updated event
    pub fn remove_staff(&self, staff_id: i64) -> Result<Event> {
        if !self.staff_ids.contains(&staff_id) {
            return Err(Error::StaffNotAssigned(staff_id));
        }
        let mut updated = self.clone();
        updated.staff_ids.retain(|id| *id != staff_id);
        Ok(updated)
    }
}
