//! Event-management platform core
//!
//! Users register as clients, organizers or staff; organizers create
//! events with a ticket capacity; clients befriend each other and redeem
//! tickets; staff and organizers validate redeemed tickets at the door.
//! The desktop UI consumes the use cases through [`state::AppState`].

pub mod email;
pub mod error;
pub mod models;
pub mod repositories;
pub mod state;
pub mod templates;
pub mod usecases;
pub mod validation;
