//! Common library for the event platform
//!
//! This crate provides shared functionality used by the platform service:
//! database connectivity, schema creation and error handling.

pub mod database;
pub mod error;
