//! # Quadra Core
//!
//! Domain types shared by every crate in the workspace: courts, bookings,
//! monthly subscriptions, availability payloads, and the wall-clock time
//! utilities the slot computation is built on.

/// Domain error types
pub mod errors;
/// Domain models and wire DTOs
pub mod models;
/// Wall-clock time and hourly slot utilities
pub mod time;
