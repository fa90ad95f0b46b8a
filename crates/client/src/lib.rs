//! # Quadra Client
//!
//! Client-side booking workflow for the court marketplace API. The crate
//! hosts the HTTP wrapper around the REST endpoints and the availability
//! view state machine a front end drives: pick a date, render the day's
//! slots, submit a booking, re-fetch on success.
//!
//! Two guarantees hold throughout:
//!
//! - every availability load carries a monotonically increasing sequence
//!   ticket, and a completion with a stale ticket is discarded, so an
//!   out-of-order response can never overwrite fresher state;
//! - booking failures never mutate the rendered slot list; only a fresh
//!   availability fetch does.

/// Client configuration from environment variables
pub mod config;
/// Client-side error taxonomy
pub mod error;
/// Address lookup with a bounded memo cache
pub mod geocode;
/// HTTP wrapper around the REST API
pub mod http;
/// Explicit session object (token + user)
pub mod sessao;
/// Availability and booking view state machine
pub mod view;
