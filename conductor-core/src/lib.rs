//! Client library for the Conductor bus-route assistant.
//!
//! This crate defines:
//! - Wire models for the backend's session/chat/bus endpoints
//! - An HTTP backend client and the trait seam for substituting it
//! - The session state machine with its one-shot expiry replay
//! - Map state kept in sync with chat replies and location updates
//!
//! The backend itself lives elsewhere; only its consumer side is here.

pub mod api;
pub mod client;
pub mod error;
pub mod map;
pub mod model;

pub use api::{ConductorBackend, HttpBackend};
pub use client::{Conductor, SUGGESTIONS};
pub use error::ConductorError;
