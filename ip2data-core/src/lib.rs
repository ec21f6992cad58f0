//! Core library for the IP2Data dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - Typed clients for the upstream services (IP echo, geolocation,
//!   weather, air quality, country facts)
//! - The aggregation pipeline that merges them into one dashboard payload
//!
//! It is used by `ip2data-server`, but can also be reused by other binaries
//! or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ip;
pub mod model;
pub mod upstream;

pub use aggregate::Aggregator;
pub use config::Config;
pub use error::AggregateError;
pub use model::Dashboard;
