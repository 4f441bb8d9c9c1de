//! Core types for the NYC free events viewer.
//!
//! This crate provides everything shared by the CLI and the server:
//! - `Event`, the record returned by the city's open-data endpoint
//! - `query` for building the upstream `$where` predicate
//! - `exclusion` for dropping administrative and noisy listings
//! - `views` for grouping and filtering loaded events
//! - `view_state` for the reducer that drives a calendar front end

pub mod client;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod event;
pub mod exclusion;
pub mod query;
pub mod settings;
pub mod style;
pub mod view_state;
pub mod views;

pub use client::{EventSource, OpenDataClient};
pub use error::{NycEventsError, NycEventsResult};
pub use event::Event;
pub use query::EventQuery;
