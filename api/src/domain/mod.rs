//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `query`: Listing filters, sort keys and pagination

pub mod entities;
pub mod ports;
pub mod query;
