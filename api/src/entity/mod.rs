//! SeaORM entities
//!
//! Table mappings used by the PostgreSQL adapters. Domain code works with
//! the types in `domain::entities`; conversions live in the adapters.

pub mod users;
