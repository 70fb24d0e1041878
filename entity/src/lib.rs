//! SeaORM entity models for the cadence schedule domain.
//!
//! Each module maps one database table. The `prelude` re-exports every entity
//! under its table name for use in queries and schema setup.

pub mod prelude;
pub mod schedule;
pub mod schedule_message;
pub mod schedule_tag;
