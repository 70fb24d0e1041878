//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories automatically handle dependencies and foreign
//! key relationships, making tests more concise and maintainable.
//!
//! # Overview
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let schedule = factory::schedule::create_schedule(&db).await?;
//!
//!     // Create a schedule with a pre-filled backlog
//!     let (schedule, messages) =
//!         factory::helpers::create_schedule_with_backlog(&db, 3).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let schedule = factory::schedule::ScheduleFactory::new(&db)
//!     .title("Daily Questions")
//!     .format("Today: ${message}")
//!     .post_channel_id(Some("200".to_string()))
//!     .active(true)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `schedule` - Create schedule entities
//! - `schedule_message` - Create schedule message entities
//! - `schedule_tag` - Create schedule tag entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod helpers;
pub mod schedule;
pub mod schedule_message;
pub mod schedule_tag;

// Re-export commonly used factory functions for concise usage
pub use schedule::create_schedule;
pub use schedule_message::create_schedule_message;
pub use schedule_tag::create_schedule_tag;
