pub use sea_orm_migration::prelude::*;

mod m20260112_000001_create_schedule_table;
mod m20260112_000002_create_schedule_message_table;
mod m20260112_000003_create_schedule_tag_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260112_000001_create_schedule_table::Migration),
            Box::new(m20260112_000002_create_schedule_message_table::Migration),
            Box::new(m20260112_000003_create_schedule_tag_table::Migration),
        ]
    }
}
