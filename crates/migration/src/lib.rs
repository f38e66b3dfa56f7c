//! Migrator registering table migrations in order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_ordered_record;
mod m20240601_000002_create_contact_info;
mod m20240601_000003_create_admin_user;
mod m20240601_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_ordered_record::Migration),
            Box::new(m20240601_000002_create_contact_info::Migration),
            Box::new(m20240601_000003_create_admin_user::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000010_add_indexes::Migration),
        ]
    }
}
