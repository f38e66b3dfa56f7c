//! Create `contact_info` table (single row edited from the admin area).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactInfo::Table)
                    .if_not_exists()
                    .col(uuid(ContactInfo::Id).primary_key())
                    .col(string_len(ContactInfo::Email, 256).not_null())
                    .col(string_len(ContactInfo::Phone, 64).not_null())
                    .col(string_len(ContactInfo::Location, 256).not_null())
                    .col(string_len_null(ContactInfo::Availability, 256))
                    .col(timestamp_with_time_zone(ContactInfo::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ContactInfo::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactInfo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactInfo {
    Table,
    Id,
    Email,
    Phone,
    Location,
    Availability,
    CreatedAt,
    UpdatedAt,
}
