//! Create `admin_user` table.
//! Holds the credentials allowed into the admin area; passwords are argon2 hashes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(uuid(AdminUser::Id).primary_key())
                    .col(string_len(AdminUser::Email, 256).not_null().unique_key())
                    .col(string_len(AdminUser::PasswordHash, 256).not_null())
                    .col(string_len(AdminUser::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone_null(AdminUser::LastLoginAt))
                    .col(timestamp_with_time_zone(AdminUser::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdminUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AdminUser {
    Table,
    Id,
    Email,
    PasswordHash,
    PasswordAlgorithm,
    LastLoginAt,
    CreatedAt,
}
