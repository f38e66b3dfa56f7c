//! Create `ordered_record` table.
//! Every admin-ordered collection lives here, discriminated by `collection`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderedRecord::Table)
                    .if_not_exists()
                    .col(uuid(OrderedRecord::Id).primary_key())
                    .col(string_len(OrderedRecord::Collection, 64).not_null())
                    .col(json_binary(OrderedRecord::Payload).not_null())
                    .col(integer(OrderedRecord::DisplayOrder).not_null().default(0))
                    .col(timestamp_with_time_zone(OrderedRecord::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(OrderedRecord::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrderedRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum OrderedRecord {
    Table,
    Id,
    Collection,
    Payload,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}
