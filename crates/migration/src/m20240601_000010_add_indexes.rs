use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_ordered_record::OrderedRecord;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing is always "one collection, by display_order"
        manager
            .create_index(
                Index::create()
                    .name("idx_ordered_record_collection_order")
                    .table(OrderedRecord::Table)
                    .col(OrderedRecord::Collection)
                    .col(OrderedRecord::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ordered_record_collection_order")
                    .table(OrderedRecord::Table)
                    .to_owned(),
            )
            .await
    }
}
