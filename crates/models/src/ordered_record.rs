use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::errors::ModelError;

/// One item of an ordered collection. `payload` holds the collection-specific fields.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordered_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub collection: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: Json,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Records of one collection, ascending by `display_order` (ties by creation time, then id).
pub fn find_in(collection: Collection) -> Select<Entity> {
    Entity::find()
        .filter(Column::Collection.eq(collection.slug()))
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
}

/// Highest `display_order` in `collection`, `None` when empty.
pub async fn max_display_order<C: ConnectionTrait>(db: &C, collection: Collection) -> Result<Option<i32>, DbErr> {
    let last = Entity::find()
        .filter(Column::Collection.eq(collection.slug()))
        .order_by_desc(Column::DisplayOrder)
        .one(db)
        .await?;
    Ok(last.map(|m| m.display_order))
}

/// Position appended after `max`: max + 1, or 0 when empty.
pub fn order_after(max: Option<i32>) -> Result<i32, ModelError> {
    match max {
        None => Ok(0),
        Some(m) => m
            .checked_add(1)
            .ok_or_else(|| ModelError::Validation(format!("display_order {m} leaves no room to append"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_after_appends_or_starts_at_zero() {
        assert_eq!(order_after(None).unwrap(), 0);
        assert_eq!(order_after(Some(7)).unwrap(), 8);
        assert!(matches!(order_after(Some(i32::MAX)), Err(ModelError::Validation(_))));
    }
}
