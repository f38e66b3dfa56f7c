use async_trait::async_trait;
use chrono::Utc;
use models::{ordered_record, Collection};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::ordered::domain::{apply_patch, prepare_payload, OrderedRecord, RecordPatch};
use crate::ordered::ordering::check_permutation;
use crate::ordered::repository::OrderedRepository;

pub struct SeaOrmOrderedRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderedRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_records(rows: Vec<ordered_record::Model>) -> Result<Vec<OrderedRecord>, ServiceError> {
    rows.into_iter().map(OrderedRecord::try_from).collect()
}

#[async_trait]
impl OrderedRepository for SeaOrmOrderedRepository {
    async fn list(&self, collection: Collection) -> Result<Vec<OrderedRecord>, ServiceError> {
        let rows = ordered_record::find_in(collection).all(&self.db).await.map_err(ServiceError::from_db)?;
        to_records(rows)
    }

    #[instrument(skip(self, payload), fields(collection = %collection))]
    async fn create(&self, collection: Collection, payload: Value) -> Result<OrderedRecord, ServiceError> {
        let payload = prepare_payload(collection, payload)?;
        let max = ordered_record::max_display_order(&self.db, collection)
            .await
            .map_err(ServiceError::from_db)?;
        let next = ordered_record::order_after(max)?;
        let now = Utc::now().into();
        let am = ordered_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            collection: Set(collection.slug().to_string()),
            payload: Set(Value::Object(payload)),
            display_order: Set(next),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await.map_err(ServiceError::from_db)?;
        debug!(id = %created.id, display_order = next, "record_created");
        OrderedRecord::try_from(created)
    }

    #[instrument(skip(self, patch), fields(collection = %collection, id = %id))]
    async fn update(&self, collection: Collection, id: Uuid, patch: RecordPatch) -> Result<OrderedRecord, ServiceError> {
        let found = ordered_record::Entity::find_by_id(id)
            .filter(ordered_record::Column::Collection.eq(collection.slug()))
            .one(&self.db)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::not_found("record"))?;
        let current = OrderedRecord::try_from(found.clone())?;
        let merged = apply_patch(collection, &current.payload, patch.fields)?;

        let mut am: ordered_record::ActiveModel = found.into();
        am.payload = Set(Value::Object(merged));
        if let Some(order) = patch.display_order {
            am.display_order = Set(order);
        }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(ServiceError::from_db)?;
        OrderedRecord::try_from(updated)
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), ServiceError> {
        let res = ordered_record::Entity::delete_many()
            .filter(ordered_record::Column::Id.eq(id))
            .filter(ordered_record::Column::Collection.eq(collection.slug()))
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("record"));
        }
        Ok(())
    }

    #[instrument(skip(self, ids), fields(collection = %collection, n = ids.len()))]
    async fn reorder(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<OrderedRecord>, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::from_db)?;
        let current: Vec<Uuid> = ordered_record::find_in(collection)
            .all(&txn)
            .await
            .map_err(ServiceError::from_db)?
            .into_iter()
            .map(|m| m.id)
            .collect();
        // Dropping `txn` without commit rolls back
        check_permutation(&current, ids)?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        for (index, id) in ids.iter().enumerate() {
            ordered_record::Entity::update_many()
                .col_expr(ordered_record::Column::DisplayOrder, Expr::value(index as i32))
                .col_expr(ordered_record::Column::UpdatedAt, Expr::value(now))
                .filter(ordered_record::Column::Id.eq(*id))
                .exec(&txn)
                .await
                .map_err(ServiceError::from_db)?;
        }
        txn.commit().await.map_err(ServiceError::from_db)?;
        debug!("reorder_committed");
        self.list(collection).await
    }

    async fn count(&self, collection: Collection) -> Result<u64, ServiceError> {
        ordered_record::Entity::find()
            .filter(ordered_record::Column::Collection.eq(collection.slug()))
            .count(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn reorder_round_trip_against_postgres() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmOrderedRepository::new(db);
        // Start from an empty collection so the permutation is complete
        for rec in repo.list(Collection::AboutJourney).await.unwrap() {
            repo.delete(Collection::AboutJourney, rec.id).await.unwrap();
        }
        let a = repo.create(Collection::AboutJourney, json!({"year": "2019", "title": "Start"})).await.unwrap();
        let b = repo.create(Collection::AboutJourney, json!({"year": "2021", "title": "Studio"})).await.unwrap();
        let c = repo.create(Collection::AboutJourney, json!({"year": "2024", "title": "Team"})).await.unwrap();
        assert_eq!((a.display_order, b.display_order, c.display_order), (0, 1, 2));

        let list = repo.reorder(Collection::AboutJourney, &[c.id, a.id, b.id]).await.unwrap();
        let ids: Vec<Uuid> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);

        let err = repo.reorder(Collection::AboutJourney, &[a.id, b.id]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        for id in [a.id, b.id, c.id] {
            repo.delete(Collection::AboutJourney, id).await.unwrap();
        }
        assert_eq!(repo.count(Collection::AboutJourney).await.unwrap(), 0);
    }
}
