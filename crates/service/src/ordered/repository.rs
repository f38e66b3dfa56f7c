use async_trait::async_trait;
use models::Collection;
use serde_json::Value;
use uuid::Uuid;

use super::domain::{OrderedRecord, RecordPatch};
use crate::errors::ServiceError;

/// Uniform persistence for every ordered collection.
#[async_trait]
pub trait OrderedRepository: Send + Sync {
    /// All records ascending by `display_order`, ties by `created_at` then `id`.
    async fn list(&self, collection: Collection) -> Result<Vec<OrderedRecord>, ServiceError>;
    /// Validate and append at the end (`max + 1`, or 0 when empty).
    async fn create(&self, collection: Collection, payload: Value) -> Result<OrderedRecord, ServiceError>;
    async fn update(&self, collection: Collection, id: Uuid, patch: RecordPatch) -> Result<OrderedRecord, ServiceError>;
    /// Permanent removal; siblings keep their positions.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), ServiceError>;
    /// Atomically assign `display_order = index` following `ids`, which must be a
    /// permutation of the collection. Returns the reordered list.
    async fn reorder(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<OrderedRecord>, ServiceError>;
    async fn count(&self, collection: Collection) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use crate::ordered::domain::{apply_patch, prepare_payload};
    use crate::ordered::ordering::check_permutation;

    #[derive(Default)]
    pub struct MockOrderedRepository {
        records: Mutex<Vec<OrderedRecord>>,
        order_writes: AtomicUsize,
        fail_reorder: AtomicBool,
        unavailable: AtomicBool,
    }

    impl MockOrderedRepository {
        /// Number of `display_order` writes performed so far.
        pub fn order_writes(&self) -> usize {
            self.order_writes.load(Ordering::SeqCst)
        }

        /// Make the next `reorder` call fail without touching the data.
        pub fn fail_next_reorder(&self) {
            self.fail_reorder.store(true, Ordering::SeqCst);
        }

        /// Simulate a store outage for every call.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        /// Insert a record with an explicit position, bypassing validation.
        pub fn seed(&self, collection: Collection, payload: Value, display_order: i32) -> OrderedRecord {
            let now = Utc::now();
            let rec = OrderedRecord {
                id: Uuid::new_v4(),
                collection,
                display_order,
                created_at: now,
                updated_at: now,
                payload: payload.as_object().cloned().unwrap_or_default(),
            };
            self.records.lock().unwrap().push(rec.clone());
            rec
        }

        fn check_up(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::StoreUnavailable("mock store is down".into()));
            }
            Ok(())
        }

        fn sorted(&self, collection: Collection) -> Vec<OrderedRecord> {
            let records = self.records.lock().unwrap();
            let mut out: Vec<OrderedRecord> = records.iter().filter(|r| r.collection == collection).cloned().collect();
            out.sort_by(|a, b| {
                (a.display_order, a.created_at, a.id).cmp(&(b.display_order, b.created_at, b.id))
            });
            out
        }
    }

    #[async_trait]
    impl OrderedRepository for MockOrderedRepository {
        async fn list(&self, collection: Collection) -> Result<Vec<OrderedRecord>, ServiceError> {
            self.check_up()?;
            Ok(self.sorted(collection))
        }

        async fn create(&self, collection: Collection, payload: Value) -> Result<OrderedRecord, ServiceError> {
            self.check_up()?;
            let payload = prepare_payload(collection, payload)?;
            let mut records = self.records.lock().unwrap();
            let max = records.iter().filter(|r| r.collection == collection).map(|r| r.display_order).max();
            let next = models::ordered_record::order_after(max)?;
            let now = Utc::now();
            let rec = OrderedRecord { id: Uuid::new_v4(), collection, display_order: next, created_at: now, updated_at: now, payload };
            records.push(rec.clone());
            Ok(rec)
        }

        async fn update(&self, collection: Collection, id: Uuid, patch: RecordPatch) -> Result<OrderedRecord, ServiceError> {
            self.check_up()?;
            let mut records = self.records.lock().unwrap();
            let rec = records
                .iter_mut()
                .find(|r| r.id == id && r.collection == collection)
                .ok_or_else(|| ServiceError::not_found("record"))?;
            rec.payload = apply_patch(collection, &rec.payload, patch.fields)?;
            if let Some(order) = patch.display_order {
                rec.display_order = order;
                self.order_writes.fetch_add(1, Ordering::SeqCst);
            }
            rec.updated_at = Utc::now();
            Ok(rec.clone())
        }

        async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), ServiceError> {
            self.check_up()?;
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| !(r.id == id && r.collection == collection));
            if records.len() == before {
                return Err(ServiceError::not_found("record"));
            }
            Ok(())
        }

        async fn reorder(&self, collection: Collection, ids: &[Uuid]) -> Result<Vec<OrderedRecord>, ServiceError> {
            self.check_up()?;
            if self.fail_reorder.swap(false, Ordering::SeqCst) {
                return Err(ServiceError::StoreUnavailable("injected reorder failure".into()));
            }
            let current: Vec<Uuid> = self.sorted(collection).iter().map(|r| r.id).collect();
            check_permutation(&current, ids)?;
            {
                let mut records = self.records.lock().unwrap();
                let now = Utc::now();
                for (index, id) in ids.iter().enumerate() {
                    if let Some(rec) = records.iter_mut().find(|r| r.id == *id) {
                        rec.display_order = index as i32;
                        rec.updated_at = now;
                        self.order_writes.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
            Ok(self.sorted(collection))
        }

        async fn count(&self, collection: Collection) -> Result<u64, ServiceError> {
            self.check_up()?;
            Ok(self.sorted(collection).len() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockOrderedRepository;
    use super::*;
    use serde_json::json;

    fn stat(label: &str) -> Value {
        json!({"label": label, "value": "1"})
    }

    #[tokio::test]
    async fn create_appends_after_max() {
        let repo = MockOrderedRepository::default();
        let first = repo.create(Collection::HomepageStats, stat("a")).await.unwrap();
        assert_eq!(first.display_order, 0);
        repo.seed(Collection::HomepageStats, stat("b"), 7);
        let next = repo.create(Collection::HomepageStats, stat("c")).await.unwrap();
        assert_eq!(next.display_order, 8);
        let other = repo.create(Collection::AboutValues, json!({"title": "t", "description": "d"})).await.unwrap();
        assert_eq!(other.display_order, 0);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let repo = MockOrderedRepository::default();
        let err = repo.create(Collection::HomepageStats, json!({"label": "only"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert_eq!(repo.count(Collection::HomepageStats).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_keeps_gaps_and_missing_is_not_found() {
        let repo = MockOrderedRepository::default();
        let a = repo.create(Collection::HomepageStats, stat("a")).await.unwrap();
        let b = repo.create(Collection::HomepageStats, stat("b")).await.unwrap();
        let c = repo.create(Collection::HomepageStats, stat("c")).await.unwrap();
        repo.delete(Collection::HomepageStats, b.id).await.unwrap();
        let orders: Vec<(Uuid, i32)> = repo
            .list(Collection::HomepageStats)
            .await
            .unwrap()
            .iter()
            .map(|r| (r.id, r.display_order))
            .collect();
        assert_eq!(orders, vec![(a.id, 0), (c.id, 2)]);
        let err = repo.delete(Collection::HomepageStats, b.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_touches_order_only_when_given() {
        let repo = MockOrderedRepository::default();
        let a = repo
            .create(Collection::StockVideos, json!({"title": "Clip", "category": "Nature", "video_url": "https://v/1"}))
            .await
            .unwrap();
        let patch = RecordPatch::from_json(json!({"is_free": true})).unwrap();
        let updated = repo.update(Collection::StockVideos, a.id, patch).await.unwrap();
        assert!(updated.flag("is_free"));
        assert_eq!(updated.display_order, 0);
        assert_eq!(repo.order_writes(), 0);

        let patch = RecordPatch::from_json(json!({"display_order": 5})).unwrap();
        let moved = repo.update(Collection::StockVideos, a.id, patch).await.unwrap();
        assert_eq!(moved.display_order, 5);
        assert_eq!(repo.order_writes(), 1);

        let err = repo.update(Collection::StockVideos, Uuid::new_v4(), RecordPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn reorder_writes_each_record_once() {
        let repo = MockOrderedRepository::default();
        let a = repo.create(Collection::HomepageStats, stat("a")).await.unwrap();
        let b = repo.create(Collection::HomepageStats, stat("b")).await.unwrap();
        let c = repo.create(Collection::HomepageStats, stat("c")).await.unwrap();
        let list = repo.reorder(Collection::HomepageStats, &[c.id, a.id, b.id]).await.unwrap();
        let ids: Vec<Uuid> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
        let orders: Vec<i32> = list.iter().map(|r| r.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(repo.order_writes(), 3);
    }

    #[tokio::test]
    async fn create_after_max_order_is_rejected() {
        let repo = MockOrderedRepository::default();
        let a = repo.create(Collection::HomepageStats, stat("a")).await.unwrap();
        let patch = RecordPatch::from_json(json!({"display_order": i32::MAX})).unwrap();
        repo.update(Collection::HomepageStats, a.id, patch).await.unwrap();

        let err = repo.create(Collection::HomepageStats, stat("b")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(models::errors::ModelError::Validation(_))));
        assert_eq!(repo.count(Collection::HomepageStats).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_is_stable_with_tied_orders() {
        let repo = MockOrderedRepository::default();
        let a = repo.seed(Collection::HomepageStats, stat("a"), 1);
        let b = repo.seed(Collection::HomepageStats, stat("b"), 1);
        let c = repo.seed(Collection::HomepageStats, stat("c"), 0);
        let first: Vec<Uuid> = repo.list(Collection::HomepageStats).await.unwrap().iter().map(|r| r.id).collect();
        let second: Vec<Uuid> = repo.list(Collection::HomepageStats).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], c.id);
        let (x, y) = if (a.created_at, a.id) < (b.created_at, b.id) { (a.id, b.id) } else { (b.id, a.id) };
        assert_eq!(&first[1..], &[x, y]);
    }

    #[tokio::test]
    async fn unavailable_store_surfaces() {
        let repo = MockOrderedRepository::default();
        repo.set_unavailable(true);
        let err = repo.list(Collection::Reels).await.unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    }
}
