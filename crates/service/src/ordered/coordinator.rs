//! Drag-and-drop reorder state machine.
//!
//! `Idle -> Dragging(id) -> Committing -> Idle`. A drop applies the new order to
//! the in-memory list first, then persists it with one atomic `reorder`. When
//! persistence fails the list is restored and re-fetched from the store.

use std::sync::Arc;

use models::Collection;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::OrderedRecord;
use super::ordering::move_item;
use super::repository::OrderedRepository;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(Uuid),
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag in progress.
    Ignored,
    /// Dropped onto itself.
    Unchanged,
    Reordered,
}

pub struct ReorderCoordinator {
    repo: Arc<dyn OrderedRepository>,
    collection: Collection,
    items: Vec<OrderedRecord>,
    state: DragState,
}

impl ReorderCoordinator {
    pub fn new(repo: Arc<dyn OrderedRepository>, collection: Collection, items: Vec<OrderedRecord>) -> Self {
        Self { repo, collection, items, state: DragState::Idle }
    }

    /// Build a coordinator over the current stored order.
    pub async fn load(repo: Arc<dyn OrderedRepository>, collection: Collection) -> Result<Self, ServiceError> {
        let items = repo.list(collection).await?;
        Ok(Self::new(repo, collection, items))
    }

    pub fn items(&self) -> &[OrderedRecord] { &self.items }

    pub fn into_items(self) -> Vec<OrderedRecord> { self.items }

    pub fn state(&self) -> DragState { self.state }

    /// Start dragging `id`. Unknown ids are rejected; a drag during a commit is ignored.
    pub fn begin_drag(&mut self, id: Uuid) -> Result<(), ServiceError> {
        if self.state == DragState::Committing {
            return Ok(());
        }
        if !self.items.iter().any(|r| r.id == id) {
            return Err(ServiceError::not_found("record"));
        }
        self.state = DragState::Dragging(id);
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        if let DragState::Dragging(_) = self.state {
            self.state = DragState::Idle;
        }
    }

    /// Drop the dragged record onto `target`; it takes the target's index.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn drop_on(&mut self, target: Uuid) -> Result<DropOutcome, ServiceError> {
        let dragged = match self.state {
            DragState::Dragging(id) => id,
            DragState::Idle | DragState::Committing => return Ok(DropOutcome::Ignored),
        };
        if dragged == target {
            self.state = DragState::Idle;
            return Ok(DropOutcome::Unchanged);
        }
        let from = self.items.iter().position(|r| r.id == dragged);
        let to = self.items.iter().position(|r| r.id == target);
        let (Some(from), Some(to)) = (from, to) else {
            self.state = DragState::Idle;
            return Err(ServiceError::not_found("record"));
        };

        let snapshot = self.items.clone();
        move_item(&mut self.items, from, to);
        for (index, rec) in self.items.iter_mut().enumerate() {
            rec.display_order = index as i32;
        }
        self.state = DragState::Committing;

        let ids: Vec<Uuid> = self.items.iter().map(|r| r.id).collect();
        let result = self.repo.reorder(self.collection, &ids).await;
        self.state = DragState::Idle;
        match result {
            Ok(persisted) => {
                self.items = persisted;
                info!(%dragged, %target, from, to, "reorder_persisted");
                Ok(DropOutcome::Reordered)
            }
            Err(e) => {
                warn!(error = %e, "reorder_failed_restoring");
                self.items = snapshot;
                match self.repo.list(self.collection).await {
                    Ok(fresh) => self.items = fresh,
                    Err(refetch) => warn!(error = %refetch, "reorder_refetch_failed"),
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered::repository::mock::MockOrderedRepository;
    use serde_json::json;

    async fn setup(labels: &[&str]) -> (Arc<MockOrderedRepository>, Vec<Uuid>) {
        let repo = Arc::new(MockOrderedRepository::default());
        let mut ids = Vec::new();
        for label in labels {
            let rec = repo.create(Collection::HomepageStats, json!({"label": label, "value": "1"})).await.unwrap();
            ids.push(rec.id);
        }
        (repo, ids)
    }

    fn labels(items: &[OrderedRecord]) -> Vec<String> {
        items.iter().map(|r| r.text("label").unwrap_or_default().to_string()).collect()
    }

    #[tokio::test]
    async fn drag_last_onto_first() {
        let (repo, ids) = setup(&["A", "B", "C"]).await;
        let mut coord = ReorderCoordinator::load(repo.clone(), Collection::HomepageStats).await.unwrap();
        coord.begin_drag(ids[2]).unwrap();
        assert_eq!(coord.state(), DragState::Dragging(ids[2]));
        assert_eq!(coord.drop_on(ids[0]).await.unwrap(), DropOutcome::Reordered);
        assert_eq!(coord.state(), DragState::Idle);
        assert_eq!(labels(coord.items()), ["C", "A", "B"]);
        let orders: Vec<i32> = coord.items().iter().map(|r| r.display_order).collect();
        assert_eq!(orders, [0, 1, 2]);
        assert_eq!(repo.order_writes(), 3);

        let stored = repo.list(Collection::HomepageStats).await.unwrap();
        assert_eq!(labels(&stored), ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn self_drop_changes_nothing() {
        let (repo, ids) = setup(&["A", "B"]).await;
        let mut coord = ReorderCoordinator::load(repo.clone(), Collection::HomepageStats).await.unwrap();
        let before = coord.items().to_vec();
        coord.begin_drag(ids[1]).unwrap();
        assert_eq!(coord.drop_on(ids[1]).await.unwrap(), DropOutcome::Unchanged);
        assert_eq!(coord.items(), &before[..]);
        assert_eq!(repo.order_writes(), 0);
    }

    #[tokio::test]
    async fn cancelled_drag_returns_to_idle() {
        let (repo, ids) = setup(&["A", "B"]).await;
        let mut coord = ReorderCoordinator::load(repo.clone(), Collection::HomepageStats).await.unwrap();
        coord.begin_drag(ids[0]).unwrap();
        coord.cancel_drag();
        assert_eq!(coord.state(), DragState::Idle);
        assert_eq!(coord.drop_on(ids[1]).await.unwrap(), DropOutcome::Ignored);
        assert_eq!(labels(coord.items()), ["A", "B"]);
        assert_eq!(repo.order_writes(), 0);
    }

    #[tokio::test]
    async fn drop_without_drag_is_ignored() {
        let (repo, ids) = setup(&["A", "B"]).await;
        let mut coord = ReorderCoordinator::load(repo.clone(), Collection::HomepageStats).await.unwrap();
        assert_eq!(coord.drop_on(ids[0]).await.unwrap(), DropOutcome::Ignored);
        assert_eq!(repo.order_writes(), 0);
    }

    #[tokio::test]
    async fn failed_commit_restores_and_refetches() {
        let (repo, ids) = setup(&["A", "B", "C"]).await;
        let mut coord = ReorderCoordinator::load(repo.clone(), Collection::HomepageStats).await.unwrap();
        repo.fail_next_reorder();
        coord.begin_drag(ids[0]).unwrap();
        let err = coord.drop_on(ids[2]).await.unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
        assert_eq!(coord.state(), DragState::Idle);
        assert_eq!(labels(coord.items()), ["A", "B", "C"]);
        assert_eq!(repo.order_writes(), 0);
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected() {
        let (repo, ids) = setup(&["A"]).await;
        let mut coord = ReorderCoordinator::load(repo, Collection::HomepageStats).await.unwrap();
        assert!(coord.begin_drag(Uuid::new_v4()).is_err());
        coord.begin_drag(ids[0]).unwrap();
        assert!(coord.drop_on(Uuid::new_v4()).await.is_err());
        assert_eq!(coord.state(), DragState::Idle);
    }
}
