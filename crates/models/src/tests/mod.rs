//! Round trips against a live Postgres. Skipped when `SKIP_DB_TESTS` is set,
//! `DATABASE_URL` is missing or the database is unreachable.

use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

use crate::{db, ordered_record, Collection};

async fn setup_test_db() -> Option<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn record(collection: Collection, order: i32) -> ordered_record::ActiveModel {
    let now = Utc::now().into();
    ordered_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        collection: Set(collection.slug().to_string()),
        payload: Set(json!({"label": format!("stat {order}"), "value": "1"})),
        display_order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn max_display_order_is_scoped_to_collection() {
    let Some(db) = setup_test_db().await else { return };
    let txn = db.begin().await.expect("begin");

    // Only rows inside the transaction are visible to it, other test data may exist.
    let base = ordered_record::order_after(
        ordered_record::max_display_order(&txn, Collection::HomepageStats).await.expect("max"),
    )
    .expect("next");
    record(Collection::HomepageStats, base + 4).insert(&txn).await.expect("insert");
    record(Collection::AboutTools, base + 40).insert(&txn).await.expect("insert other");

    let max = ordered_record::max_display_order(&txn, Collection::HomepageStats).await.expect("max");
    assert_eq!(max, Some(base + 4));

    txn.rollback().await.expect("rollback");
}

#[tokio::test]
async fn find_in_orders_ascending() {
    let Some(db) = setup_test_db().await else { return };
    let txn = db.begin().await.expect("begin");

    let a = record(Collection::AboutValues, 2).insert(&txn).await.expect("a");
    let b = record(Collection::AboutValues, 1).insert(&txn).await.expect("b");

    let rows = ordered_record::find_in(Collection::AboutValues).all(&txn).await.expect("list");
    let pos_a = rows.iter().position(|r| r.id == a.id).expect("a listed");
    let pos_b = rows.iter().position(|r| r.id == b.id).expect("b listed");
    assert!(pos_b < pos_a);
    assert!(ordered_record::Entity::find_by_id(a.id).one(&txn).await.expect("find").is_some());

    txn.rollback().await.expect("rollback");
}
