use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::models::{order, user};
use crate::tests::test_db;

async fn insert_at(
    db: &DatabaseConnection,
    user_id: i32,
    service: &str,
    created_at: chrono::DateTime<Utc>,
) -> order::Model {
    order::ActiveModel {
        user_id: Set(user_id),
        service: Set(service.to_string()),
        quantity: Set(1),
        total_price: Set(order::unit_price(service)),
        status: Set("Pending".to_string()),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn pricing_table_is_applied() {
    let db = test_db().await;
    let u = user::register(&db, "Alice", "a@x.com", "pw").await.unwrap();

    let wash = order::place(&db, u.id, "Wash", 3).await.unwrap();
    assert_eq!(wash.total_price, 150.0);
    assert_eq!(wash.status, "Pending");
    assert_eq!(wash.user_id, u.id);

    let dry = order::place(&db, u.id, "Dry", 2).await.unwrap();
    assert_eq!(dry.total_price, 64.0);

    let iron = order::place(&db, u.id, "Iron", 5).await.unwrap();
    assert_eq!(iron.total_price, 100.0);

    // Unknown services go through at zero rather than failing.
    let mystery = order::place(&db, u.id, "Mystery", 4).await.unwrap();
    assert_eq!(mystery.total_price, 0.0);
}

#[tokio::test]
async fn listings_are_newest_first() {
    let db = test_db().await;
    let alice = user::register(&db, "Alice", "a@x.com", "pw").await.unwrap();
    let bob = user::register(&db, "Bob", "b@x.com", "pw").await.unwrap();

    // Inserted out of chronological order on purpose.
    let t = |h| Utc.with_ymd_and_hms(2026, 8, 1, h, 0, 0).unwrap();
    let oldest = insert_at(&db, alice.id, "Wash", t(8)).await;
    let newest = insert_at(&db, bob.id, "Dry", t(12)).await;
    let middle = insert_at(&db, alice.id, "Iron", t(10)).await;

    let own = order::list_for_user(&db, alice.id).await.unwrap();
    assert_eq!(
        own.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![middle.id, oldest.id]
    );

    let all = order::list_all(&db).await.unwrap();
    assert_eq!(
        all.iter().map(|(o, _)| o.id).collect::<Vec<_>>(),
        vec![newest.id, middle.id, oldest.id]
    );
    assert_eq!(all[0].1, "Bob");
    assert_eq!(all[1].1, "Alice");
    assert_eq!(all[2].1, "Alice");
}

#[tokio::test]
async fn status_update_feeds_payment_flag() {
    let db = test_db().await;
    let u = user::register(&db, "Alice", "a@x.com", "pw").await.unwrap();
    let placed = order::place(&db, u.id, "Wash", 1).await.unwrap();

    let orders = order::list_for_user(&db, u.id).await.unwrap();
    assert!(!order::payment_allowed(&orders));

    order::set_status(&db, placed.id, "Completed").await.unwrap();

    let orders = order::list_for_user(&db, u.id).await.unwrap();
    assert_eq!(orders[0].status, "Completed");
    assert!(order::payment_allowed(&orders));
}

#[tokio::test]
async fn status_update_for_missing_order_is_a_noop() {
    let db = test_db().await;
    let u = user::register(&db, "Alice", "a@x.com", "pw").await.unwrap();
    let placed = order::place(&db, u.id, "Wash", 1).await.unwrap();

    order::set_status(&db, placed.id + 999, "Completed")
        .await
        .unwrap();

    let kept = order::Entity::find_by_id(placed.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.status, "Pending");
}

#[tokio::test]
async fn register_login_order_end_to_end() {
    let db = test_db().await;

    user::register(&db, "Alice", "a@x.com", "pw").await.unwrap();
    let alice = user::find_by_credentials(&db, "a@x.com", "pw")
        .await
        .unwrap()
        .expect("login should succeed");

    order::place(&db, alice.id, "Wash", 2).await.unwrap();

    let orders = order::list_for_user(&db, alice.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total_price, 100.0);
    assert_eq!(orders[0].status, "Pending");
}
