mod common;

use assert_matches::assert_matches;
use common::{input, TestApp};
use pantry_tracker::errors::ServiceError;
use pantry_tracker::events::Event;

#[tokio::test]
async fn add_accumulates_quantity_and_replaces_other_fields() {
    let mut app = TestApp::new();

    app.service
        .add_item(input("milk", "2", "skim", "2024-01-01", "2024-01-10"))
        .await
        .expect("first add failed");
    app.service
        .add_item(input("milk", "3", "whole", "2024-01-05", "2024-01-20"))
        .await
        .expect("second add failed");

    let snapshot = app.service.list().await.expect("list failed");
    assert_eq!(snapshot.len(), 1, "expected one document, not two");
    let milk = &snapshot[0];
    assert_eq!(milk.quantity, 5);
    assert_eq!(milk.description, "whole");
    assert_eq!(milk.entry_date, "2024-01-05");
    assert_eq!(milk.expiry_date, "2024-01-20");

    assert_matches!(app.events.recv().await, Some(Event::ItemAdded { quantity: 2, .. }));
    assert_matches!(app.events.recv().await, Some(Event::ItemAdded { quantity: 3, .. }));
}

#[tokio::test]
async fn remove_decrements_by_one_and_keeps_the_document() {
    let mut app = TestApp::new();

    app.service
        .add_item(input("rice", "4", "", "", ""))
        .await
        .unwrap();
    app.service.remove_one("rice").await.unwrap();

    let snapshot = app.service.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].quantity, 3);

    app.events.recv().await.unwrap(); // the add
    assert_matches!(
        app.events.recv().await,
        Some(Event::ItemRemoved { remaining: 3, .. })
    );
}

#[tokio::test]
async fn remove_of_last_unit_deletes_the_document() {
    let mut app = TestApp::new();

    app.service
        .add_item(input("salt", "1", "", "", ""))
        .await
        .unwrap();
    app.service.remove_one("salt").await.unwrap();

    let snapshot = app.service.list().await.unwrap();
    assert!(
        !snapshot.iter().any(|item| item.name == "salt"),
        "zero-quantity document must not persist"
    );

    app.events.recv().await.unwrap(); // the add
    assert_matches!(app.events.recv().await, Some(Event::ItemDepleted { .. }));
}

#[tokio::test]
async fn remove_of_unknown_item_is_a_silent_no_op() {
    let mut app = TestApp::new();

    app.service
        .add_item(input("pasta", "2", "", "", ""))
        .await
        .unwrap();
    app.service.remove_one("no-such-item").await.unwrap();

    let snapshot = app.service.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "pasta");

    // Only the add emitted an event.
    assert_matches!(app.events.recv().await, Some(Event::ItemAdded { .. }));
    assert_matches!(app.events.try_recv(), Err(_));
}

#[tokio::test]
async fn update_overwrites_all_fields_including_quantity() {
    let mut app = TestApp::new();

    app.service
        .add_item(input("beans", "6", "black", "2024-03-01", "2025-03-01"))
        .await
        .unwrap();
    app.service
        .update_item(input("beans", "2", "pinto", "2024-04-01", "2025-04-01"))
        .await
        .unwrap();

    let snapshot = app.service.list().await.unwrap();
    let beans = &snapshot[0];
    assert_eq!(beans.quantity, 2, "update replaces, never accumulates");
    assert_eq!(beans.description, "pinto");
    assert_eq!(beans.entry_date, "2024-04-01");
    assert_eq!(beans.expiry_date, "2025-04-01");

    app.events.recv().await.unwrap();
    assert_matches!(
        app.events.recv().await,
        Some(Event::ItemUpdated { quantity: 2, .. })
    );
}

#[tokio::test]
async fn update_creates_the_document_when_absent() {
    let mut app = TestApp::new();

    app.service
        .update_item(input("honey", "1", "wildflower", "", ""))
        .await
        .unwrap();

    let snapshot = app.service.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "honey");
    assert_eq!(snapshot[0].quantity, 1);

    assert_matches!(app.events.recv().await, Some(Event::ItemUpdated { .. }));
}

#[tokio::test]
async fn add_rejects_invalid_quantity_text() {
    let mut app = TestApp::new();

    for quantity in ["", "abc", "1.5", "0", "-2"] {
        let err = app
            .service
            .add_item(input("flour", quantity, "", "", ""))
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::InvalidQuantity(_));
    }

    // Nothing was written and nothing emitted.
    assert!(app.service.list().await.unwrap().is_empty());
    assert_matches!(app.events.try_recv(), Err(_));
}

#[tokio::test]
async fn add_rejects_empty_name() {
    let app = TestApp::new();

    let err = app
        .service
        .add_item(input("", "3", "", "", ""))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidInput(_));
}

#[tokio::test]
async fn store_failures_propagate_unmodified() {
    let app = TestApp::new();

    app.service
        .add_item(input("oats", "2", "", "", ""))
        .await
        .unwrap();

    app.store.set_offline(true);
    assert_matches!(
        app.service.list().await.unwrap_err(),
        ServiceError::StoreUnavailable(_)
    );
    assert_matches!(
        app.service
            .add_item(input("oats", "1", "", "", ""))
            .await
            .unwrap_err(),
        ServiceError::StoreUnavailable(_)
    );
    assert_matches!(
        app.service.remove_one("oats").await.unwrap_err(),
        ServiceError::StoreUnavailable(_)
    );

    // Back online, the failed calls left the collection untouched.
    app.store.set_offline(false);
    let snapshot = app.service.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].quantity, 2);
}

#[tokio::test]
async fn full_lifecycle_add_then_consume_to_empty() {
    let app = TestApp::new();

    app.service
        .add_item(input("apple", "5", "fruit", "2024-01-01", "2024-02-01"))
        .await
        .unwrap();

    let snapshot = app.service.list().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "apple");
    assert_eq!(snapshot[0].quantity, 5);
    assert_eq!(snapshot[0].description, "fruit");

    for _ in 0..5 {
        app.service.remove_one("apple").await.unwrap();
    }

    assert!(app.service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_items_in_store_order() {
    let app = TestApp::new();

    for name in ["cumin", "anise", "basil"] {
        app.service
            .add_item(input(name, "1", "", "", ""))
            .await
            .unwrap();
    }

    let names: Vec<String> = app
        .service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, ["anise", "basil", "cumin"]);
}
