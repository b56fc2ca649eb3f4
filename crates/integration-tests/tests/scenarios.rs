//! Cross-service workflows over the in-memory marketplace.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use marketplace_core::{
    OrderNumber, ProductFieldUpdate, ResultTable, UserFieldUpdate, UserRole, WarehouseId,
};
use marketplace_integration_tests::{cents, seed, seeded_memory, session};
use marketplace_service::services::{
    AdminService, CatalogService, InventoryService, OrderingService, ReportService, SessionService,
};
use marketplace_service::{Marketplace, WorkflowError};

#[tokio::test]
async fn customer_browses_orders_and_reviews() {
    let db = seeded_memory();

    let alice = SessionService::new(&db).login("alice", "pw").await.unwrap();
    assert_eq!(alice.user_id, seed::CUSTOMER);

    let stores = CatalogService::new(&db).nearby_stores(&alice).await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].store_id, seed::NEAR_STORE);

    let products = CatalogService::new(&db)
        .products(stores[0].store_id)
        .await
        .unwrap();
    assert_eq!(products.len(), 2);

    let ordering = OrderingService::new(&db);
    let first = ordering
        .place_order(&alice, seed::NEAR_STORE, "Widget", 2)
        .await
        .unwrap();
    let second = ordering
        .place_order(&alice, seed::NEAR_STORE, "Gadget", 1)
        .await
        .unwrap();
    assert_eq!(first.number, OrderNumber::new(1));
    assert!(second.number > first.number);

    let recent = ReportService::new(&db).recent_orders(&alice).await.unwrap();
    let numbers: Vec<OrderNumber> = recent.iter().map(|o| o.number).collect();
    assert_eq!(numbers, [second.number, first.number]);

    let table = ResultTable::from_rows(&recent);
    assert_eq!(table.headers()[0], "orderNumber");
    assert_eq!(table.len(), 2);
}

#[tokio::test]
async fn out_of_range_order_leaves_orders_untouched() {
    let db = seeded_memory();
    let alice = session(seed::CUSTOMER, "alice");

    let result = OrderingService::new(&db)
        .place_order(&alice, seed::FAR_STORE, "Widget", 1)
        .await;

    assert!(matches!(result, Err(WorkflowError::OutOfRange { .. })));
    assert!(db.orders().await.is_empty());
    assert!(ReportService::new(&db).popular_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_orders_get_distinct_numbers() {
    let db = Arc::new(seeded_memory());
    let alice = session(seed::CUSTOMER, "alice");

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let db = Arc::clone(&db);
            let alice = alice.clone();
            tokio::spawn(async move {
                OrderingService::new(&*db)
                    .place_order(&alice, seed::NEAR_STORE, "Widget", 1)
                    .await
                    .map(|o| o.number)
            })
        })
        .collect();

    let mut numbers = HashSet::new();
    for handle in handles {
        numbers.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(numbers.len(), 20);
    assert_eq!(numbers.iter().max(), Some(&OrderNumber::new(20)));
}

#[tokio::test]
async fn supply_request_of_five_leaves_five() {
    let db = seeded_memory();
    let mallory = session(seed::MANAGER, "mallory");

    let receipt = InventoryService::new(&db)
        .place_supply_request(&mallory, seed::NEAR_STORE, "Widget", 5, WarehouseId::new(1))
        .await
        .unwrap();

    assert_eq!(receipt.remaining_units, Some(5));
    let widget = db
        .get_product(seed::NEAR_STORE, "Widget")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(widget.units, 5);
}

#[tokio::test]
async fn non_managers_mutate_nothing() {
    let db = seeded_memory();
    let inventory = InventoryService::new(&db);

    for actor in [session(seed::CUSTOMER, "alice"), session(seed::ADMIN, "root")] {
        let update = inventory
            .update_product(&actor, seed::NEAR_STORE, "Widget", 0, cents(1))
            .await;
        let supply = inventory
            .place_supply_request(&actor, seed::NEAR_STORE, "Widget", 5, WarehouseId::new(1))
            .await;
        assert!(matches!(update, Err(WorkflowError::AuthorizationDenied { .. })));
        assert!(matches!(supply, Err(WorkflowError::AuthorizationDenied { .. })));
    }

    let widget = db
        .get_product(seed::NEAR_STORE, "Widget")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(widget.units, 10);
    assert_eq!(widget.price, cents(250));
    assert!(db.supply_requests().await.is_empty());
    assert!(db.product_updates().await.is_empty());
}

#[tokio::test]
async fn promoted_customer_can_manage() {
    let db = seeded_memory();
    let root = session(seed::ADMIN, "root");
    let alice = session(seed::CUSTOMER, "alice");

    AdminService::new(&db)
        .apply_override(
            &root,
            seed::CUSTOMER,
            &UserFieldUpdate::Role(UserRole::Manager),
            seed::NEAR_STORE,
            "Gadget",
            &ProductFieldUpdate::NumberOfUnits(30),
        )
        .await
        .unwrap();

    let product = InventoryService::new(&db)
        .update_product(&alice, seed::NEAR_STORE, "Gadget", 25, cents(899))
        .await
        .unwrap();
    assert_eq!(product.units, 25);

    let updates = ReportService::new(&db).recent_updates().await.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].manager_id, seed::CUSTOMER);
}

#[tokio::test]
async fn reports_cap_at_five_rows_sorted_descending() {
    let mut db = seeded_memory();
    for (i, product) in ["a", "b", "c", "d", "e", "f", "g"].into_iter().enumerate() {
        for _ in 0..=i {
            db.add_order(seed::CUSTOMER, seed::NEAR_STORE, product, 1);
        }
    }
    db.add_order(seed::MANAGER, seed::NEAR_STORE, "a", 1);

    let reports = ReportService::new(&db);

    let products = reports.popular_products().await.unwrap();
    assert_eq!(products.len(), 5);
    assert!(products.windows(2).all(|p| p[0].order_count >= p[1].order_count));
    assert_eq!(products[0].product_name, "g");

    let customers = reports.popular_customers().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].customer_id, seed::CUSTOMER);
    assert!(customers.windows(2).all(|p| p[0].order_count >= p[1].order_count));

    let recent = reports
        .recent_orders(&session(seed::CUSTOMER, "alice"))
        .await
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.windows(2).all(|p| p[0].placed_at >= p[1].placed_at));
}

#[tokio::test]
async fn field_input_is_taken_as_given() {
    let db = seeded_memory();

    let receipt = InventoryService::new(&db)
        .place_supply_request(
            &session(seed::MANAGER, "mallory"),
            seed::NEAR_STORE,
            "Widget",
            -5,
            WarehouseId::new(1),
        )
        .await
        .unwrap();
    assert_eq!(receipt.remaining_units, Some(15));

    let order = OrderingService::new(&db)
        .place_order(&session(seed::CUSTOMER, "alice"), seed::NEAR_STORE, "Widget", 0)
        .await
        .unwrap();
    assert_eq!(order.units, 0);

    let id = SessionService::new(&db).register("", "pw", 0.0, 0.0).await.unwrap();
    assert_eq!(db.get_user(id).await.unwrap().unwrap().name, "");
}
