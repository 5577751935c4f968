//! Exercises the MongoDB store against a live server. Skipped unless
//! `MONGODB_TEST_URI` is set, e.g. `mongodb://localhost:27017`.

use mongodb::bson::{doc, oid::ObjectId};
use product_service::dtos::CreateProductRequest;
use product_service::services::{MongoDb, ProductCatalog, ProductFilter, ProductStore};
use std::sync::Arc;

async fn test_db() -> Option<(MongoDb, String)> {
    let uri = std::env::var("MONGODB_TEST_URI").ok()?;
    let db_name = format!("product_test_{}", ObjectId::new().to_hex());
    let db = MongoDb::connect(&uri, &db_name)
        .await
        .expect("Failed to connect to MongoDB");
    db.initialize_indexes()
        .await
        .expect("Failed to create indexes");
    Some((db, db_name))
}

#[tokio::test]
async fn seed_and_create_round_trip_through_mongo() {
    let Some((db, db_name)) = test_db().await else {
        eprintln!("MONGODB_TEST_URI not set, skipping");
        return;
    };
    let store: Arc<dyn ProductStore> = Arc::new(db.clone());
    let catalog = ProductCatalog::new(Some(store.clone()));

    let first = catalog.seed().await.unwrap();
    let second = catalog.seed().await.unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 4);
    assert_eq!(store.count(&ProductFilter::default()).await.unwrap(), 4);

    let created = catalog
        .create(CreateProductRequest {
            title: Some("T".to_string()),
            price: Some(10.0),
            category: Some("C".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id.len(), 24);

    let rejected = catalog
        .create(CreateProductRequest {
            title: Some("Test".to_string()),
            price: Some(-5.0),
            category: Some("x".to_string()),
            ..Default::default()
        })
        .await;
    assert!(rejected.is_err());
    assert_eq!(store.count(&ProductFilter::default()).await.unwrap(), 5);

    let c_only = catalog
        .list(&ProductFilter::category("C"), 24)
        .await
        .unwrap();
    assert_eq!(c_only.len(), 1);
    assert!(c_only[0].in_stock);

    // Legacy record written outside the service
    db.products()
        .insert_one(doc! { "title": "Legacy" }, None)
        .await
        .unwrap();
    let all = catalog.list(&ProductFilter::default(), 0).await.unwrap();
    let legacy = all.iter().find(|p| p.title == "Legacy").unwrap();
    assert_eq!(legacy.price, 0.0);
    assert_eq!(legacy.category, "");

    assert!(store
        .collection_names()
        .await
        .unwrap()
        .contains(&"product".to_string()));

    let _ = db.client().database(&db_name).drop(None).await;
}
