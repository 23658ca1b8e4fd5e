//! Review store integration tests

mod utils;

use serde_json::{json, Value};
use shiori_lib::shared::{domain::CatalogId, errors::AppError};
use utils::factories::review_entry;
use utils::helpers::build_test_services;

fn id(raw: &str) -> CatalogId {
    CatalogId::new(raw)
}

async fn stored_document(path: &std::path::Path) -> Value {
    let raw = tokio::fs::read_to_string(path).await.unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_save_keeps_only_complete_reviews() {
    let services = build_test_services();

    let saved = services
        .reviews
        .save(
            &id("21"),
            vec![
                review_entry("1", 5, "A classic"),
                json!({"id": "2", "rating": 4}),
            ],
        )
        .await
        .unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, "1");

    let document = stored_document(&services.reviews_path()).await;
    assert_eq!(document["21"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_saving_an_empty_list_removes_the_entry() {
    let services = build_test_services();
    let reviews = &services.reviews;
    reviews
        .save(&id("21"), vec![review_entry("1", 5, "A classic")])
        .await
        .unwrap();

    reviews.save(&id("21"), Vec::new()).await.unwrap();

    assert!(reviews.load(&id("21")).await.is_empty());
    let document = stored_document(&services.reviews_path()).await;
    assert!(document.get("21").is_none());
}

#[tokio::test]
async fn test_round_trip_preserves_order() {
    let services = build_test_services();
    let entries = vec![
        review_entry("b", 3, "second watch"),
        review_entry("a", 5, "first watch"),
        json!(null),
        review_entry("c", 4, "third watch"),
    ];

    let saved = services.reviews.save(&id("1"), entries).await.unwrap();
    let loaded = services.reviews.load(&id("1")).await;

    assert_eq!(loaded, saved);
    let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_save_sweeps_other_broken_entries() {
    let services = build_test_services();
    let existing = json!({
        "5": [],
        "6": [{"id": "x", "rating": 2}],
        "7": [{"id": "y", "rating": 4, "text": "keeps"}, {"bogus": true}]
    });
    tokio::fs::create_dir_all(services.reviews_path().parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(services.reviews_path(), existing.to_string())
        .await
        .unwrap();

    services
        .reviews
        .save(&id("8"), vec![review_entry("z", 1, "not for me")])
        .await
        .unwrap();

    let document = stored_document(&services.reviews_path()).await;
    let mut keys: Vec<&String> = document.as_object().unwrap().keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["7", "8"]);
    assert_eq!(document["7"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_document_loads_as_empty_and_is_replaced_on_save() {
    let services = build_test_services();
    tokio::fs::create_dir_all(services.reviews_path().parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(services.reviews_path(), "{ this is not json")
        .await
        .unwrap();

    assert!(services.reviews.load(&id("1")).await.is_empty());

    services
        .reviews
        .save(&id("1"), vec![review_entry("1", 4, "recovered")])
        .await
        .unwrap();
    assert_eq!(services.reviews.load(&id("1")).await.len(), 1);
}

#[tokio::test]
async fn test_submit_edit_delete_lifecycle() {
    let services = build_test_services();
    let reviews = &services.reviews;

    let submitted = reviews.submit(&id("30"), 4, "  Strong start ").await.unwrap();
    assert_eq!(submitted.text, "Strong start");

    let edited = reviews
        .edit(&id("30"), &submitted.id, 5, "Strong finish too")
        .await
        .unwrap();
    assert_eq!(edited.id, submitted.id);
    assert_eq!(edited.created_at, submitted.created_at);
    assert!(edited.updated_at >= submitted.updated_at);
    assert_eq!(reviews.load(&id("30")).await, vec![edited.clone()]);

    reviews.delete(&id("30"), &submitted.id).await.unwrap();
    assert!(reviews.load(&id("30")).await.is_empty());
    let document = stored_document(&services.reviews_path()).await;
    assert_eq!(document, json!({}));
}

#[tokio::test]
async fn test_invalid_or_missing_reviews_are_typed_failures() {
    let services = build_test_services();
    let reviews = &services.reviews;

    assert!(matches!(
        reviews.submit(&id("30"), 0, "no stars").await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        reviews.submit(&id("30"), 3, "").await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        reviews.submit(&id(" "), 3, "blank id").await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        reviews.edit(&id("30"), "missing", 3, "text").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        reviews.delete(&id("30"), "missing").await,
        Err(AppError::NotFound(_))
    ));
    assert!(!services.reviews_path().exists());
}

#[tokio::test]
async fn test_reviews_are_kept_per_catalog_id() {
    let services = build_test_services();
    let reviews = &services.reviews;

    reviews.submit(&id("1"), 5, "first title").await.unwrap();
    reviews.submit(&id("2"), 2, "second title").await.unwrap();
    let kept = reviews.submit(&id("1"), 4, "first title again").await.unwrap();

    assert_eq!(reviews.load(&id("1")).await.len(), 2);
    assert_eq!(reviews.load(&id("2")).await.len(), 1);

    let (_, reopened) = services.reopen();
    assert_eq!(reopened.load(&id("1")).await[1], kept);
}
