//! Integration tests for the maintenance modes against a live `MongoDB`.
//!
//! These tests require:
//! - A running `MongoDB` reachable at `MONGODB_URI` (default: localhost)
//!
//! Run with: cargo test -p mersiv-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use futures::TryStreamExt;
use mersiv_admin::dataset;
use mersiv_admin::db::StoreRepository;
use mersiv_admin::{MaintenanceError, Mode, Report, execute};
use mersiv_core::{Dataset, Store};
use mersiv_integration_tests::TestContext;
use mongodb::bson::{Bson, Document, doc};

fn builtin() -> Dataset {
    dataset::builtin().expect("built-in data set should load")
}

async fn setup() -> TestContext {
    TestContext::new().await.expect("Failed to connect to MongoDB")
}

/// Run one mode against the context's database, opening and closing a connection.
async fn run_mode(ctx: &TestContext, mode: Mode, dataset: &Dataset) -> Report {
    let database = ctx.open().await.expect("Failed to open store database");
    let report = execute(database.stores(), mode, dataset).await;
    database.close().await;
    report.expect("maintenance mode failed")
}

async fn raw_documents(ctx: &TestContext) -> Vec<Document> {
    ctx.raw_stores()
        .find(doc! {})
        .sort(doc! { "_id": 1 })
        .await
        .expect("find failed")
        .try_collect()
        .await
        .expect("cursor failed")
}

/// Documents with `_id` removed, for comparing state across runs.
async fn contents(ctx: &TestContext) -> Vec<Document> {
    let mut docs = raw_documents(ctx).await;
    for doc in &mut docs {
        doc.remove("_id");
    }
    docs.sort_by_key(|d| d.get_str("name").unwrap_or_default().to_owned());
    docs
}

// ============================================================================
// Inspect
// ============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_inspect_marks_missing_links() {
    let ctx = setup().await;
    ctx.raw_stores()
        .insert_many([
            doc! { "name": "Bare Store", "imageUrl": "https://example.com/bare.jpg" },
            doc! {
                "name": "Linked Store",
                "videoUrl": "https://example.com/promo.mp4",
                "clickableLink": "https://example.com",
            },
        ])
        .await
        .unwrap();

    let output = run_mode(&ctx, Mode::Inspect, &builtin()).await.to_string();

    assert!(output.contains("Store: Bare Store\nVideo URL: NOT SET\nLink: NOT SET"));
    assert!(output.contains(
        "Store: Linked Store\nVideo URL: https://example.com/promo.mp4\nLink: https://example.com"
    ));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_inspect_lists_stores_with_malformed_models() {
    let ctx = setup().await;
    ctx.raw_stores()
        .insert_many([
            doc! {
                "name": "Legacy Store",
                "imageUrl": Bson::Null,
                "videoUrl": "https://example.com/legacy.mp4",
                "models": [{ "id": "a", "size": "large" }],
            },
            doc! { "name": "Furniture Store", "models": [] },
        ])
        .await
        .unwrap();

    let Report::Inspect(report) = run_mode(&ctx, Mode::Inspect, &builtin()).await else {
        panic!("expected inspect report");
    };

    assert_eq!(report.stores.len(), 2);
    let output = report.to_string();
    assert!(output.contains(
        "Store: Legacy Store\nVideo URL: https://example.com/legacy.mp4\nLink: NOT SET"
    ));
    assert!(output.contains("Store: Furniture Store\nVideo URL: NOT SET\nLink: NOT SET"));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_inspect_does_not_write() {
    let ctx = setup().await;
    ctx.raw_stores()
        .insert_one(doc! { "name": "Electronics Showroom", "models": [] })
        .await
        .unwrap();
    let before = raw_documents(&ctx).await;

    run_mode(&ctx, Mode::Inspect, &builtin()).await;

    assert_eq!(raw_documents(&ctx).await, before);
    ctx.cleanup().await.unwrap();
}

// ============================================================================
// Targeted link update
// ============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_update_links_sets_literals_and_is_idempotent() {
    let ctx = setup().await;
    let dataset = builtin();
    ctx.raw_stores()
        .insert_many([
            doc! { "name": "Electronics Showroom", "imageUrl": "bg.jpg", "videoUrl": "old.mp4" },
            doc! { "name": "Pop-up Shop", "videoUrl": "popup.mp4", "clickableLink": "http://popup" },
        ])
        .await
        .unwrap();

    run_mode(&ctx, Mode::UpdateLinks, &dataset).await;
    let once = contents(&ctx).await;
    run_mode(&ctx, Mode::UpdateLinks, &dataset).await;
    let twice = contents(&ctx).await;

    assert_eq!(once, twice);

    let expected = dataset
        .media_links
        .iter()
        .find(|l| l.name == "Electronics Showroom")
        .unwrap();
    let showroom = ctx
        .raw_stores()
        .find_one(doc! { "name": "Electronics Showroom" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(showroom.get_str("videoUrl").unwrap(), expected.video_url);
    assert_eq!(showroom.get_str("clickableLink").unwrap(), expected.clickable_link);
    assert_eq!(showroom.get_str("imageUrl").unwrap(), "bg.jpg");

    let popup = ctx
        .raw_stores()
        .find_one(doc! { "name": "Pop-up Shop" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(popup.get_str("videoUrl").unwrap(), "popup.mp4");
    assert_eq!(popup.get_str("clickableLink").unwrap(), "http://popup");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_update_links_never_creates_documents() {
    let ctx = setup().await;

    let Report::UpdateLinks(report) = run_mode(&ctx, Mode::UpdateLinks, &builtin()).await else {
        panic!("expected link update report");
    };

    assert_eq!(report.matched(), 0);
    assert_eq!(ctx.raw_stores().count_documents(doc! {}).await.unwrap(), 0);
    ctx.cleanup().await.unwrap();
}

// ============================================================================
// Full reseed
// ============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_reseed_replaces_collection_and_is_idempotent() {
    let ctx = setup().await;
    let dataset = builtin();
    ctx.raw_stores()
        .insert_one(doc! { "name": "Stale Store" })
        .await
        .unwrap();

    let Report::Reseed(report) = run_mode(&ctx, Mode::Reseed, &dataset).await else {
        panic!("expected reseed report");
    };
    assert_eq!(report.deleted, 1);
    assert_eq!(report.inserted, dataset.stores.len() as u64);
    let once = contents(&ctx).await;

    run_mode(&ctx, Mode::Reseed, &dataset).await;
    let twice = contents(&ctx).await;

    assert_eq!(once, twice);
    assert_eq!(twice.len(), dataset.stores.len());

    let mut names: Vec<&str> = twice.iter().map(|d| d.get_str("name").unwrap()).collect();
    let mut expected: Vec<&str> = dataset.stores.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    expected.sort_unstable();
    assert_eq!(names, expected);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_reseed_then_inspect_round_trips_links() {
    let ctx = setup().await;
    let dataset = builtin();

    run_mode(&ctx, Mode::Reseed, &dataset).await;
    let Report::Inspect(report) = run_mode(&ctx, Mode::Inspect, &dataset).await else {
        panic!("expected inspect report");
    };

    assert_eq!(report.stores.len(), dataset.stores.len());
    for seeded in &dataset.stores {
        let seen = report
            .stores
            .iter()
            .find(|s| s.name == seeded.name)
            .unwrap();
        assert_eq!(seen.video_url, seeded.video_url);
        assert_eq!(seen.clickable_link, seeded.clickable_link);
    }

    ctx.cleanup().await.unwrap();
}

// ============================================================================
// Conditional model update
// ============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_update_models_replaces_only_defined_sets() {
    let ctx = setup().await;
    let dataset = builtin();
    ctx.raw_stores()
        .insert_many([
            doc! {
                "name": "Furniture Store",
                "imageUrl": "furniture.jpg",
                "featured": true,
                "models": [{ "id": "old", "url": "old.glb", "position": { "x": 0, "y": 0, "z": 0 }, "size": 1 }],
            },
            doc! {
                "name": "Garden Centre",
                "models": [{ "id": "tree", "url": "tree.glb", "position": { "x": 1, "y": 0, "z": 2 }, "size": 3 }],
            },
        ])
        .await
        .unwrap();
    let untouched_before = ctx
        .raw_stores()
        .find_one(doc! { "name": "Garden Centre" })
        .await
        .unwrap()
        .unwrap();

    let Report::UpdateModels(report) = run_mode(&ctx, Mode::UpdateModels, &dataset).await else {
        panic!("expected model update report");
    };
    assert_eq!(report.found, 2);

    let database = ctx.open().await.unwrap();
    let stored = database.stores().find_all().await;
    database.close().await;
    let furniture: Store = stored
        .unwrap()
        .into_iter()
        .find(|s| s.name == "Furniture Store")
        .unwrap();
    assert_eq!(
        furniture.models,
        dataset.model_set("Furniture Store").unwrap()
    );

    let furniture_raw = ctx
        .raw_stores()
        .find_one(doc! { "name": "Furniture Store" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(furniture_raw.get("featured"), Some(&Bson::Boolean(true)));
    assert_eq!(furniture_raw.get_str("imageUrl").unwrap(), "furniture.jpg");

    let untouched_after = ctx
        .raw_stores()
        .find_one(doc! { "name": "Garden Centre" })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched_after, untouched_before);

    ctx.cleanup().await.unwrap();
}

// ============================================================================
// Full run lifecycle
// ============================================================================

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_run_connects_and_closes() {
    let ctx = setup().await;

    let report = mersiv_admin::run(&ctx.config, Mode::Reseed, &builtin())
        .await
        .unwrap();

    assert!(report.to_string().ends_with("✅ Database seeded successfully!"));
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_run_fails_during_operation_and_closes() {
    let ctx = setup().await;
    ctx.raw_stores()
        .insert_many([
            doc! { "name": "Furniture Store", "models": "oops" },
            doc! { "name": "Fashion Boutique", "models": [] },
        ])
        .await
        .unwrap();
    let before = raw_documents(&ctx).await;

    let result = mersiv_admin::run(&ctx.config, Mode::UpdateModels, &builtin()).await;

    assert!(matches!(result, Err(MaintenanceError::Repository(_))));
    assert_eq!(raw_documents(&ctx).await, before);

    let report = mersiv_admin::run(&ctx.config, Mode::Inspect, &builtin())
        .await
        .unwrap();
    assert!(report.to_string().contains("Store: Furniture Store"));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_unreachable_server_fails() {
    let mut ctx = setup().await;
    let reachable = ctx.config.clone();
    ctx.config.uri = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500".into();

    let result = mersiv_admin::run(&ctx.config, Mode::Inspect, &builtin()).await;

    assert!(result.is_err());
    ctx.config = reachable;
    ctx.cleanup().await.unwrap();
}
