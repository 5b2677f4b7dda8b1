use payloads::{Method, Product, StatusCode};
use serde_json::json;
use std::time::{Duration, Instant};
use stores::{FetchState, Resource, fetch::fetch_resource};
use test_helpers::{error, mock, ok, spawn_storefront};

#[tokio::test]
async fn fetches_single_resource() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(Method::Get, "products/1", ok(mock::products(1, 1).remove(0)));

    let mut resource = Resource::<Product>::default();
    resource.start();
    let result: Result<Product, _> =
        fetch_resource(&app.api, "products/1", futures::future::ready(())).await;
    resource.finish(result);

    let FetchState::Fetched(product) = &resource.data else {
        panic!("Expected fetched product");
    };
    assert_eq!(product.name, "Product 1");
    assert!(!resource.loading);
    assert_eq!(resource.error, None);

    Ok(())
}

#[tokio::test]
async fn missing_resource_reports_server_message() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Get,
        "stores/9",
        error(StatusCode::NOT_FOUND, "Store not found"),
    );

    let mut resource = Resource::<payloads::Shop>::default();
    resource.start();
    let result: Result<payloads::Shop, _> =
        fetch_resource(&app.api, "stores/9", futures::future::ready(())).await;
    assert!(result.as_ref().is_err_and(|e| e.is_not_found()));
    resource.finish(result);

    assert_eq!(resource.data, FetchState::NotFetched);
    assert_eq!(resource.error.as_deref(), Some("Store not found"));
    assert!(!resource.is_initial_loading());

    Ok(())
}

#[tokio::test]
async fn fast_responses_wait_for_minimum_display() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(Method::Get, "leaderboard", ok(json!([])));

    let started = Instant::now();
    let result: Result<Vec<payloads::LeaderboardEntry>, _> = fetch_resource(
        &app.api,
        "leaderboard",
        tokio::time::sleep(Duration::from_millis(50)),
    )
    .await;

    assert!(result?.is_empty());
    assert!(started.elapsed() >= Duration::from_millis(50));

    Ok(())
}
