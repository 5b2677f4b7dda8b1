use payloads::{Method, Partner, Product, StatusCode, responses::ListShape};
use serde_json::json;
use stores::{FeedView, PageOptions, PaginatedFeed};
use test_helpers::{error, mock, ok, raw, spawn_storefront};

#[tokio::test]
async fn short_page_ends_feed() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(
            Method::Get,
            "products?page=1&limit=12",
            ok(json!(mock::products(1, 12))),
        )
        .on(
            Method::Get,
            "products?page=2&limit=12",
            ok(json!(mock::products(13, 5))),
        );
    let feed: PaginatedFeed<Product> =
        app.storefront.feed("products", ListShape::Data);
    assert_eq!(feed.state().view(), FeedView::InitialLoading);

    assert!(feed.load_more().await);
    assert!(feed.state().has_more);
    assert!(feed.load_more().await);

    let state = feed.state();
    assert!(!state.has_more);
    assert_eq!(state.total(), 17);
    assert_eq!(state.pages.len(), 2);
    assert_eq!(state.items().last().map(|p| p.id.0), Some(17));
    assert_eq!(state.view(), FeedView::Success);
    drop(state);

    // No page 3 request once the feed has ended.
    assert!(!feed.load_more().await);
    assert_eq!(app.backend.call_count(), 2);

    Ok(())
}

#[tokio::test]
async fn load_more_while_loading_is_ignored() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Get,
        "products?page=1&limit=12",
        ok(json!(mock::products(1, 12))),
    );
    let gate = app.backend.hold(Method::Get, "products?page=1&limit=12");
    let feed: PaginatedFeed<Product> =
        app.storefront.feed("products", ListShape::Data);

    let first = feed.load_more();
    futures::pin_mut!(first);
    assert!(futures::poll!(first.as_mut()).is_pending());
    assert!(feed.state().loading);
    assert_eq!(feed.state().view(), FeedView::InitialLoading);

    assert!(!feed.load_more().await);
    assert_eq!(app.backend.call_count(), 1);

    gate.release();
    assert!(first.await);
    assert_eq!(feed.state().total(), 12);
    assert_eq!(app.backend.call_count(), 1);

    Ok(())
}

#[tokio::test]
async fn keyed_lists_and_existing_queries() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Get,
        "partners?featured=1&page=1&limit=4",
        raw(json!({
            "partners": [
                { "id": 1, "name": "Green Acres" },
                { "id": 2, "name": "Sunrise Dairy" },
            ]
        })),
    );
    let feed: PaginatedFeed<Partner> = PaginatedFeed::new(
        app.api.clone(),
        "partners?featured=1",
        PageOptions::new(4).shape(ListShape::Keyed("partners")),
    );

    feed.load_more().await;

    let state = feed.state();
    assert_eq!(state.total(), 2);
    assert!(!state.has_more);
    assert_eq!(state.error, None);

    Ok(())
}

#[tokio::test]
async fn empty_and_failed_feeds() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(Method::Get, "events?page=1&limit=12", ok(json!([])))
        .on(
            Method::Get,
            "couriers?page=1&limit=12",
            error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"),
        )
        .on(
            Method::Get,
            "volunteers?page=1&limit=12",
            raw(json!({ "items": [] })),
        );

    let events: PaginatedFeed<payloads::Event> =
        app.storefront.feed("events", ListShape::Data);
    events.load_more().await;
    assert_eq!(events.state().view(), FeedView::Empty);

    let couriers: PaginatedFeed<payloads::Courier> =
        app.storefront.feed("couriers", ListShape::Data);
    couriers.load_more().await;
    assert_eq!(
        couriers.state().view(),
        FeedView::Error("Database unavailable".into())
    );
    // A failed page can be retried.
    assert!(couriers.state().wants_more());

    let volunteers: PaginatedFeed<payloads::Volunteer> =
        app.storefront.feed("volunteers", ListShape::Data);
    volunteers.load_more().await;
    assert!(matches!(volunteers.state().view(), FeedView::Error(_)));

    Ok(())
}

#[tokio::test]
async fn refetch_starts_over() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(
            Method::Get,
            "products?page=1&limit=12",
            ok(json!(mock::products(1, 3))),
        );
    let feed: PaginatedFeed<Product> =
        app.storefront.feed("products", ListShape::Data);

    feed.load_more().await;
    feed.refetch().await;

    assert_eq!(feed.state().total(), 3);
    assert_eq!(feed.state().page, 1);
    assert_eq!(app.backend.calls_to(Method::Get, "products?page=1&limit=12"), 2);

    Ok(())
}

#[tokio::test]
async fn refetch_discards_page_in_flight() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Get,
        "products?page=1&limit=12",
        ok(json!(mock::products(1, 12))),
    );
    let gate = app.backend.hold(Method::Get, "products?page=1&limit=12");
    let feed: PaginatedFeed<Product> =
        app.storefront.feed("products", ListShape::Data);

    let first = feed.load_more();
    futures::pin_mut!(first);
    assert!(futures::poll!(first.as_mut()).is_pending());

    assert!(feed.refetch().await);
    assert_eq!(feed.state().total(), 12);

    gate.release();
    assert!(!first.await, "the older request is dropped");

    let state = feed.state();
    assert_eq!(state.pages.len(), 1);
    assert_eq!(state.total(), 12);
    assert_eq!(state.page, 1);
    assert!(!state.loading);
    assert_eq!(app.backend.calls_to(Method::Get, "products?page=1&limit=12"), 2);

    Ok(())
}
