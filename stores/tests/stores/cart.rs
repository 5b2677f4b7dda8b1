use payloads::{CartItemId, Method, ProductId, StatusCode};
use serde_json::json;
use stores::{StoreError, error::CART_AUTH_REQUIRED};
use test_helpers::{error, mock, ok, ok_empty, spawn_storefront};

#[tokio::test]
async fn anonymous_add_makes_no_request() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let cart = &app.storefront.cart;

    let result = cart.add_item(ProductId(10), 1).await;

    assert!(matches!(result, Err(StoreError::AuthRequired(_))));
    assert_eq!(cart.get().error.as_deref(), Some(CART_AUTH_REQUIRED));
    assert_eq!(app.backend.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn repeated_add_keeps_one_line_per_product() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend.on_sequence(
        Method::Post,
        "cart",
        vec![
            ok(json!(mock::cart_item(1, 10, 1))),
            ok(json!(mock::cart_item(1, 10, 3))),
        ],
    );
    let cart = &app.storefront.cart;

    cart.add_item(ProductId(10), 1).await?;
    cart.add_item(ProductId(10), 2).await?;

    let state = cart.get();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].quantity, 3);
    assert_eq!(state.total_items, 1);
    assert_eq!(state.total_quantity, 3);
    assert_eq!(state.error, None);

    Ok(())
}

#[tokio::test]
async fn totals_follow_every_mutation() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend
        .on(
            Method::Get,
            "cart",
            ok(json!([mock::cart_item(1, 10, 2), mock::cart_item(2, 11, 1)])),
        )
        .on(Method::Put, "cart/2", ok(json!(mock::cart_item(2, 11, 5))))
        .on(Method::Delete, "cart/1", ok_empty());
    let cart = &app.storefront.cart;

    cart.fetch_cart().await;
    assert_eq!(cart.get().total_quantity, 3);

    cart.update_item_quantity(CartItemId(2), 5).await?;
    assert_eq!(cart.get().total_quantity, 7);

    // Zero quantity removes the line.
    cart.update_item_quantity(CartItemId(1), 0).await?;
    let state = cart.get();
    assert_eq!(state.total_items, 1);
    assert_eq!(state.total_quantity, 5);
    assert_eq!(app.backend.calls_to(Method::Delete, "cart/1"), 1);

    Ok(())
}

#[tokio::test]
async fn server_message_is_recorded_and_returned() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend.on(
        Method::Post,
        "cart",
        error(StatusCode::UNPROCESSABLE_ENTITY, "Only 2 left in stock"),
    );
    let cart = &app.storefront.cart;

    let result = cart.add_item(ProductId(10), 3).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Only 2 left in stock");
    let state = cart.get();
    assert_eq!(state.error.as_deref(), Some("Only 2 left in stock"));
    assert!(state.items.is_empty());
    assert!(!state.is_loading);

    Ok(())
}

#[tokio::test]
async fn count_refresh_and_reset() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend.on(
        Method::Get,
        "cart/count",
        ok(json!({ "total_items": 2, "total_quantity": 9 })),
    );
    let cart = &app.storefront.cart;

    cart.refresh_cart_count().await;
    assert_eq!(cart.get().total_items, 2);
    assert_eq!(cart.get().total_quantity, 9);

    let before = app.backend.call_count();
    cart.reset();
    assert_eq!(cart.get().total_quantity, 0);
    assert_eq!(app.backend.call_count(), before);

    Ok(())
}

#[tokio::test]
async fn failed_fetches_leave_an_error_and_the_items() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend
        .on(Method::Get, "cart", ok(json!([mock::cart_item(1, 10, 2)])));
    let cart = &app.storefront.cart;
    cart.fetch_cart().await;

    app.backend
        .on(
            Method::Get,
            "cart",
            error(StatusCode::INTERNAL_SERVER_ERROR, "Cart unavailable"),
        )
        .on(
            Method::Get,
            "cart/count",
            error(StatusCode::SERVICE_UNAVAILABLE, "Try again later"),
        );

    cart.fetch_cart().await;
    let state = cart.get();
    assert_eq!(state.error.as_deref(), Some("Cart unavailable"));
    assert_eq!(state.items.len(), 1);
    assert!(!state.is_loading);

    cart.refresh_cart_count().await;
    let state = cart.get();
    assert_eq!(state.error.as_deref(), Some("Try again later"));
    assert_eq!(state.total_quantity, 2);

    Ok(())
}
