use payloads::{Method, ProductId};
use serde_json::json;
use stores::{StoreError, error::WISHLIST_AUTH_REQUIRED};
use test_helpers::{ok, ok_empty, spawn_storefront};

#[tokio::test]
async fn toggle_adds_then_removes() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend
        .on(Method::Get, "wishlist", ok(json!([])))
        .on(
            Method::Post,
            "wishlist",
            ok(json!({ "id": 5, "product_id": 10 })),
        )
        .on(Method::Delete, "wishlist/10", ok_empty());
    let wishlist = &app.storefront.wishlist;

    wishlist.fetch().await;
    assert!(!wishlist.contains(&ProductId(10)));

    assert!(wishlist.toggle(ProductId(10)).await?);
    assert!(wishlist.contains(&ProductId(10)));

    assert!(!wishlist.toggle(ProductId(10)).await?);
    assert!(!wishlist.contains(&ProductId(10)));
    assert_eq!(app.backend.calls_to(Method::Delete, "wishlist/10"), 1);

    Ok(())
}

#[tokio::test]
async fn anonymous_toggle_is_refused() -> anyhow::Result<()> {
    let app = spawn_storefront();

    let result = app.storefront.wishlist.toggle(ProductId(10)).await;

    assert!(matches!(result, Err(StoreError::AuthRequired(_))));
    assert_eq!(
        app.storefront.wishlist.get().error.as_deref(),
        Some(WISHLIST_AUTH_REQUIRED)
    );
    assert_eq!(app.backend.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn sign_out_drops_per_user_state() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend
        .on(Method::Get, "wishlist", ok(json!([{ "id": 5, "product_id": 10 }])))
        .on(Method::Post, "logout", ok_empty());
    app.storefront.wishlist.fetch().await;
    assert!(app.storefront.wishlist.contains(&ProductId(10)));

    app.storefront.sign_out().await;

    assert!(!app.storefront.wishlist.contains(&ProductId(10)));
    assert_eq!(app.storefront.cart.get().total_items, 0);
    assert!(!app.storefront.auth.get().is_logged_in());

    Ok(())
}
