mod address;
mod auth;
mod cart;
mod fetch;
mod pagination;
mod persistence;
mod wishlist;

use payloads::Method;
use serde_json::json;
use test_helpers::{ok, spawn_storefront};

#[tokio::test]
async fn bearer_token_follows_session() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(Method::Get, "cart", ok(json!([])));

    app.storefront.cart.fetch_cart().await;
    assert_eq!(app.backend.call_count(), 0, "anonymous fetch is skipped");

    app.sign_in_alice().await?;
    app.storefront.cart.fetch_cart().await;

    let calls = app.backend.calls();
    let login = calls.iter().find(|c| c.path == "login").unwrap();
    assert_eq!(login.bearer, None);
    let cart = calls.iter().find(|c| c.path == "cart").unwrap();
    assert_eq!(cart.bearer.as_deref(), Some(test_helpers::mock::ALICE_TOKEN));

    Ok(())
}
