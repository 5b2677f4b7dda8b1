use payloads::{Method, ProductId};
use serde_json::json;
use stores::{KeyValueStorage, address::TEMP_ADDRESSES_KEY};
use test_helpers::{mock, ok, spawn_storefront};

#[tokio::test]
async fn stores_survive_reload() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend
        .on(Method::Post, "cart", ok(json!(mock::cart_item(1, 10, 2))));
    app.storefront.cart.add_item(ProductId(10), 2).await?;

    let cart_storage = app.stored("cart-storage").unwrap();
    assert_eq!(cart_storage["version"], 0);
    assert_eq!(cart_storage["state"]["total_quantity"], 2);

    let reloaded = app.reload();
    reloaded.storefront.hydrate();

    let auth = reloaded.storefront.auth.get();
    assert_eq!(auth.user, Some(mock::alice()));
    assert!(!auth.is_loading);
    let cart = reloaded.storefront.cart.get();
    assert_eq!(cart.items, vec![mock::cart_item(1, 10, 2)]);
    assert_eq!(cart.total_quantity, 2);
    assert!(!reloaded.storefront.addresses.get().book.is_local());

    Ok(())
}

#[tokio::test]
async fn unreadable_state_is_ignored() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.storage.set_item("auth-storage", "{not json")?;
    app.storage.set_item(
        "cart-storage",
        &json!({ "state": { "items": [] }, "version": 3 }).to_string(),
    )?;
    app.storage.set_item(TEMP_ADDRESSES_KEY, "[]")?;

    app.storefront.hydrate();

    assert!(!app.storefront.auth.get().is_logged_in());
    assert!(app.storefront.cart.get().items.is_empty());
    assert!(app.storefront.addresses.get().book.is_local());

    Ok(())
}

#[tokio::test]
async fn local_addresses_load_on_hydrate() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.storefront
        .addresses
        .save_local_address(mock::orchard_lane())?;

    let reloaded = app.reload();
    reloaded.storefront.hydrate();

    let addresses = reloaded.storefront.addresses.get();
    assert!(addresses.book.is_local());
    assert_eq!(addresses.addresses().len(), 1);
    assert!(addresses.addresses()[0].status);

    Ok(())
}
