use payloads::{Address, AddressId, Method, StatusCode};
use serde_json::json;
use stores::{
    StoreError,
    address::{TEMP_ADDRESSES_KEY, TEMP_DELIVERY_ADDRESS_KEY},
};
use test_helpers::{
    TestStorefront, error, mock, ok, ok_empty, spawn_storefront,
};

fn active_ids(addresses: &[Address]) -> Vec<AddressId> {
    addresses
        .iter()
        .filter(|a| a.status)
        .map(|a| a.id.clone())
        .collect()
}

fn stored_addresses(app: &TestStorefront) -> Vec<Address> {
    app.stored(TEMP_ADDRESSES_KEY)
        .map(|v| serde_json::from_value(v).unwrap())
        .unwrap_or_default()
}

/// Signed in with three server addresses, the first one active.
async fn signed_in_with_three() -> anyhow::Result<TestStorefront> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Get,
        "addresses",
        ok(json!([
            mock::server_address(1, mock::orchard_lane(), true),
            mock::server_address(2, mock::mill_road(), false),
            mock::server_address(3, mock::orchard_lane(), false),
        ])),
    );
    app.sign_in_alice().await?;
    assert_eq!(app.storefront.addresses.get().addresses().len(), 3);
    Ok(app)
}

#[tokio::test]
async fn newest_local_address_becomes_active() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;

    let first = addresses.save_local_address(mock::orchard_lane())?;
    let second = addresses.save_local_address(mock::mill_road())?;

    assert!(first.id.is_temp());
    assert_ne!(first.id, second.id);

    let stored = stored_addresses(&app);
    assert_eq!(stored.len(), 2);
    assert_eq!(active_ids(&stored), vec![second.id.clone()]);
    assert!(stored.iter().all(|a| a.temp));

    let delivery: Address =
        serde_json::from_value(app.stored(TEMP_DELIVERY_ADDRESS_KEY).unwrap())?;
    assert_eq!(delivery.id, second.id);

    let state = addresses.get();
    assert!(state.book.is_local());
    assert_eq!(state.active_address().map(|a| &a.id), Some(&second.id));
    assert_eq!(app.backend.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn local_activation_and_deletion() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;
    let a = addresses.save_local_address(mock::orchard_lane())?;
    let b = addresses.save_local_address(mock::mill_road())?;
    let c = addresses.save_local_address(mock::orchard_lane())?;

    addresses.set_local_active_address(&b.id)?;
    assert_eq!(active_ids(&stored_addresses(&app)), vec![b.id.clone()]);

    addresses.delete_local_address(&b.id)?;
    let stored = stored_addresses(&app);
    assert_eq!(stored.len(), 2);
    assert_eq!(active_ids(&stored), vec![a.id.clone()]);

    // Deleting an inactive address leaves the active one alone.
    addresses.delete_local_address(&c.id)?;
    assert_eq!(active_ids(&stored_addresses(&app)), vec![a.id.clone()]);

    let missing = addresses.set_local_active_address(&AddressId::from("temp_1"));
    assert!(matches!(missing, Err(StoreError::AddressNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn local_update_keeps_id_and_status() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;
    let saved = addresses.save_local_address(mock::orchard_lane())?;

    let updated = addresses.update_local_address(&saved.id, mock::mill_road())?;

    assert_eq!(updated.id, saved.id);
    assert!(updated.status);
    assert_eq!(updated.street_address, "200 Mill Road");
    assert_eq!(stored_addresses(&app), vec![updated]);

    Ok(())
}

#[tokio::test]
async fn invalid_local_address_is_not_stored() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let mut details = mock::orchard_lane();
    details.city = "  ".into();

    let result = app.storefront.addresses.save_local_address(details);

    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(
        app.storefront.addresses.get().error.as_deref(),
        Some("City is required")
    );
    assert_eq!(app.stored(TEMP_ADDRESSES_KEY), None);

    Ok(())
}

#[tokio::test]
async fn server_activation_is_exclusive() -> anyhow::Result<()> {
    let app = signed_in_with_three().await?;
    app.backend
        .on(Method::Put, "addresses/3/activate", ok_empty());
    let addresses = &app.storefront.addresses;

    addresses.set_active_address(&AddressId::from(3)).await?;

    assert_eq!(
        active_ids(addresses.get().addresses()),
        vec![AddressId::from(3)]
    );
    assert_eq!(app.backend.calls_to(Method::Put, "addresses/3/activate"), 1);

    Ok(())
}

#[tokio::test]
async fn deleting_active_server_address_promotes_first() -> anyhow::Result<()> {
    let app = signed_in_with_three().await?;
    app.backend
        .on(Method::Put, "addresses/2/activate", ok_empty())
        .on(Method::Delete, "addresses/1", ok_empty());
    let addresses = &app.storefront.addresses;

    addresses.delete_address(&AddressId::from(1)).await?;

    let state = addresses.get();
    assert_eq!(state.addresses().len(), 2);
    assert_eq!(active_ids(state.addresses()), vec![AddressId::from(2)]);
    assert_eq!(app.backend.calls_to(Method::Put, "addresses/2/activate"), 1);

    Ok(())
}

#[tokio::test]
async fn server_operations_require_login() -> anyhow::Result<()> {
    let app = spawn_storefront();

    let result = app.storefront.addresses.add_address(mock::orchard_lane()).await;

    assert!(matches!(result, Err(StoreError::AuthRequired(_))));
    assert_eq!(app.backend.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn book_follows_session() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;
    let local = addresses.save_local_address(mock::mill_road())?;

    app.backend.on(
        Method::Get,
        "addresses",
        ok(json!([mock::server_address(7, mock::orchard_lane(), true)])),
    );
    app.sign_in_alice().await?;

    let state = addresses.get();
    assert!(!state.book.is_local());
    assert_eq!(active_ids(state.addresses()), vec![AddressId::from(7)]);
    // The browser-only list is left in place.
    assert_eq!(stored_addresses(&app)[0].id, local.id);

    app.backend.on(Method::Post, "logout", ok_empty());
    app.storefront.auth.logout().await;

    let state = addresses.get();
    assert!(state.book.is_local());
    assert_eq!(state.addresses().len(), 1);
    let kept = &state.addresses()[0];
    assert_eq!(kept.id, AddressId::from(7));
    assert!(kept.temp);
    assert!(kept.status);

    Ok(())
}

#[tokio::test]
async fn mode_aware_save_picks_the_book() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;

    addresses.save(mock::orchard_lane()).await?;
    assert_eq!(app.backend.call_count(), 0);

    app.sign_in_alice().await?;
    app.backend.on(
        Method::Post,
        "addresses",
        ok(json!(mock::server_address(11, mock::mill_road(), false))),
    );
    let created = addresses.save(mock::mill_road()).await?;

    assert_eq!(created.id, AddressId::from(11));
    assert_eq!(app.backend.calls_to(Method::Post, "addresses"), 1);
    // The first server address becomes the delivery address.
    assert_eq!(
        active_ids(addresses.get().addresses()),
        vec![AddressId::from(11)]
    );

    Ok(())
}

#[tokio::test]
async fn mode_aware_edit_picks_the_book() -> anyhow::Result<()> {
    let app = spawn_storefront();
    let addresses = &app.storefront.addresses;

    let local = addresses.save(mock::orchard_lane()).await?;
    let edited = addresses.edit(&local.id, mock::mill_road()).await?;
    assert_eq!(edited.id, local.id);
    assert_eq!(edited.city, "Visalia");
    assert_eq!(app.backend.call_count(), 0);

    app.backend.on(
        Method::Get,
        "addresses",
        ok(json!([mock::server_address(11, mock::orchard_lane(), true)])),
    );
    app.sign_in_alice().await?;
    app.backend.on(
        Method::Put,
        "addresses/11",
        ok(json!(mock::server_address(11, mock::mill_road(), true))),
    );
    let updated = addresses.edit(&AddressId::from(11), mock::mill_road()).await?;

    assert_eq!(updated.apt.as_deref(), Some("Unit 4"));
    assert_eq!(app.backend.calls_to(Method::Put, "addresses/11"), 1);
    assert_eq!(addresses.get().addresses()[0].city, "Visalia");

    Ok(())
}

#[tokio::test]
async fn failed_address_fetch_keeps_the_book() -> anyhow::Result<()> {
    let app = signed_in_with_three().await?;
    app.backend.on(
        Method::Get,
        "addresses",
        error(StatusCode::BAD_GATEWAY, "Bad gateway"),
    );
    let addresses = &app.storefront.addresses;

    addresses.fetch_addresses().await;

    let state = addresses.get();
    assert_eq!(state.error.as_deref(), Some("Bad gateway"));
    assert_eq!(state.addresses().len(), 3);
    assert!(!state.is_loading);

    Ok(())
}
