use payloads::{Method, StatusCode, requests::LoginCredentials};
use serde_json::json;
use stores::{
    AuthPhase, KeyValueStorage, StoreError, VerificationLink,
    auth::LEGACY_USER_KEY,
};
use test_helpers::{
    Reply, TestStorefront, error, mock, ok, ok_empty, rejected,
    spawn_storefront,
};

/// Write an `auth-storage` entry as a previous page load would have.
fn seed_session(app: &TestStorefront, state: serde_json::Value) {
    app.storage
        .set_item(
            "auth-storage",
            &json!({ "state": state, "version": 0 }).to_string(),
        )
        .unwrap();
}

#[tokio::test]
async fn sign_in_starts_session() -> anyhow::Result<()> {
    let app = spawn_storefront();
    assert_eq!(app.storefront.auth.get().phase(), AuthPhase::Anonymous);

    let user = app.sign_in_alice().await?;

    let auth = app.storefront.auth.get();
    assert_eq!(auth.phase(), AuthPhase::Authenticated);
    assert_eq!(auth.user.as_ref(), Some(&user));
    assert!(app.api.has_token());
    assert_eq!(app.stored(LEGACY_USER_KEY), Some(json!(mock::alice())));
    assert_eq!(
        app.stored("auth-storage"),
        Some(json!({
            "state": { "user": mock::alice(), "token": mock::ALICE_TOKEN },
            "version": 0
        }))
    );
    assert!(!app.storefront.addresses.get().book.is_local());

    Ok(())
}

#[tokio::test]
async fn failed_sign_in_records_message() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend
        .on(Method::Post, "login", rejected("Invalid credentials"));

    let result = app
        .storefront
        .auth
        .sign_in(&mock::alice_login_credentials())
        .await;

    assert!(result.is_err());
    let auth = app.storefront.auth.get();
    assert_eq!(auth.error.as_deref(), Some("Invalid credentials"));
    assert!(!auth.is_logged_in());
    assert!(!auth.is_loading);

    Ok(())
}

#[tokio::test]
async fn invalid_credentials_are_not_sent() -> anyhow::Result<()> {
    let app = spawn_storefront();

    let result = app
        .storefront
        .auth
        .sign_in(&LoginCredentials {
            email: "not-an-email".into(),
            password: "x".into(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(app.backend.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn logout_clears_session_when_server_unreachable() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;
    app.backend.on(Method::Post, "logout", Reply::NetworkError);

    app.storefront.auth.logout().await;

    let auth = app.storefront.auth.get();
    assert_eq!(auth.phase(), AuthPhase::Anonymous);
    assert_eq!(auth.user, None);
    assert_eq!(auth.token, None);
    assert!(!app.api.has_token());
    assert_eq!(app.stored(LEGACY_USER_KEY), None);
    assert_eq!(app.backend.calls_to(Method::Post, "logout"), 1);
    assert!(app.storefront.addresses.get().book.is_local());

    Ok(())
}

#[tokio::test]
async fn startup_keeps_cached_user_when_refresh_fails() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;

    let reloaded = app.reload();
    reloaded.storefront.hydrate();
    assert!(reloaded.api.has_token());
    app.backend
        .on(Method::Get, "user", error(StatusCode::BAD_GATEWAY, "Bad gateway"));

    reloaded.storefront.auth.initialize_auth().await;

    let auth = reloaded.storefront.auth.get();
    assert_eq!(auth.user, Some(mock::alice()));
    assert_eq!(auth.error.as_deref(), Some("Bad gateway"));

    Ok(())
}

#[tokio::test]
async fn startup_with_expired_token_signs_out() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.sign_in_alice().await?;

    let reloaded = app.reload();
    reloaded.storefront.hydrate();
    app.backend.on(
        Method::Get,
        "user",
        error(StatusCode::UNAUTHORIZED, "Unauthenticated."),
    );

    reloaded.storefront.auth.initialize_auth().await;

    let auth = reloaded.storefront.auth.get();
    assert_eq!(auth.phase(), AuthPhase::Anonymous);
    assert!(!reloaded.api.has_token());

    Ok(())
}

#[tokio::test]
async fn startup_without_session_does_nothing() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.storefront.hydrate();

    app.storefront.auth.initialize_auth().await;

    assert_eq!(app.backend.call_count(), 0);
    assert_eq!(app.storefront.auth.get().phase(), AuthPhase::Anonymous);

    Ok(())
}

#[tokio::test]
async fn verification_reloads_user() -> anyhow::Result<()> {
    let app = spawn_storefront();
    app.backend.on(
        Method::Post,
        "login",
        ok(json!({ "user": mock::unverified_bob(), "token": "bob-token" })),
    );
    app.backend.on(Method::Get, "addresses", ok(json!([])));
    app.storefront
        .auth
        .sign_in(&LoginCredentials {
            email: "bob@example.com".into(),
            password: "password".into(),
        })
        .await?;
    assert!(app.storefront.auth.get().needs_verification());

    let mut verified = mock::unverified_bob();
    verified.email_verified_at = Some("2025-02-01T12:00:00Z".parse()?);
    app.backend
        .on(Method::Post, "verify-email", ok_empty())
        .on(Method::Get, "user", ok(json!(verified)));

    let link = VerificationLink::from_query("?token=abc&email=bob%40example.com")
        .expect("valid link");
    app.storefront.auth.verify_email(link).await?;

    assert!(!app.storefront.auth.get().needs_verification());
    let body = app
        .backend
        .calls()
        .into_iter()
        .find(|c| c.path == "verify-email")
        .and_then(|c| c.body);
    assert_eq!(
        body,
        Some(json!({ "token": "abc", "email": "bob@example.com" }))
    );

    Ok(())
}

#[tokio::test]
async fn startup_with_only_a_token_loads_the_user() -> anyhow::Result<()> {
    let app = spawn_storefront();
    seed_session(&app, json!({ "user": null, "token": mock::ALICE_TOKEN }));
    app.backend
        .on(Method::Get, "user", ok(json!(mock::alice())))
        .on(Method::Get, "addresses", ok(json!([])));

    app.storefront.hydrate();
    assert_eq!(app.storefront.auth.get().phase(), AuthPhase::Authenticating);
    app.storefront.auth.initialize_auth().await;

    let auth = app.storefront.auth.get();
    assert_eq!(auth.phase(), AuthPhase::Authenticated);
    assert_eq!(auth.user, Some(mock::alice()));
    assert_eq!(app.backend.calls_to(Method::Get, "user"), 1);
    let call = app.backend.calls().into_iter().find(|c| c.path == "user");
    assert_eq!(
        call.and_then(|c| c.bearer).as_deref(),
        Some(mock::ALICE_TOKEN)
    );

    Ok(())
}

#[tokio::test]
async fn startup_refreshes_cached_user_without_token() -> anyhow::Result<()> {
    let app = spawn_storefront();
    seed_session(&app, json!({ "user": mock::unverified_bob(), "token": null }));
    app.backend
        .on(Method::Get, "user", ok(json!(mock::alice())))
        .on(Method::Get, "addresses", ok(json!([])));

    app.storefront.hydrate();
    app.storefront.auth.initialize_auth().await;

    let auth = app.storefront.auth.get();
    assert_eq!(auth.user, Some(mock::alice()));
    assert_eq!(auth.phase(), AuthPhase::Authenticated);
    assert_eq!(app.backend.calls_to(Method::Get, "user"), 1);
    assert!(!app.api.has_token());

    Ok(())
}

#[tokio::test]
async fn cached_user_without_token_survives_outage() -> anyhow::Result<()> {
    let app = spawn_storefront();
    seed_session(&app, json!({ "user": mock::alice(), "token": null }));
    app.backend.on(
        Method::Get,
        "user",
        error(StatusCode::SERVICE_UNAVAILABLE, "Down for maintenance"),
    );

    app.storefront.hydrate();
    app.storefront.auth.initialize_auth().await;

    let auth = app.storefront.auth.get();
    assert_eq!(auth.user, Some(mock::alice()));
    assert_eq!(auth.error.as_deref(), Some("Down for maintenance"));

    app.backend.on(
        Method::Get,
        "user",
        error(StatusCode::UNAUTHORIZED, "Unauthenticated."),
    );
    app.storefront.auth.initialize_auth().await;
    assert_eq!(app.storefront.auth.get().user, None);

    Ok(())
}
