//! The session: current user and bearer token.
//!
//! The auth store drives the address book between its browser-only and
//! server-backed modes; nothing else switches it.

use futures::future::LocalBoxFuture;
use payloads::{APIClient, User, requests::LoginCredentials};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

use crate::address::AddressStore;
use crate::error::StoreError;
use crate::persist::{Persist, PersistedDispatch};
use crate::storage::{KeyValueStorage, write_json};
use crate::verification::VerificationLink;

/// Older pages read the signed-in user from this key directly.
pub const LEGACY_USER_KEY: &str = "yarvest_current_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    /// A token is known but the user has not been confirmed yet.
    Authenticating,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn phase(&self) -> AuthPhase {
        match (&self.user, &self.token) {
            (Some(_), _) => AuthPhase::Authenticated,
            (None, Some(_)) => AuthPhase::Authenticating,
            _ if self.is_loading => AuthPhase::Authenticating,
            _ => AuthPhase::Anonymous,
        }
    }

    /// Signed in with an address that has not been verified yet.
    pub fn needs_verification(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.is_verified())
    }
}

#[derive(Serialize, Deserialize)]
pub struct AuthSnapshot {
    user: Option<User>,
    token: Option<String>,
}

impl Persist for AuthState {
    const KEY: &'static str = "auth-storage";
    type Snapshot = AuthSnapshot;

    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            user: self.user.clone(),
            token: self.token.clone(),
        }
    }

    fn restore(&mut self, snapshot: AuthSnapshot) {
        self.user = snapshot.user;
        self.token = snapshot.token;
    }
}

#[derive(Clone)]
pub struct AuthStore {
    state: PersistedDispatch<AuthState>,
    addresses: AddressStore,
    legacy: Rc<dyn KeyValueStorage>,
    api: Rc<APIClient>,
}

impl AuthStore {
    pub fn new(
        cx: &Context,
        api: Rc<APIClient>,
        storage: Rc<dyn KeyValueStorage>,
        addresses: AddressStore,
    ) -> Self {
        Self {
            state: PersistedDispatch::new(cx, storage.clone()),
            addresses,
            legacy: storage,
            api,
        }
    }

    pub fn get(&self) -> Rc<AuthState> {
        self.state.get()
    }

    pub fn dispatch(&self) -> &Dispatch<AuthState> {
        self.state.dispatch()
    }

    /// Restore the persisted session and install its token.
    pub fn hydrate(&self) {
        self.state.hydrate();
        self.api.set_token(self.get().token.clone());
    }

    fn mirror_legacy_user(&self, user: &User) {
        if let Err(e) = write_json(&*self.legacy, LEGACY_USER_KEY, user) {
            tracing::warn!("Failed to mirror user to {LEGACY_USER_KEY}: {e}");
        }
    }

    fn clear_session(&self) {
        self.api.set_token(None);
        self.state.reduce_mut(|s| *s = AuthState::default());
        if let Err(e) = self.legacy.remove_item(LEGACY_USER_KEY) {
            tracing::warn!("Failed to clear {LEGACY_USER_KEY}: {e}");
        }
    }

    fn fail(&self, error: &StoreError) {
        let message = error.to_string();
        self.state.reduce_mut(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
    }

    /// Settle the session on startup. Whatever was cached (a token, a user
    /// kept by a cookie session, or both) is checked against `/user`; a
    /// cached user survives a failed check unless the server answers 401.
    pub async fn initialize_auth(&self) {
        let state = self.get();
        if state.token.is_none() && state.user.is_none() {
            return;
        }
        if let Some(token) = &state.token {
            self.api.set_token(Some(token.clone()));
        }

        if self.refresh_user().await.is_ok() {
            self.addresses.enter_authenticated().await;
        }
    }

    /// Start a session. The session is in place when this returns; the
    /// returned future moves the address book to server mode.
    pub fn login(&self, user: User, token: String) -> LocalBoxFuture<'static, ()> {
        tracing::debug!(user = %user.id, "Logged in");
        self.api.set_token(Some(token.clone()));
        self.mirror_legacy_user(&user);
        self.state.reduce_mut(|s| {
            s.user = Some(user);
            s.token = Some(token);
            s.is_loading = false;
            s.error = None;
        });

        let addresses = self.addresses.clone();
        Box::pin(async move { addresses.enter_authenticated().await })
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<User, StoreError> {
        if let Err(e) = credentials.validate() {
            let error = StoreError::from(e);
            self.fail(&error);
            return Err(error);
        }
        self.state.reduce_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.api.login(credentials).await {
            Ok(response) => {
                let user = response.user.clone();
                self.login(response.user, response.token).await;
                Ok(user)
            }
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Sign in failed: {error}");
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// End the session. Local state is cleared even when the server cannot
    /// be reached.
    pub async fn logout(&self) {
        self.addresses.snapshot_to_local();
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Logout request failed: {e}");
        }
        self.clear_session();
        self.addresses.load_local_addresses();
    }

    /// Reload the user from `/user`. A 401 ends the session.
    pub async fn refresh_user(&self) -> Result<User, StoreError> {
        self.state.reduce_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.api.current_user().await {
            Ok(user) => {
                self.mirror_legacy_user(&user);
                let refreshed = user.clone();
                self.state.reduce_mut(move |s| {
                    s.user = Some(refreshed);
                    s.is_loading = false;
                });
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::debug!("Session expired");
                self.addresses.snapshot_to_local();
                self.clear_session();
                self.addresses.load_local_addresses();
                Err(e.into())
            }
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Could not refresh user: {error}");
                self.fail(&error);
                Err(error)
            }
        }
    }

    pub async fn send_verification_email(&self) -> Result<(), StoreError> {
        self.api.send_verification_email().await.map_err(|e| {
            let error = StoreError::from(e);
            self.fail(&error);
            error
        })
    }

    /// Confirm an email address from a verification link, then reload the
    /// user so the new verification timestamp shows up.
    pub async fn verify_email(
        &self,
        link: VerificationLink,
    ) -> Result<(), StoreError> {
        if let Err(e) = self.api.verify_email(&link.into_request()).await {
            let error = StoreError::from(e);
            self.fail(&error);
            return Err(error);
        }
        let state = self.get();
        if state.token.is_some() || state.is_logged_in() {
            self.refresh_user().await?;
        }
        Ok(())
    }
}
