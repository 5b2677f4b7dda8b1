//! Favorites. Kept in memory only; the server list is fetched on demand.

use payloads::{APIClient, ProductId, WishlistItem, requests::AddToWishlist};
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

use crate::auth::AuthState;
use crate::error::{StoreError, WISHLIST_AUTH_REQUIRED};

#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct WishlistState {
    pub items: Vec<WishlistItem>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl WishlistState {
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|i| &i.product_id == product_id)
    }
}

#[derive(Clone)]
pub struct WishlistStore {
    dispatch: Dispatch<WishlistState>,
    auth: Dispatch<AuthState>,
    api: Rc<APIClient>,
}

impl WishlistStore {
    pub fn new(cx: &Context, api: Rc<APIClient>) -> Self {
        Self {
            dispatch: Dispatch::new(cx),
            auth: Dispatch::new(cx),
            api,
        }
    }

    pub fn get(&self) -> Rc<WishlistState> {
        self.dispatch.get()
    }

    pub fn dispatch(&self) -> &Dispatch<WishlistState> {
        &self.dispatch
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get().contains(product_id)
    }

    fn require_login(&self) -> Result<(), StoreError> {
        if self.auth.get().is_logged_in() {
            return Ok(());
        }
        let error = StoreError::AuthRequired(WISHLIST_AUTH_REQUIRED);
        self.fail(&error);
        Err(error)
    }

    fn fail(&self, error: &StoreError) {
        let message = error.to_string();
        self.dispatch.reduce_mut(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
    }

    pub async fn fetch(&self) {
        if self.require_login().is_err() {
            return;
        }
        self.dispatch.reduce_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.api.get_wishlist().await {
            Ok(items) => self.dispatch.reduce_mut(|s| {
                s.items = items;
                s.is_loading = false;
            }),
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Could not load favorites: {error}");
                self.fail(&error);
            }
        }
    }

    /// Add or remove a product. Returns whether it is now a favorite.
    pub async fn toggle(&self, product_id: ProductId) -> Result<bool, StoreError> {
        self.require_login()?;
        let result = if self.contains(&product_id) {
            self.api.remove_from_wishlist(&product_id).await.map(|()| {
                self.dispatch
                    .reduce_mut(|s| s.items.retain(|i| i.product_id != product_id));
                false
            })
        } else {
            let details = AddToWishlist { product_id };
            self.api.add_to_wishlist(&details).await.map(|item| {
                self.dispatch.reduce_mut(|s| {
                    s.items.retain(|i| i.product_id != product_id);
                    s.items.push(item);
                });
                true
            })
        };
        result.map_err(|e| {
            let error = StoreError::from(e);
            self.fail(&error);
            error
        })
    }

    pub fn reset(&self) {
        self.dispatch.reduce_mut(|s| *s = WishlistState::default());
    }
}
