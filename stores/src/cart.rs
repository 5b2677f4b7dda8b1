//! The signed-in user's shopping cart.
//!
//! Every action first checks the auth store; an anonymous call records
//! [`CART_AUTH_REQUIRED`] and makes no request.

use payloads::{
    APIClient, CartItem, CartItemId, ProductId,
    requests::{AddToCart, FieldError, UpdateCartItem},
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

use crate::auth::AuthState;
use crate::error::{CART_AUTH_REQUIRED, StoreError};
use crate::persist::{Persist, PersistedDispatch};
use crate::storage::KeyValueStorage;

#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct CartState {
    pub items: Vec<CartItem>,
    /// Number of lines.
    pub total_items: usize,
    /// Sum of line quantities.
    pub total_quantity: u32,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl CartState {
    /// Totals always follow the full item list.
    fn recompute(&mut self) {
        self.total_items = self.items.len();
        self.total_quantity = self.items.iter().map(|i| i.quantity).sum();
    }

    fn upsert(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.recompute();
    }

    pub fn item_for(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub fn subtotal(&self) -> rust_decimal::Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[derive(Serialize, Deserialize)]
pub struct CartSnapshot {
    items: Vec<CartItem>,
    total_items: usize,
    total_quantity: u32,
}

impl Persist for CartState {
    const KEY: &'static str = "cart-storage";
    type Snapshot = CartSnapshot;

    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total_items: self.total_items,
            total_quantity: self.total_quantity,
        }
    }

    fn restore(&mut self, snapshot: CartSnapshot) {
        self.items = snapshot.items;
        self.recompute();
    }
}

#[derive(Clone)]
pub struct CartStore {
    state: PersistedDispatch<CartState>,
    auth: Dispatch<AuthState>,
    api: Rc<APIClient>,
}

impl CartStore {
    pub fn new(
        cx: &Context,
        api: Rc<APIClient>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            state: PersistedDispatch::new(cx, storage),
            auth: Dispatch::new(cx),
            api,
        }
    }

    pub fn get(&self) -> Rc<CartState> {
        self.state.get()
    }

    pub fn dispatch(&self) -> &Dispatch<CartState> {
        self.state.dispatch()
    }

    pub fn hydrate(&self) {
        self.state.hydrate();
    }

    fn require_login(&self) -> Result<(), StoreError> {
        if self.auth.get().is_logged_in() {
            return Ok(());
        }
        let error = StoreError::AuthRequired(CART_AUTH_REQUIRED);
        self.fail(&error);
        Err(error)
    }

    fn begin(&self) {
        self.state.reduce_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    fn fail(&self, error: &StoreError) {
        let message = error.to_string();
        self.state.reduce_mut(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
    }

    fn finish(&self, f: impl FnOnce(&mut CartState)) {
        self.state.reduce_mut(|s| {
            f(s);
            s.recompute();
            s.is_loading = false;
        });
    }

    /// Record a failed action and hand the error back to the caller.
    fn failed<T>(&self, error: impl Into<StoreError>) -> Result<T, StoreError> {
        let error = error.into();
        tracing::warn!("Cart action failed: {error}");
        self.fail(&error);
        Err(error)
    }

    pub async fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartItem, StoreError> {
        self.require_login()?;
        if quantity == 0 {
            return self.failed(FieldError::InvalidQuantity);
        }
        self.begin();
        let details = AddToCart {
            product_id,
            quantity,
        };
        match self.api.add_to_cart(&details).await {
            Ok(item) => {
                tracing::debug!(%product_id, quantity = item.quantity, "Added to cart");
                let added = item.clone();
                self.finish(move |s| s.upsert(added));
                Ok(item)
            }
            Err(e) => self.failed(e),
        }
    }

    /// Set a line's quantity. Zero removes the line.
    pub async fn update_item_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        self.require_login()?;
        if quantity == 0 {
            return self.remove_item(item_id).await;
        }
        self.begin();
        let details = UpdateCartItem { quantity };
        match self.api.update_cart_item(&item_id, &details).await {
            Ok(item) => {
                self.finish(move |s| {
                    match s.items.iter_mut().find(|i| i.id == item_id) {
                        Some(existing) => *existing = item,
                        None => s.items.push(item),
                    }
                });
                Ok(())
            }
            Err(e) => self.failed(e),
        }
    }

    pub async fn remove_item(&self, item_id: CartItemId) -> Result<(), StoreError> {
        self.require_login()?;
        self.begin();
        match self.api.remove_cart_item(&item_id).await {
            Ok(()) => {
                self.finish(|s| s.items.retain(|i| i.id != item_id));
                Ok(())
            }
            Err(e) => self.failed(e),
        }
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.require_login()?;
        self.begin();
        match self.api.clear_cart().await {
            Ok(()) => {
                self.finish(|s| s.items.clear());
                Ok(())
            }
            Err(e) => self.failed(e),
        }
    }

    /// Replace the cart with the server's copy. Failures are recorded,
    /// not returned.
    pub async fn fetch_cart(&self) {
        if self.require_login().is_err() {
            return;
        }
        self.begin();
        match self.api.get_cart().await {
            Ok(items) => {
                tracing::debug!(lines = items.len(), "Fetched cart");
                self.finish(|s| s.items = items);
            }
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Could not fetch cart: {error}");
                self.fail(&error);
            }
        }
    }

    /// Refresh only the badge totals. The item list is left alone, so the
    /// totals are overwritten again by the next full mutation.
    pub async fn refresh_cart_count(&self) {
        if self.require_login().is_err() {
            return;
        }
        match self.api.cart_count().await {
            Ok(count) => self.state.reduce_mut(|s| {
                s.total_items = count.total_items;
                s.total_quantity = count.total_quantity;
            }),
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Could not refresh cart count: {error}");
                self.fail(&error);
            }
        }
    }

    /// Empty the local cart without touching the server.
    pub fn reset(&self) {
        self.state.reduce_mut(|s| *s = CartState::default());
    }
}
