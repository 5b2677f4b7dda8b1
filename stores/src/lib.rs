//! Client state for the storefront: session, cart, addresses and
//! favorites, plus the fetch and pagination primitives the UI hooks are
//! built on.
//!
//! Stores live in a [`yewdux::Context`]. The browser uses the global
//! context; tests build a fresh one per case.

pub mod address;
pub mod auth;
pub mod cart;
pub mod config;
pub mod error;
pub mod faq;
pub mod fetch;
pub mod pagination;
pub mod persist;
pub mod storage;
pub mod verification;
pub mod wishlist;

pub use address::{AddressBook, AddressState, AddressStore};
pub use auth::{AuthPhase, AuthState, AuthStore};
pub use cart::{CartState, CartStore};
pub use config::StoreConfig;
pub use error::StoreError;
pub use fetch::{FetchState, Resource};
pub use pagination::{FeedView, PageOptions, PageState, PaginatedFeed};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use verification::VerificationLink;
pub use wishlist::{WishlistState, WishlistStore};

use payloads::APIClient;
use std::rc::Rc;
use yewdux::Context;

/// Every store, wired to one API client and one storage backend.
#[derive(Clone)]
pub struct Storefront {
    pub api: Rc<APIClient>,
    pub auth: AuthStore,
    pub cart: CartStore,
    pub addresses: AddressStore,
    pub wishlist: WishlistStore,
    pub config: StoreConfig,
}

impl Storefront {
    pub fn new(
        cx: &Context,
        api: Rc<APIClient>,
        storage: Rc<dyn KeyValueStorage>,
        config: StoreConfig,
    ) -> Self {
        let addresses = AddressStore::new(cx, api.clone(), storage.clone());
        Self {
            auth: AuthStore::new(
                cx,
                api.clone(),
                storage.clone(),
                addresses.clone(),
            ),
            cart: CartStore::new(cx, api.clone(), storage),
            wishlist: WishlistStore::new(cx, api.clone()),
            addresses,
            api,
            config,
        }
    }

    /// Restore persisted state. Call once before rendering.
    pub fn hydrate(&self) {
        self.auth.hydrate();
        self.cart.hydrate();
        self.addresses.hydrate();
    }

    /// Log out and drop every per-user store.
    pub async fn sign_out(&self) {
        self.auth.logout().await;
        self.cart.reset();
        self.wishlist.reset();
    }

    /// A feed over one list endpoint, using the configured page size.
    pub fn feed<T: serde::de::DeserializeOwned>(
        &self,
        url: impl Into<String>,
        shape: payloads::responses::ListShape,
    ) -> PaginatedFeed<T> {
        PaginatedFeed::new(
            self.api.clone(),
            url,
            PageOptions::new(self.config.page_size).shape(shape),
        )
    }
}

impl PartialEq for Storefront {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
    }
}
