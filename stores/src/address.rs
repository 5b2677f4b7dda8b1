//! Delivery addresses.
//!
//! Anonymous visitors keep a browser-only address book under
//! [`TEMP_ADDRESSES_KEY`]; signed-in users work against the server. The
//! book is one or the other, and the auth store switches it with
//! [`AddressStore::enter_authenticated`] and
//! [`AddressStore::enter_anonymous`].

use payloads::{APIClient, Address, AddressId, requests::NewAddress};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

use crate::auth::AuthState;
use crate::error::{ADDRESS_AUTH_REQUIRED, StoreError};
use crate::persist::{Persist, PersistedDispatch};
use crate::storage::{KeyValueStorage, read_json, write_json};

pub const TEMP_ADDRESSES_KEY: &str = "temp_addresses";
pub const TEMP_DELIVERY_ADDRESS_KEY: &str = "temp_delivery_address";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "addresses", rename_all = "snake_case")]
pub enum AddressBook {
    /// Browser-only addresses of an anonymous visitor.
    Local(Vec<Address>),
    /// The signed-in user's server-backed addresses.
    Remote(Vec<Address>),
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::Local(Vec::new())
    }
}

impl AddressBook {
    pub fn addresses(&self) -> &[Address] {
        match self {
            Self::Local(addresses) | Self::Remote(addresses) => addresses,
        }
    }

    fn addresses_mut(&mut self) -> &mut Vec<Address> {
        match self {
            Self::Local(addresses) | Self::Remote(addresses) => addresses,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    pub fn active(&self) -> Option<&Address> {
        self.addresses().iter().find(|a| a.status)
    }

    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.addresses().iter().find(|a| &a.id == id)
    }
}

/// Make `active` the only active address. Always a full remap, so the
/// at-most-one invariant holds whatever the previous flags were.
pub fn with_active(addresses: &mut [Address], active: &AddressId) {
    for address in addresses.iter_mut() {
        address.status = &address.id == active;
    }
}

/// Collapse duplicate active flags from the server onto the first one.
fn normalize(addresses: &mut [Address]) {
    if let Some(first) = addresses.iter().find(|a| a.status).map(|a| a.id.clone())
    {
        with_active(addresses, &first);
    }
}

/// Remove `id`; when it was the active address, promote the first
/// remaining one. Returns the promoted id.
fn remove_and_promote(
    addresses: &mut Vec<Address>,
    id: &AddressId,
) -> Option<AddressId> {
    let was_active = addresses.iter().any(|a| &a.id == id && a.status);
    addresses.retain(|a| &a.id != id);
    if !was_active {
        return None;
    }
    let promoted = addresses.first()?.id.clone();
    with_active(addresses, &promoted);
    Some(promoted)
}

/// `temp_<millis>`, bumped until it does not collide with an existing id.
pub fn next_temp_id(existing: &[Address], now_millis: i64) -> AddressId {
    let mut millis = now_millis;
    loop {
        let id = AddressId::temp(millis);
        if !existing.iter().any(|a| a.id == id) {
            return id;
        }
        millis += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Store)]
pub struct AddressState {
    pub book: AddressBook,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AddressState {
    pub fn addresses(&self) -> &[Address] {
        self.book.addresses()
    }

    pub fn active_address(&self) -> Option<&Address> {
        self.book.active()
    }
}

impl Persist for AddressState {
    const KEY: &'static str = "address-storage";
    type Snapshot = AddressBook;

    fn snapshot(&self) -> AddressBook {
        self.book.clone()
    }

    fn restore(&mut self, book: AddressBook) {
        self.book = book;
    }
}

#[derive(Clone)]
pub struct AddressStore {
    state: PersistedDispatch<AddressState>,
    auth: Dispatch<AuthState>,
    local: Rc<dyn KeyValueStorage>,
    api: Rc<APIClient>,
}

impl AddressStore {
    pub fn new(
        cx: &Context,
        api: Rc<APIClient>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            state: PersistedDispatch::new(cx, storage.clone()),
            auth: Dispatch::new(cx),
            local: storage,
            api,
        }
    }

    pub fn get(&self) -> Rc<AddressState> {
        self.state.get()
    }

    pub fn dispatch(&self) -> &Dispatch<AddressState> {
        self.state.dispatch()
    }

    /// Restore the persisted book. A local book is refreshed from the
    /// browser-only list, which may have changed in another tab.
    pub fn hydrate(&self) {
        self.state.hydrate();
        if self.get().book.is_local() {
            self.load_local_addresses();
        }
    }

    fn set_error(&self, error: &StoreError) {
        let message = error.to_string();
        self.state.reduce_mut(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
    }

    /// Proactive login check: no request is sent for an anonymous user.
    fn require_login(&self) -> Result<(), StoreError> {
        if self.auth.get().is_logged_in() {
            return Ok(());
        }
        let error = StoreError::AuthRequired(ADDRESS_AUTH_REQUIRED);
        self.set_error(&error);
        Err(error)
    }

    fn record<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(e) = &result {
            tracing::warn!("Address action failed: {e}");
            self.set_error(e);
        }
        result
    }

    fn update_remote(&self, f: impl FnOnce(&mut Vec<Address>)) {
        self.state.reduce_mut(|s| {
            s.is_loading = false;
            s.error = None;
            if s.book.is_local() {
                s.book = AddressBook::Remote(Vec::new());
            }
            if let AddressBook::Remote(addresses) = &mut s.book {
                f(addresses);
            }
        });
    }
}

/// Server-backed operations for a signed-in user.
impl AddressStore {
    /// Replace the book with the server's list. Failures are recorded, not
    /// returned.
    pub async fn fetch_addresses(&self) {
        if self.require_login().is_err() {
            return;
        }
        self.state.reduce_mut(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.api.get_addresses().await {
            Ok(mut addresses) => {
                normalize(&mut addresses);
                tracing::debug!(count = addresses.len(), "Fetched addresses");
                self.state.reduce_mut(|s| {
                    s.book = AddressBook::Remote(addresses);
                    s.is_loading = false;
                });
            }
            Err(e) => {
                let error = StoreError::from(e);
                tracing::warn!("Could not fetch addresses: {error}");
                self.set_error(&error);
            }
        }
    }

    pub async fn add_address(
        &self,
        details: NewAddress,
    ) -> Result<Address, StoreError> {
        self.require_login()?;
        let result = async {
            details.validate()?;
            Ok(self.api.create_address(&details).await?)
        }
        .await;
        let address = self.record(result)?;

        let created = address.clone();
        self.update_remote(move |addresses| {
            let id = created.id.clone();
            let active = created.status;
            addresses.push(created);
            if active || addresses.len() == 1 {
                with_active(addresses, &id);
            }
        });
        Ok(address)
    }

    pub async fn update_address(
        &self,
        id: &AddressId,
        details: NewAddress,
    ) -> Result<Address, StoreError> {
        self.require_login()?;
        let result = async {
            details.validate()?;
            Ok(self.api.update_address(id, &details).await?)
        }
        .await;
        let address = self.record(result)?;

        let updated = address.clone();
        self.update_remote(move |addresses| {
            let id = updated.id.clone();
            let active = updated.status;
            match addresses.iter_mut().find(|a| a.id == id) {
                Some(existing) => *existing = updated,
                None => addresses.push(updated),
            }
            if active {
                with_active(addresses, &id);
            }
        });
        Ok(address)
    }

    /// Delete an address. If it was the delivery address the first
    /// remaining one takes over, locally and (best effort) on the server.
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), StoreError> {
        self.require_login()?;
        let result = self.api.delete_address(id).await.map_err(StoreError::from);
        self.record(result)?;

        let mut promoted = None;
        self.update_remote(|addresses| {
            promoted = remove_and_promote(addresses, id);
        });

        if let Some(promoted) = promoted
            && let Err(e) = self.api.activate_address(&promoted).await
        {
            tracing::warn!(
                address = %promoted,
                "Could not activate promoted address on the server: {e}"
            );
        }
        Ok(())
    }

    pub async fn set_active_address(
        &self,
        id: &AddressId,
    ) -> Result<(), StoreError> {
        self.require_login()?;
        if self.get().book.get(id).is_none() {
            return self.record(Err(StoreError::AddressNotFound(id.to_string())));
        }
        let result = self.api.activate_address(id).await.map_err(StoreError::from);
        self.record(result)?;
        self.update_remote(|addresses| with_active(addresses, id));
        Ok(())
    }
}

/// Browser-only operations for an anonymous visitor.
impl AddressStore {
    fn read_local(&self) -> Vec<Address> {
        match read_json::<Vec<Address>>(&*self.local, TEMP_ADDRESSES_KEY) {
            Ok(addresses) => addresses.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Discarding unreadable local addresses: {e}");
                Vec::new()
            }
        }
    }

    /// Write the list and its active entry, and mirror it into a local book.
    fn write_local(&self, addresses: Vec<Address>) {
        if let Err(e) = write_json(&*self.local, TEMP_ADDRESSES_KEY, &addresses)
        {
            tracing::error!("Failed to store local addresses: {e}");
        }
        let delivery = match addresses.iter().find(|a| a.status) {
            Some(active) => write_json(&*self.local, TEMP_DELIVERY_ADDRESS_KEY, active),
            None => self.local.remove_item(TEMP_DELIVERY_ADDRESS_KEY),
        };
        if let Err(e) = delivery {
            tracing::error!("Failed to store local delivery address: {e}");
        }

        self.state.reduce_mut(|s| {
            if s.book.is_local() {
                s.book = AddressBook::Local(addresses);
            }
            s.error = None;
        });
    }

    pub fn load_local_addresses(&self) {
        let mut addresses = self.read_local();
        normalize(&mut addresses);
        self.state.reduce_mut(|s| {
            s.book = AddressBook::Local(addresses);
            s.is_loading = false;
        });
    }

    /// Save a new browser-only address. The newest address becomes the
    /// delivery address.
    pub fn save_local_address(
        &self,
        details: NewAddress,
    ) -> Result<Address, StoreError> {
        self.record(details.validate().map_err(StoreError::from))?;

        let mut addresses = self.read_local();
        let id = next_temp_id(
            &addresses,
            jiff::Timestamp::now().as_millisecond(),
        );
        let address = details.into_temp(id.clone());
        addresses.push(address);
        with_active(&mut addresses, &id);

        let saved = addresses.iter().find(|a| a.id == id).cloned();
        self.write_local(addresses);
        tracing::debug!(address = %id, "Saved local address");
        saved.ok_or(StoreError::AddressNotFound(id.to_string()))
    }

    pub fn update_local_address(
        &self,
        id: &AddressId,
        details: NewAddress,
    ) -> Result<Address, StoreError> {
        self.record(details.validate().map_err(StoreError::from))?;

        let mut addresses = self.read_local();
        let Some(existing) = addresses.iter_mut().find(|a| &a.id == id) else {
            return self.record(Err(StoreError::AddressNotFound(id.to_string())));
        };
        details.apply_to(existing);
        let updated = existing.clone();
        self.write_local(addresses);
        Ok(updated)
    }

    pub fn delete_local_address(&self, id: &AddressId) -> Result<(), StoreError> {
        let mut addresses = self.read_local();
        if !addresses.iter().any(|a| &a.id == id) {
            return self.record(Err(StoreError::AddressNotFound(id.to_string())));
        }
        remove_and_promote(&mut addresses, id);
        self.write_local(addresses);
        Ok(())
    }

    pub fn set_local_active_address(
        &self,
        id: &AddressId,
    ) -> Result<(), StoreError> {
        let mut addresses = self.read_local();
        if !addresses.iter().any(|a| &a.id == id) {
            return self.record(Err(StoreError::AddressNotFound(id.to_string())));
        }
        with_active(&mut addresses, id);
        self.write_local(addresses);
        Ok(())
    }
}

/// Mode-aware entry points for forms that should not care whether the
/// visitor is signed in.
impl AddressStore {
    pub async fn save(&self, details: NewAddress) -> Result<Address, StoreError> {
        if self.get().book.is_local() {
            self.save_local_address(details)
        } else {
            self.add_address(details).await
        }
    }

    pub async fn edit(
        &self,
        id: &AddressId,
        details: NewAddress,
    ) -> Result<Address, StoreError> {
        if self.get().book.is_local() {
            self.update_local_address(id, details)
        } else {
            self.update_address(id, details).await
        }
    }

    pub async fn activate(&self, id: &AddressId) -> Result<(), StoreError> {
        if self.get().book.is_local() {
            self.set_local_active_address(id)
        } else {
            self.set_active_address(id).await
        }
    }

    pub async fn remove(&self, id: &AddressId) -> Result<(), StoreError> {
        if self.get().book.is_local() {
            self.delete_local_address(id)
        } else {
            self.delete_address(id).await
        }
    }
}

/// Transitions driven by the auth store.
impl AddressStore {
    /// Switch to the server-backed book. The browser-only list stays in
    /// storage as a cache; it is not uploaded.
    pub async fn enter_authenticated(&self) {
        if !self.get().book.is_local() {
            return;
        }
        tracing::debug!("Switching address book to server mode");
        self.state.reduce_mut(|s| {
            s.book = AddressBook::Remote(Vec::new());
            s.error = None;
        });
        self.fetch_addresses().await;
    }

    /// Copy the server-backed addresses into browser storage and switch to
    /// the local book, so the visitor keeps their addresses after signing
    /// out.
    pub fn enter_anonymous(&self) {
        self.snapshot_to_local();
        self.load_local_addresses();
    }

    /// Write the server-backed addresses to the browser-only keys, marked
    /// as temporary. Does nothing for a local or empty book.
    pub fn snapshot_to_local(&self) {
        let state = self.get();
        if let AddressBook::Remote(addresses) = &state.book
            && !addresses.is_empty()
        {
            let snapshot: Vec<Address> = addresses
                .iter()
                .cloned()
                .map(|mut a| {
                    a.temp = true;
                    a
                })
                .collect();
            tracing::debug!(count = snapshot.len(), "Snapshotting addresses");
            if let Err(e) =
                write_json(&*self.local, TEMP_ADDRESSES_KEY, &snapshot)
            {
                tracing::error!("Failed to snapshot addresses: {e}");
            }
            if let Some(active) = snapshot.iter().find(|a| a.status)
                && let Err(e) =
                    write_json(&*self.local, TEMP_DELIVERY_ADDRESS_KEY, active)
            {
                tracing::error!("Failed to snapshot delivery address: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str, status: bool) -> Address {
        let mut address = NewAddress {
            street_address: format!("{id} Main St"),
            city: "Fresno".into(),
            state: "CA".into(),
            country: "US".into(),
            postal_code: "93650".into(),
            ..Default::default()
        }
        .into_temp(AddressId::from(id));
        address.status = status;
        address
    }

    fn active_ids(addresses: &[Address]) -> Vec<&str> {
        addresses
            .iter()
            .filter(|a| a.status)
            .map(|a| a.id.0.as_str())
            .collect()
    }

    #[test]
    fn activation_is_exclusive() {
        let mut addresses =
            vec![address("1", true), address("2", true), address("3", false)];
        with_active(&mut addresses, &AddressId::from("3"));
        assert_eq!(active_ids(&addresses), vec!["3"]);
    }

    #[test]
    fn normalize_keeps_first_active() {
        let mut addresses =
            vec![address("1", false), address("2", true), address("3", true)];
        normalize(&mut addresses);
        assert_eq!(active_ids(&addresses), vec!["2"]);
    }

    #[test]
    fn deleting_active_promotes_first_remaining() {
        let mut addresses =
            vec![address("1", false), address("2", true), address("3", false)];
        let promoted = remove_and_promote(&mut addresses, &AddressId::from("2"));
        assert_eq!(promoted, Some(AddressId::from("1")));
        assert_eq!(active_ids(&addresses), vec!["1"]);

        let promoted = remove_and_promote(&mut addresses, &AddressId::from("3"));
        assert_eq!(promoted, None);
        assert_eq!(active_ids(&addresses), vec!["1"]);

        let mut last = vec![address("9", true)];
        assert_eq!(remove_and_promote(&mut last, &AddressId::from("9")), None);
        assert!(last.is_empty());
    }

    #[test]
    fn temp_ids_never_collide() {
        let existing = vec![address("temp_100", false), address("temp_101", false)];
        assert_eq!(next_temp_id(&existing, 100), AddressId::temp(102));
        assert_eq!(next_temp_id(&existing, 500), AddressId::temp(500));
    }
}
