//! Persistence for yewdux stores: after every change, a selected part of
//! the state is written to storage under the store's key as
//! `{"state": .., "version": 0}`.

use crate::storage::{KeyValueStorage, read_json, write_json};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

pub const PERSIST_VERSION: u32 = 0;

/// A store with a persisted partial state.
pub trait Persist: Store + Clone {
    const KEY: &'static str;
    type Snapshot: Serialize + DeserializeOwned;

    fn snapshot(&self) -> Self::Snapshot;
    fn restore(&mut self, snapshot: Self::Snapshot);
}

#[derive(Serialize, Deserialize)]
struct Persisted<T> {
    state: T,
    version: u32,
}

/// A dispatch that writes the store's snapshot after every mutation.
pub struct PersistedDispatch<S: Persist> {
    dispatch: Dispatch<S>,
    storage: Rc<dyn KeyValueStorage>,
}

impl<S: Persist> Clone for PersistedDispatch<S> {
    fn clone(&self) -> Self {
        Self {
            dispatch: self.dispatch.clone(),
            storage: self.storage.clone(),
        }
    }
}

impl<S: Persist> PersistedDispatch<S> {
    pub fn new(cx: &Context, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            dispatch: Dispatch::new(cx),
            storage,
        }
    }

    pub fn get(&self) -> Rc<S> {
        self.dispatch.get()
    }

    pub fn dispatch(&self) -> &Dispatch<S> {
        &self.dispatch
    }

    pub fn reduce_mut(&self, f: impl FnOnce(&mut S)) {
        self.dispatch.reduce_mut(f);
        self.write();
    }

    /// Load the persisted snapshot, if any, into the store. Returns whether
    /// anything was restored.
    pub fn hydrate(&self) -> bool {
        match read_json::<Persisted<S::Snapshot>>(&*self.storage, S::KEY) {
            Ok(Some(persisted)) => {
                if persisted.version != PERSIST_VERSION {
                    tracing::warn!(
                        key = S::KEY,
                        version = persisted.version,
                        "Discarding persisted state with unknown version"
                    );
                    return false;
                }
                self.dispatch
                    .reduce_mut(move |state| state.restore(persisted.state));
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(key = S::KEY, "Ignoring persisted state: {e}");
                false
            }
        }
    }

    fn write(&self) {
        let persisted = Persisted {
            state: self.get().snapshot(),
            version: PERSIST_VERSION,
        };
        if let Err(e) = write_json(&*self.storage, S::KEY, &persisted) {
            tracing::error!(key = S::KEY, "Failed to persist state: {e}");
        }
    }
}
