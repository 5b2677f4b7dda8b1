//! Single-resource fetching: the state a fetch hook exposes and the
//! request wrapper it drives.

use payloads::{APIClient, ClientError};
use serde::de::DeserializeOwned;
use std::future::Future;

pub const FALLBACK_ERROR: &str = "Something went wrong";

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}

/// What a consumer renders for one fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    pub data: FetchState<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: FetchState::NotFetched,
            loading: false,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record the outcome. A failed refetch keeps the previous data.
    pub fn finish(&mut self, result: Result<T, ClientError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = FetchState::Fetched(data);
                self.error = None;
            }
            Err(e) => self.error = Some(describe_error(&e)),
        }
    }

    /// True before the first response arrives.
    pub fn is_initial_loading(&self) -> bool {
        !self.data.is_fetched() && self.error.is_none()
    }
}

/// The message shown for a failed request: the server's own message when it
/// sent one, then the generic error text, then a fixed fallback.
pub fn describe_error(error: &ClientError) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    let generic = error.to_string();
    if generic.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        generic
    }
}

/// Run `request` alongside `delay` and return once both are done, so a fast
/// response still keeps the loading state up for the length of `delay`.
pub async fn with_minimum_display<F, D>(request: F, delay: D) -> F::Output
where
    F: Future,
    D: Future<Output = ()>,
{
    let (output, ()) = futures::join!(request, delay);
    output
}

/// GET `path`, unwrap its envelope, and log failures other than 404s
/// (an absent resource is an expected outcome for several pages).
pub async fn fetch_resource<T, D>(
    api: &APIClient,
    path: &str,
    delay: D,
) -> Result<T, ClientError>
where
    T: DeserializeOwned,
    D: Future<Output = ()>,
{
    let result = with_minimum_display(api.get_data::<T>(path), delay).await;
    if let Err(e) = &result
        && !e.is_not_found()
    {
        tracing::error!(path, "Fetch failed: {e}");
    }
    result
}
