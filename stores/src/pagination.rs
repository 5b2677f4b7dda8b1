//! Page-at-a-time list loading for infinite scrolling.
//!
//! There is no total-count field: a page shorter than the requested limit
//! is the last one.

use payloads::{APIClient, requests::page_url, responses::ListShape};
use serde::de::DeserializeOwned;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub limit: usize,
    pub shape: ListShape,
}

impl PageOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            shape: ListShape::default(),
        }
    }

    pub fn shape(mut self, shape: ListShape) -> Self {
        self.shape = shape;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    pub pages: Vec<Vec<T>>,
    /// The last page successfully fetched; 0 before the first.
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped by every refetch; a response from an older generation is
    /// dropped.
    generation: u64,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            page: 0,
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> PageState<T> {
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flatten()
    }

    pub fn total(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn has_data(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Whether the scroll sentinel coming into view should load a page.
    pub fn wants_more(&self) -> bool {
        self.has_more && !self.loading
    }

    pub fn view(&self) -> FeedView {
        FeedView::of(self)
    }

    /// Claim the next page number, or `None` while a request is in flight
    /// or after the last page.
    fn begin(&mut self) -> Option<u32> {
        if !self.wants_more() {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.page + 1)
    }

    fn complete(
        &mut self,
        page: u32,
        limit: usize,
        result: Result<Vec<T>, String>,
    ) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.has_more = items.len() >= limit;
                self.page = page;
                self.pages.push(items);
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// The four mutually exclusive renderings of an infinite list, in priority
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// Nothing fetched yet.
    InitialLoading,
    /// Nothing fetched and the first request failed.
    Error(String),
    /// Fetched successfully with zero items.
    Empty,
    /// Items to render, followed by the scroll sentinel.
    Success,
}

impl FeedView {
    pub fn of<T>(state: &PageState<T>) -> Self {
        if !state.has_data() {
            return match &state.error {
                Some(error) if !state.loading => Self::Error(error.clone()),
                _ => Self::InitialLoading,
            };
        }
        if state.total() == 0 {
            Self::Empty
        } else {
            Self::Success
        }
    }

    /// Only a populated list carries the sentinel that loads the next page.
    pub fn has_sentinel(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Accumulates pages from one list URL. A new URL needs a new feed.
pub struct PaginatedFeed<T> {
    api: Rc<APIClient>,
    url: String,
    options: PageOptions,
    state: Rc<RefCell<PageState<T>>>,
}

impl<T> Clone for PaginatedFeed<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            url: self.url.clone(),
            options: self.options,
            state: self.state.clone(),
        }
    }
}

impl<T: DeserializeOwned> PaginatedFeed<T> {
    pub fn new(
        api: Rc<APIClient>,
        url: impl Into<String>,
        options: PageOptions,
    ) -> Self {
        Self {
            api,
            url: url.into(),
            options,
            state: Rc::new(RefCell::new(PageState::default())),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> PageOptions {
        self.options
    }

    pub fn state(&self) -> Ref<'_, PageState<T>> {
        self.state.borrow()
    }

    /// Fetch the next page. Returns `false` without touching the network
    /// while a page is loading or once the last page has been seen.
    ///
    /// A response that arrives after a [`refetch`](Self::refetch) started
    /// over is discarded and reported as `false`.
    pub async fn load_more(&self) -> bool {
        let (page, generation) = {
            let mut state = self.state.borrow_mut();
            let Some(page) = state.begin() else {
                return false;
            };
            (page, state.generation)
        };

        let result = self.fetch_page(page).await.map_err(|e| {
            tracing::warn!(url = %self.url, page, "Page fetch failed: {e}");
            e.to_string()
        });

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            tracing::debug!(url = %self.url, page, "Dropping stale page");
            return false;
        }
        state.complete(page, self.options.limit, result);
        tracing::debug!(
            url = %self.url,
            page,
            total = state.total(),
            has_more = state.has_more,
            "Loaded page"
        );
        true
    }

    /// Drop every page and load the first one again. A page still in
    /// flight is ignored when it lands.
    pub async fn refetch(&self) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let generation = state.generation + 1;
            *state = PageState {
                generation,
                ..PageState::default()
            };
        }
        self.load_more().await
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<T>, StoreError> {
        let raw = self
            .api
            .get_raw(&page_url(&self.url, page, self.options.limit))
            .await?;
        Ok(self.options.shape.extract(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_ends_the_feed() {
        let mut state = PageState::<u32>::default();
        let page = state.begin().unwrap();
        assert_eq!(page, 1);
        assert_eq!(state.begin(), None, "in-flight request blocks another");

        state.complete(page, 3, Ok(vec![1, 2, 3]));
        assert!(state.has_more);

        let page = state.begin().unwrap();
        state.complete(page, 3, Ok(vec![4]));
        assert!(!state.has_more);
        assert_eq!(state.begin(), None);
        assert_eq!(state.total(), 4);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn failed_page_can_be_retried() {
        let mut state = PageState::<u32>::default();
        let page = state.begin().unwrap();
        state.complete(page, 3, Err("offline".into()));
        assert_eq!(state.view(), FeedView::Error("offline".into()));
        assert!(!state.view().has_sentinel());
        assert_eq!(state.begin(), Some(1));
    }

    #[test]
    fn view_priority() {
        let mut state = PageState::<u32>::default();
        assert_eq!(state.view(), FeedView::InitialLoading);

        state.loading = true;
        state.error = Some("stale".into());
        assert_eq!(state.view(), FeedView::InitialLoading);

        state.loading = false;
        assert_eq!(state.view(), FeedView::Error("stale".into()));

        state.error = None;
        state.pages.push(vec![]);
        assert_eq!(state.view(), FeedView::Empty);
        assert!(!state.view().has_sentinel());

        state.pages.push(vec![7]);
        assert_eq!(state.view(), FeedView::Success);
        assert!(state.view().has_sentinel());

        // A later page failing keeps the items on screen.
        state.error = Some("offline".into());
        assert_eq!(state.view(), FeedView::Success);
    }
}
