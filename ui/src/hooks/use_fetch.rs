use payloads::responses::ListShape;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use stores::{
    FetchState, PageOptions, PageState, PaginatedFeed, Resource,
    fetch::{describe_error, fetch_resource},
};
use yew::prelude::*;

use crate::contexts::storefront::use_storefront;

/// Options for [`use_api_fetch`].
#[derive(Clone, PartialEq)]
pub struct FetchOptions<T: 'static> {
    pub enabled: bool,
    pub on_success: Option<Callback<T>>,
    pub on_error: Option<Callback<String>>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            on_success: None,
            on_error: None,
        }
    }
}

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }

    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// The render function receives the data plus the state of any
    /// refetch in progress; data from a previous fetch stays on screen when
    /// a refetch fails.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Fetch one resource from `path` while `enabled` and mounted.
///
/// Callbacks are read through a ref at completion time, so passing new
/// closures on every render never triggers another request.
#[hook]
pub fn use_api_fetch<T>(
    path: AttrValue,
    options: FetchOptions<T>,
) -> FetchHookReturn<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let storefront = use_storefront();
    let resource = use_mut_ref(Resource::<T>::default);
    let mounted = use_mut_ref(|| false);
    let callbacks = use_mut_ref(|| (None, None));
    let update = use_force_update();

    *callbacks.borrow_mut() = (options.on_success.clone(), options.on_error.clone());

    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| {
            *mounted.borrow_mut() = true;
            move || *mounted.borrow_mut() = false
        });
    }

    let refetch = {
        let resource = resource.clone();
        let mounted = mounted.clone();
        let update = update.clone();
        let min_display = storefront.config.min_loading_display;
        let api = storefront.api.clone();

        use_callback(
            (path.clone(), options.enabled),
            move |_, (path, enabled)| {
                if !*enabled || !*mounted.borrow() {
                    return;
                }
                resource.borrow_mut().start();
                update.force_update();

                let resource = resource.clone();
                let callbacks = callbacks.clone();
                let update = update.clone();
                let api = api.clone();
                let path = path.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let delay = gloo_timers::future::TimeoutFuture::new(
                        min_display.as_millis() as u32,
                    );
                    let result =
                        fetch_resource::<T, _>(&api, path.as_str(), delay).await;

                    let (on_success, on_error) = callbacks.borrow().clone();
                    match &result {
                        Ok(data) => {
                            if let Some(cb) = on_success {
                                cb.emit(data.clone());
                            }
                        }
                        Err(e) => {
                            if let Some(cb) = on_error {
                                cb.emit(describe_error(e));
                            }
                        }
                    }
                    resource.borrow_mut().finish(result);
                    update.force_update();
                });
            },
        )
    };

    // Auto-fetch on mount and whenever the path or `enabled` changes
    {
        let refetch = refetch.clone();
        use_effect_with((path, options.enabled), move |_| {
            refetch.emit(());
        });
    }

    let current = resource.borrow().clone();
    FetchHookReturn {
        data: current.data,
        is_loading: current.loading,
        error: current.error,
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}

/// Options for [`use_paginated_api`].
#[derive(Clone, PartialEq)]
pub struct PaginatedOptions<T: 'static> {
    pub enabled: bool,
    /// Defaults to the configured page size.
    pub limit: Option<usize>,
    pub shape: ListShape,
    pub on_success: Option<Callback<Vec<T>>>,
    pub on_error: Option<Callback<String>>,
}

impl<T> Default for PaginatedOptions<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: None,
            shape: ListShape::default(),
            on_success: None,
            on_error: None,
        }
    }
}

pub struct PaginatedHookReturn<T> {
    pub state: PageState<T>,
    pub load_more: Callback<()>,
    pub refetch: Callback<()>,
}

/// Accumulate pages of `url`. A new URL, limit or shape starts a fresh
/// feed.
#[hook]
pub fn use_paginated_api<T>(
    url: AttrValue,
    options: PaginatedOptions<T>,
) -> PaginatedHookReturn<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let storefront = use_storefront();
    let limit = options.limit.unwrap_or(storefront.config.page_size);
    let callbacks = use_mut_ref(|| (None, None));
    let update = use_force_update();

    *callbacks.borrow_mut() = (options.on_success.clone(), options.on_error.clone());

    let key = (url, limit, options.shape);
    let feed = {
        let api = storefront.api.clone();
        use_memo(key.clone(), move |(url, limit, shape)| {
            PaginatedFeed::<T>::new(
                api,
                url.to_string(),
                PageOptions::new(*limit).shape(*shape),
            )
        })
    };

    let run = {
        let update = update.clone();
        move |feed: Rc<PaginatedFeed<T>>, fresh: bool| {
            let update = update.clone();
            let callbacks = callbacks.clone();
            let task_update = update.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let loaded = if fresh {
                    feed.refetch().await
                } else {
                    feed.load_more().await
                };
                if !loaded {
                    return;
                }
                let (on_success, on_error) = callbacks.borrow().clone();
                let state = feed.state();
                match (&state.error, state.pages.last()) {
                    (Some(error), _) => {
                        if let Some(cb) = on_error {
                            cb.emit(error.clone());
                        }
                    }
                    (None, Some(page)) => {
                        if let Some(cb) = on_success {
                            cb.emit(page.clone());
                        }
                    }
                    (None, None) => {}
                }
                drop(state);
                task_update.force_update();
            });
            update.force_update();
        }
    };

    // The memoized feed only changes with `key`, so callbacks keyed on it
    // always see the current feed.
    let load_more = {
        let run = run.clone();
        let feed = feed.clone();
        use_callback(
            (key.clone(), options.enabled),
            move |_, (_, enabled)| {
                if *enabled && feed.state().wants_more() {
                    run(feed.clone(), false);
                }
            },
        )
    };

    let refetch = {
        let feed = feed.clone();
        use_callback(
            (key.clone(), options.enabled),
            move |_, (_, enabled)| {
                if *enabled {
                    run(feed.clone(), true);
                }
            },
        )
    };

    // First page on mount, on a new feed, and when enabled flips on
    {
        let load_more = load_more.clone();
        let feed = feed.clone();
        use_effect_with((key, options.enabled), move |_| {
            if !feed.state().has_data() {
                load_more.emit(());
            }
        });
    }

    let state = feed.state().clone();
    PaginatedHookReturn {
        state,
        load_more,
        refetch,
    }
}
