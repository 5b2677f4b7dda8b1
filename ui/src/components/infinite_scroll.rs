use js_sys::Array;
use stores::{FeedView, PageState};
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};
use yew::prelude::*;

/// Share of the sentinel that must be visible before the next page loads.
const SENTINEL_THRESHOLD: f64 = 0.1;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub view: FeedView,
    /// Items loaded so far; a change re-arms the sentinel.
    pub item_count: usize,
    pub has_more: bool,
    pub loading: bool,
    pub on_load_more: Callback<()>,
    /// What the list is, for status messages ("products", "events").
    pub context: AttrValue,
    /// The rendered items.
    pub children: Children,
}

impl Props {
    pub fn from_state<T>(
        state: &PageState<T>,
        context: &'static str,
        on_load_more: Callback<()>,
        children: Children,
    ) -> Self {
        Self {
            view: state.view(),
            item_count: state.total(),
            has_more: state.has_more,
            loading: state.loading,
            on_load_more,
            context: context.into(),
            children,
        }
    }
}

/// Renders a page-at-a-time list and loads the next page when the trailing
/// sentinel scrolls into view. Loading, error and empty views carry no
/// sentinel, so a failed first page is not retried by scrolling.
#[function_component]
pub fn InfiniteScrollFetcher(props: &Props) -> Html {
    let sentinel = use_node_ref();
    let observer = use_mut_ref(|| None::<IntersectionObserver>);
    // Read by the observer callback, which outlives individual renders.
    let latest = use_mut_ref(|| (false, Callback::noop()));
    *latest.borrow_mut() =
        (props.has_more && !props.loading, props.on_load_more.clone());

    {
        let observer = observer.clone();
        let latest = latest.clone();
        use_effect_with((), move |_| {
            let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
                let visible = entries.iter().any(|entry| {
                    entry
                        .unchecked_into::<IntersectionObserverEntry>()
                        .is_intersecting()
                });
                let (wants_more, on_load_more) = latest.borrow().clone();
                if visible && wants_more {
                    on_load_more.emit(());
                }
            });

            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(SENTINEL_THRESHOLD));
            match IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            ) {
                Ok(created) => *observer.borrow_mut() = Some(created),
                Err(e) => {
                    tracing::error!("IntersectionObserver unavailable: {e:?}")
                }
            }

            move || {
                if let Some(observer) = observer.borrow_mut().take() {
                    observer.disconnect();
                }
                drop(callback);
            }
        });
    }

    // Re-observe after each page so a sentinel that never left the viewport
    // fires again. The sentinel only exists once the list has items.
    {
        let observer = observer.clone();
        let sentinel = sentinel.clone();
        let listed = props.view.has_sentinel();
        use_effect_with((props.item_count, props.has_more, listed), move |_| {
            if let (Some(observer), Some(element)) =
                (observer.borrow().as_ref(), sentinel.cast::<Element>())
            {
                observer.unobserve(&element);
                observer.observe(&element);
            }
        });
    }

    let body = match &props.view {
        FeedView::InitialLoading => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Loading {}...", props.context)}
                </p>
            </div>
        },
        FeedView::Error(error) => html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">
                    {format!("Error loading {}: {}", props.context, error)}
                </p>
            </div>
        },
        FeedView::Empty => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("No {} found", props.context)}
                </p>
            </div>
        },
        FeedView::Success => html! {
            <>
                {for props.children.iter()}
                if props.loading {
                    <p class="text-center py-4 text-sm text-neutral-500 dark:text-neutral-400">
                        {"Loading more..."}
                    </p>
                }
                <div ref={sentinel} class="h-1" aria-hidden="true"></div>
            </>
        },
    };

    html! { <div>{body}</div> }
}
