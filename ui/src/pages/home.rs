use payloads::{Category, Product, responses::ListShape};
use yew::prelude::*;

use crate::components::{
    InfiniteScrollFetcher, ProductCard, infinite_scroll::Props as ScrollProps,
};
use crate::hooks::{
    FetchOptions, PaginatedOptions, use_api_fetch, use_paginated_api,
};

/// The catalog: every product, a page at a time, optionally narrowed to a
/// category.
#[function_component]
pub fn HomePage() -> Html {
    let category = use_state(|| None::<i64>);
    let categories =
        use_api_fetch::<Vec<Category>>("categories".into(), FetchOptions::default());

    let url: AttrValue = match *category {
        Some(id) => format!("products?category_id={id}").into(),
        None => "products".into(),
    };
    let feed = use_paginated_api::<Product>(
        url,
        PaginatedOptions {
            shape: ListShape::Paginated,
            ..Default::default()
        },
    );

    let select = |id: Option<i64>| {
        let category = category.clone();
        Callback::from(move |_: MouseEvent| category.set(id))
    };
    let chip = |selected: bool| {
        classes!(
            "px-3", "py-1", "rounded-full", "text-sm", "font-medium", "transition-colors",
            if selected {
                "bg-neutral-900 text-white dark:bg-neutral-100 dark:text-neutral-900"
            } else {
                "bg-neutral-100 text-neutral-700 hover:bg-neutral-200 dark:bg-neutral-800 dark:text-neutral-300"
            }
        )
    };

    let grid = html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
            {for feed.state.items().map(|product| html! {
                <ProductCard key={product.id.to_string()} product={product.clone()} />
            })}
        </div>
    };

    html! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Fresh from local farms"}
                </h1>
                <p class="text-lg text-neutral-600 dark:text-neutral-400 mt-2">
                    {"Seasonal produce, picked this week"}
                </p>
            </div>

            if let Some(list) = categories.data.as_ref() {
                <div class="flex flex-wrap gap-2">
                    <button onclick={select(None)} class={chip(category.is_none())}>
                        {"All"}
                    </button>
                    {for list.iter().map(|c| html! {
                        <button
                            key={c.id.to_string()}
                            onclick={select(Some(c.id.0))}
                            class={chip(*category == Some(c.id.0))}
                        >
                            {&c.name}
                        </button>
                    })}
                </div>
            }

            <InfiniteScrollFetcher
                ..ScrollProps::from_state(
                    &feed.state,
                    "products",
                    feed.load_more.clone(),
                    Children::new(vec![grid]),
                )
            />
        </div>
    }
}
