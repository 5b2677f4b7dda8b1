use payloads::{Partner, responses::ListShape};
use yew::prelude::*;

use crate::components::{InfiniteScrollFetcher, infinite_scroll::Props as ScrollProps};
use crate::hooks::{PaginatedOptions, use_paginated_api};

#[function_component]
pub fn PartnersPage() -> Html {
    let feed = use_paginated_api::<Partner>(
        "partners".into(),
        PaginatedOptions {
            shape: ListShape::Keyed("partners"),
            ..Default::default()
        },
    );

    let list = html! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-6">
            {for feed.state.items().map(|partner| html! {
                <div key={partner.id} class="p-4 rounded-lg border border-neutral-200 dark:border-neutral-700 text-center space-y-2">
                    if let Some(logo) = &partner.logo {
                        <img src={logo.clone()} alt={partner.name.clone()} class="h-16 mx-auto object-contain" />
                    }
                    if let Some(website) = &partner.website {
                        <a href={website.clone()} target="_blank" rel="noopener" class="font-medium hover:underline">
                            {&partner.name}
                        </a>
                    } else {
                        <p class="font-medium">{&partner.name}</p>
                    }
                </div>
            })}
        </div>
    };

    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Our partners"}
            </h1>
            <InfiniteScrollFetcher
                ..ScrollProps::from_state(
                    &feed.state,
                    "partners",
                    feed.load_more.clone(),
                    Children::new(vec![list]),
                )
            />
        </div>
    }
}
