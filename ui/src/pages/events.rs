use jiff::tz::TimeZone;
use payloads::Event;
use yew::prelude::*;

use crate::components::{InfiniteScrollFetcher, infinite_scroll::Props as ScrollProps};
use crate::hooks::{PaginatedOptions, use_paginated_api};

#[function_component]
pub fn EventsPage() -> Html {
    let feed =
        use_paginated_api::<Event>("events".into(), PaginatedOptions::default());

    let list = html! {
        <div class="space-y-4">
            {for feed.state.items().map(|event| html! {
                <div key={event.id} class="p-6 rounded-lg border border-neutral-200 dark:border-neutral-700">
                    <h3 class="text-xl font-semibold text-neutral-900 dark:text-neutral-100">
                        {&event.title}
                    </h3>
                    <p class="text-sm text-neutral-500 dark:text-neutral-400">
                        if let Some(starts_at) = event.starts_at {
                            {starts_at.to_zoned(TimeZone::system()).strftime("%B %d, %Y at %H:%M").to_string()}
                        }
                        if let Some(location) = &event.location {
                            {format!(" · {location}")}
                        }
                    </p>
                    if let Some(description) = &event.description {
                        <p class="mt-2 text-neutral-600 dark:text-neutral-400">{description}</p>
                    }
                </div>
            })}
        </div>
    };

    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Upcoming events"}
            </h1>
            <InfiniteScrollFetcher
                ..ScrollProps::from_state(
                    &feed.state,
                    "events",
                    feed.load_more.clone(),
                    Children::new(vec![list]),
                )
            />
        </div>
    }
}
