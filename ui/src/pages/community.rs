use payloads::{Courier, LeaderboardEntry, Volunteer};
use yew::prelude::*;

use crate::hooks::{FetchOptions, use_api_fetch};

/// Leaderboard, couriers and volunteers side by side.
#[function_component]
pub fn CommunityPage() -> Html {
    let leaderboard = use_api_fetch::<Vec<LeaderboardEntry>>(
        "leaderboard".into(),
        FetchOptions::default(),
    );
    let couriers =
        use_api_fetch::<Vec<Courier>>("couriers".into(), FetchOptions::default());
    let volunteers = use_api_fetch::<Vec<Volunteer>>(
        "volunteers".into(),
        FetchOptions::default(),
    );

    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Community"}
            </h1>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                <section class="space-y-3">
                    <h2 class="text-xl font-semibold">{"Leaderboard"}</h2>
                    {leaderboard.render("leaderboard", |entries, _, _| html! {
                        <ol class="space-y-2">
                            {for entries.iter().enumerate().map(|(i, entry)| html! {
                                <li key={entry.user_id.to_string()} class="flex justify-between">
                                    <span>{format!("{}. {}", entry.rank.unwrap_or(i as u32 + 1), entry.name)}</span>
                                    <span class="font-medium">{entry.points}</span>
                                </li>
                            })}
                        </ol>
                    })}
                </section>
                <section class="space-y-3">
                    <h2 class="text-xl font-semibold">{"Couriers"}</h2>
                    {couriers.render("couriers", |couriers, _, _| html! {
                        <ul class="space-y-2">
                            {for couriers.iter().map(|courier| html! {
                                <li key={courier.id} class="flex justify-between">
                                    <span>
                                        {&courier.name}
                                        if let Some(vehicle) = &courier.vehicle {
                                            <span class="text-sm text-neutral-500">{format!(" ({vehicle})")}</span>
                                        }
                                    </span>
                                    if courier.available {
                                        <span class="text-sm text-green-600">{"Available"}</span>
                                    }
                                </li>
                            })}
                        </ul>
                    })}
                </section>
                <section class="space-y-3">
                    <h2 class="text-xl font-semibold">{"Volunteers"}</h2>
                    {volunteers.render("volunteers", |volunteers, _, _| html! {
                        <ul class="space-y-2">
                            {for volunteers.iter().map(|volunteer| html! {
                                <li key={volunteer.id} class="flex justify-between">
                                    <span>{&volunteer.name}</span>
                                    if let Some(hours) = volunteer.hours {
                                        <span class="text-sm text-neutral-500">{format!("{hours} h")}</span>
                                    }
                                </li>
                            })}
                        </ul>
                    })}
                </section>
            </div>
        </div>
    }
}
