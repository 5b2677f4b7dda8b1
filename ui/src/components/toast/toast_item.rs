use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::toast::{FollowUp, Tone, Toast, use_toast};

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

/// Container classes and the glyph shown beside the message.
fn palette(tone: Tone) -> (&'static str, &'static str) {
    match tone {
        Tone::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 text-red-700 dark:text-red-400",
            "✕",
        ),
        Tone::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
        Tone::Info => (
            "bg-neutral-50 dark:bg-neutral-800 border-neutral-200 dark:border-neutral-700 text-neutral-700 dark:text-neutral-300",
            "ℹ",
        ),
    }
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toasts = use_toast();
    let navigator = use_navigator();
    let toast = &props.toast;
    let (colors, glyph) = palette(toast.tone);

    let on_close = {
        let toasts = toasts.clone();
        let id = toast.id;
        Callback::from(move |_: MouseEvent| toasts.dismiss(id))
    };

    let follow_up = toast.follow_up.map(|follow_up| {
        let id = toast.id;
        let toasts = toasts.clone();
        let navigator = navigator.clone();
        match follow_up {
            FollowUp::SignIn => {
                let onclick = Callback::from(move |_: MouseEvent| {
                    toasts.dismiss(id);
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Login);
                    }
                });
                html! {
                    <button {onclick} class="mt-2 text-sm font-semibold underline hover:no-underline">
                        {"Sign in"}
                    </button>
                }
            }
        }
    });

    html! {
        <div role="status" class={classes!("p-4", "rounded-lg", "border", "shadow-lg", colors)}>
            <div class="flex items-start gap-3">
                <span class="text-sm font-medium">{glyph}</span>
                <div class="flex-1 min-w-0">
                    <p class="text-sm font-medium leading-5">{&toast.message}</p>
                    {for follow_up}
                </div>
                <button
                    onclick={on_close}
                    class="text-neutral-400 hover:text-neutral-600 dark:hover:text-neutral-200 transition-colors"
                    title="Dismiss"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}
