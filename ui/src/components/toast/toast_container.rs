use yew::prelude::*;

use super::ToastItem;
use crate::contexts::toast::ToastContext;

/// Stacks the live toasts in the top-right corner, newest at the bottom.
#[function_component]
pub fn ToastContainer() -> Html {
    let toasts = use_context::<ToastContext>()
        .map(|context| context.toasts.clone())
        .unwrap_or_default();

    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div aria-live="polite" class="fixed top-4 right-4 z-50 w-full max-w-sm space-y-3">
            {for toasts.into_iter().map(|toast| html! {
                <ToastItem key={toast.id.to_string()} toast={toast.clone()} />
            })}
        </div>
    }
}
