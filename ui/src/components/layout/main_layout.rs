use stores::AuthState;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::layout::{Footer, Header};
use crate::contexts::storefront::use_storefront;
use crate::contexts::toast::use_toast;
use crate::hooks::use_email_verification;

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    // Handles `?token=..&email=..` on whichever page the link opened.
    use_email_verification();

    html! {
        <div class="min-h-screen flex flex-col bg-white dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100 transition-colors">
            <Header />
            <VerificationBanner />
            <main class="flex-1 w-full max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                {for props.children.iter()}
            </main>
            <Footer />
        </div>
    }
}

#[function_component]
fn VerificationBanner() -> Html {
    let auth = use_store_value::<AuthState>();
    let storefront = use_storefront();
    let toast = use_toast();
    let sending = use_state(|| false);

    if !auth.needs_verification() {
        return html! {};
    }

    let on_resend = {
        let sending = sending.clone();
        Callback::from(move |_: MouseEvent| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            let sending = sending.clone();
            sending.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match storefront.auth.send_verification_email().await {
                    Ok(()) => toast.success("Verification email sent"),
                    Err(e) => toast.store_error(&e),
                }
                sending.set(false);
            });
        })
    };

    html! {
        <div class="bg-amber-50 dark:bg-amber-900/20 border-b border-amber-200 dark:border-amber-800">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-2 flex items-center justify-between">
                <p class="text-sm text-amber-800 dark:text-amber-300">
                    {"Please verify your email address to place orders."}
                </p>
                <button
                    onclick={on_resend}
                    disabled={*sending}
                    class="text-sm font-medium text-amber-900 dark:text-amber-200 underline disabled:opacity-50"
                >
                    {if *sending { "Sending..." } else { "Resend email" }}
                </button>
            </div>
        </div>
    }
}
