use payloads::requests;
use stores::AuthState;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::config::ClientConfig;
use crate::contexts::{
    storefront::use_storefront,
    toast::{Toast, use_toast},
};

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub title: AttrValue,
    pub description: AttrValue,
    #[prop_or_default]
    pub on_success: Callback<payloads::User>,
}

#[function_component]
pub fn LoginForm(props: &LoginFormProps) -> Html {
    let storefront = use_storefront();
    let auth = use_store_value::<AuthState>();
    let toast = use_toast();

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let validation_error = use_state(|| None::<String>);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let validation_error = validation_error.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let credentials = requests::LoginCredentials {
                email: email_input.value().trim().to_string(),
                password: password_input.value(),
            };

            if let Err(e) = credentials.validate() {
                validation_error.set(Some(e.message()));
                return;
            }
            validation_error.set(None);

            let storefront = storefront.clone();
            let on_success = on_success.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Ok(user) = storefront.auth.sign_in(&credentials).await {
                    storefront.cart.fetch_cart().await;
                    if !user.is_verified() {
                        toast.show(
                            Toast::info("Check your inbox to verify your email")
                                .sticky(),
                        );
                    }
                    on_success.emit(user);
                }
            });
        })
    };

    let error = (*validation_error).clone().or_else(|| auth.error.clone());
    let is_loading = auth.is_loading;

    html! {
        <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
            <div class="mb-8 text-center">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                    {&props.title}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {&props.description}
                </p>
            </div>

            <form onsubmit={on_submit} class="space-y-6">
                if let Some(error) = error {
                    <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    </div>
                }

                <div>
                    <label for="email" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                        {"Email"}
                    </label>
                    <input
                        ref={email_ref}
                        type="email"
                        id="email"
                        autocomplete="email"
                        class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100"
                        disabled={is_loading}
                    />
                </div>

                <div>
                    <label for="password" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                        {"Password"}
                    </label>
                    <input
                        ref={password_ref}
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100"
                        disabled={is_loading}
                    />
                </div>

                <button
                    type="submit"
                    disabled={is_loading}
                    class="w-full py-2 px-4 rounded-md text-white bg-neutral-900 hover:bg-neutral-700 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-300 disabled:opacity-50 transition-colors"
                >
                    {if is_loading { "Signing in..." } else { "Sign in" }}
                </button>

                if ClientConfig::from_build_env().is_dev_mode() {
                    <p class="text-xs text-center text-neutral-500 dark:text-neutral-400">
                        {"Development backend: use a seeded account"}
                    </p>
                }
            </form>
        </div>
    }
}
