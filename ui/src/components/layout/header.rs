use stores::{AuthState, CartState};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::hooks::use_logout;

const NAV_LINK: &str = "text-sm font-medium text-neutral-700 dark:text-neutral-300 hover:text-neutral-900 dark:hover:text-white transition-colors";

#[function_component]
pub fn Header() -> Html {
    let auth = use_store_value::<AuthState>();
    let cart = use_store_value::<CartState>();
    let on_logout = use_logout();

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center space-x-8">
                        <Link<Route> to={Route::Home} classes="text-xl font-semibold text-neutral-900 dark:text-white">
                            {"Yarvest"}
                        </Link<Route>>
                        <nav class="hidden md:flex items-center space-x-6">
                            <Link<Route> to={Route::Home} classes={NAV_LINK}>{"Shop"}</Link<Route>>
                            <Link<Route> to={Route::Events} classes={NAV_LINK}>{"Events"}</Link<Route>>
                            <Link<Route> to={Route::Addresses} classes={NAV_LINK}>{"Addresses"}</Link<Route>>
                            if auth.is_logged_in() {
                                <Link<Route> to={Route::Favorites} classes={NAV_LINK}>{"Favorites"}</Link<Route>>
                            }
                            if auth.user.as_ref().is_some_and(|u| u.has_role("admin")) {
                                <Link<Route> to={Route::AdminRoles} classes={NAV_LINK}>{"Roles"}</Link<Route>>
                            }
                        </nav>
                    </div>

                    <div class="flex items-center space-x-4">
                        <Link<Route> to={Route::Cart} classes={classes!(NAV_LINK, "relative")}>
                            {"Cart"}
                            if cart.total_quantity > 0 {
                                <span class="ml-1 inline-flex items-center justify-center px-2 py-0.5 rounded-full text-xs font-semibold bg-green-600 text-white">
                                    {cart.total_quantity}
                                </span>
                            }
                        </Link<Route>>
                        if let Some(user) = &auth.user {
                            <span class="text-sm text-neutral-600 dark:text-neutral-400">
                                {user.display_name()}
                            </span>
                            <button onclick={on_logout} class={NAV_LINK}>
                                {"Log out"}
                            </button>
                        } else {
                            <Link<Route> to={Route::Login} classes={NAV_LINK}>{"Sign in"}</Link<Route>>
                        }
                    </div>
                </div>
            </div>
        </header>
    }
}
