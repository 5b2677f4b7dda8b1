use payloads::CartItemId;
use stores::{AddressState, CartState};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::components::RequireAuth;
use crate::contexts::{storefront::use_storefront, toast::use_toast};

#[function_component]
pub fn CartPage() -> Html {
    html! {
        <RequireAuth>
            <CartPageInner />
        </RequireAuth>
    }
}

#[function_component]
fn CartPageInner() -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let cart = use_store_value::<CartState>();
    let addresses = use_store_value::<AddressState>();

    {
        let storefront = storefront.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                storefront.cart.fetch_cart().await;
            });
        });
    }

    let set_quantity = {
        let storefront = storefront.clone();
        let toast = toast.clone();
        move |item_id: CartItemId, quantity: u32| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            Callback::from(move |_: MouseEvent| {
                let storefront = storefront.clone();
                let toast = toast.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = storefront
                        .cart
                        .update_item_quantity(item_id, quantity)
                        .await
                    {
                        toast.store_error(&e);
                    }
                });
            })
        }
    };

    let on_clear = Callback::from(move |_: MouseEvent| {
        let storefront = storefront.clone();
        let toast = toast.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match storefront.cart.clear().await {
                Ok(()) => toast.info("Cart cleared"),
                Err(e) => toast.store_error(&e),
            }
        });
    });

    if cart.is_loading && cart.items.is_empty() {
        return html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading cart..."}</p>
            </div>
        };
    }

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Your cart"}
                </h1>
                if !cart.items.is_empty() {
                    <button onclick={on_clear} class="text-sm text-red-600 hover:underline">
                        {"Clear cart"}
                    </button>
                }
            </div>

            if let Some(error) = &cart.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }

            if cart.items.is_empty() {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400 mb-4">{"Your cart is empty."}</p>
                    <Link<Route> to={Route::Home} classes="underline">{"Browse products"}</Link<Route>>
                </div>
            } else {
                <div class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {for cart.items.iter().map(|item| html! {
                        <div key={item.id.to_string()} class="py-4 flex items-center justify-between">
                            <div>
                                <p class="font-medium">{&item.name}</p>
                                <p class="text-sm text-neutral-500">
                                    {format!("${}", item.price)}
                                    if let Some(unit) = &item.unit {
                                        {format!(" / {unit}")}
                                    }
                                </p>
                            </div>
                            <div class="flex items-center space-x-3">
                                <button
                                    onclick={set_quantity(item.id, item.quantity.saturating_sub(1))}
                                    class="w-8 h-8 rounded-md bg-neutral-100 dark:bg-neutral-700"
                                >
                                    {"−"}
                                </button>
                                <span class="w-8 text-center">{item.quantity}</span>
                                <button
                                    onclick={set_quantity(item.id, item.quantity + 1)}
                                    class="w-8 h-8 rounded-md bg-neutral-100 dark:bg-neutral-700"
                                >
                                    {"+"}
                                </button>
                                <span class="w-20 text-right font-medium">{format!("${}", item.line_total())}</span>
                                <button
                                    onclick={set_quantity(item.id, 0)}
                                    class="text-sm text-red-600 hover:underline"
                                >
                                    {"Remove"}
                                </button>
                            </div>
                        </div>
                    })}
                </div>

                <div class="flex justify-between items-start border-t border-neutral-200 dark:border-neutral-700 pt-4">
                    <div class="text-sm text-neutral-600 dark:text-neutral-400">
                        {"Deliver to: "}
                        {match addresses.active_address() {
                            Some(address) => html! { {address.one_line()} },
                            None => html! {
                                <Link<Route> to={Route::Addresses} classes="underline">
                                    {"Add a delivery address"}
                                </Link<Route>>
                            },
                        }}
                    </div>
                    <div class="text-right">
                        <p class="text-sm text-neutral-500">
                            {format!("{} items", cart.total_quantity)}
                        </p>
                        <p class="text-xl font-semibold">
                            {format!("Subtotal: ${}", cart.subtotal())}
                        </p>
                    </div>
                </div>
            }
        </div>
    }
}
