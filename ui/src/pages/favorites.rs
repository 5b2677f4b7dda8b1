use stores::WishlistState;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{ProductCard, RequireAuth};
use crate::contexts::storefront::use_storefront;

#[function_component]
pub fn FavoritesPage() -> Html {
    html! {
        <RequireAuth>
            <FavoritesPageInner />
        </RequireAuth>
    }
}

#[function_component]
fn FavoritesPageInner() -> Html {
    let storefront = use_storefront();
    let wishlist = use_store_value::<WishlistState>();

    use_effect_with((), move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            storefront.wishlist.fetch().await;
        });
    });

    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Favorites"}
            </h1>

            if wishlist.is_loading && wishlist.items.is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading favorites..."}</p>
            } else if let Some(error) = &wishlist.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            } else if wishlist.items.is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Tap the heart on a product to save it here."}
                </p>
            } else {
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                    {for wishlist.items.iter().filter_map(|item| item.product.as_ref()).map(|product| html! {
                        <ProductCard key={product.id.to_string()} product={product.clone()} />
                    })}
                </div>
            }
        </div>
    }
}
