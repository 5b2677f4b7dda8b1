use payloads::Product;
use stores::{AuthState, CartState, WishlistState};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::contexts::{storefront::use_storefront, toast::use_toast};

#[derive(Properties, PartialEq)]
pub struct ProductCardProps {
    pub product: Product,
}

#[function_component]
pub fn ProductCard(props: &ProductCardProps) -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let auth = use_store_value::<AuthState>();
    let cart = use_store_value::<CartState>();
    let wishlist = use_store_value::<WishlistState>();
    let product = &props.product;

    let in_cart = cart.item_for(&product.id).map(|i| i.quantity);
    let is_favorite = wishlist.contains(&product.id);

    let on_add = {
        let storefront = storefront.clone();
        let toast = toast.clone();
        let product_id = product.id;
        Callback::from(move |_: MouseEvent| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match storefront.cart.add_item(product_id, 1).await {
                    Ok(item) => toast.success(format!("{} added to cart", item.name)),
                    Err(e) => toast.store_error(&e),
                }
            });
        })
    };

    let on_favorite = {
        let product_id = product.id;
        Callback::from(move |_: MouseEvent| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = storefront.wishlist.toggle(product_id).await {
                    toast.store_error(&e);
                }
            });
        })
    };

    html! {
        <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700 overflow-hidden flex flex-col">
            if let Some(image) = &product.image {
                <img src={image.clone()} alt={product.name.clone()} class="h-40 w-full object-cover" />
            }
            <div class="p-4 flex-1 flex flex-col space-y-2">
                <Link<Route>
                    to={Route::Product { id: product.id.0 }}
                    classes="text-lg font-semibold text-neutral-900 dark:text-neutral-100 hover:underline"
                >
                    {&product.name}
                </Link<Route>>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("${}", product.price)}
                    if let Some(unit) = &product.unit {
                        {format!(" / {unit}")}
                    }
                </p>
                <div class="mt-auto flex items-center justify-between pt-2">
                    <button
                        onclick={on_add}
                        class="bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 text-white px-3 py-1.5 rounded-md text-sm font-medium transition-colors"
                    >
                        {match in_cart {
                            Some(quantity) => format!("In cart ({quantity})"),
                            None => "Add to cart".to_string(),
                        }}
                    </button>
                    if auth.is_logged_in() {
                        <button
                            onclick={on_favorite}
                            title={if is_favorite { "Remove from favorites" } else { "Add to favorites" }}
                            class="text-xl text-red-500"
                        >
                            {if is_favorite { "♥" } else { "♡" }}
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
