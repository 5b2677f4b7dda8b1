use payloads::Product;
use stores::CartState;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::contexts::{storefront::use_storefront, toast::use_toast};
use crate::hooks::{FetchOptions, use_api_fetch};

#[derive(Properties, PartialEq)]
pub struct ProductDetailPageProps {
    pub id: i64,
}

#[function_component]
pub fn ProductDetailPage(props: &ProductDetailPageProps) -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let cart = use_store_value::<CartState>();
    let quantity = use_state(|| 1u32);
    let product = use_api_fetch::<Product>(
        format!("products/{}", props.id).into(),
        FetchOptions::default(),
    );

    let on_quantity = {
        let quantity = quantity.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            quantity.set(input.value().parse().unwrap_or(0));
        })
    };

    product.render("product", |product, _, _| {
        let on_add = {
            let storefront = storefront.clone();
            let toast = toast.clone();
            let product_id = product.id;
            let quantity = *quantity;
            Callback::from(move |_: MouseEvent| {
                let storefront = storefront.clone();
                let toast = toast.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match storefront.cart.add_item(product_id, quantity).await {
                        Ok(_) => toast.success("Added to cart"),
                        Err(e) => toast.store_error(&e),
                    }
                });
            })
        };
        let in_cart = cart.item_for(&product.id).map(|i| i.quantity);

        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                if let Some(image) = &product.image {
                    <img src={image.clone()} alt={product.name.clone()} class="w-full rounded-lg object-cover" />
                }
                <div class="space-y-4">
                    <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                        {&product.name}
                    </h1>
                    <p class="text-2xl text-neutral-700 dark:text-neutral-300">
                        {format!("${}", product.price)}
                        if let Some(unit) = &product.unit {
                            <span class="text-base text-neutral-500">{format!(" / {unit}")}</span>
                        }
                    </p>
                    if let Some(description) = &product.description {
                        <p class="text-neutral-600 dark:text-neutral-400">{description}</p>
                    }
                    if let Some(stock) = product.stock {
                        <p class="text-sm text-neutral-500">{format!("{stock} in stock")}</p>
                    }
                    <div class="flex items-center space-x-3">
                        <input
                            type="number"
                            min="1"
                            value={quantity.to_string()}
                            oninput={on_quantity.clone()}
                            class="w-20 px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
                        />
                        <button
                            onclick={on_add}
                            class="bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 text-white px-4 py-2 rounded-md text-sm font-medium transition-colors"
                        >
                            {"Add to cart"}
                        </button>
                    </div>
                    if let Some(quantity) = in_cart {
                        <p class="text-sm text-green-700 dark:text-green-400">
                            {format!("{quantity} already in your cart")}
                        </p>
                    }
                </div>
            </div>
        }
    })
}
