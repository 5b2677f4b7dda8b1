use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::storefront::use_storefront;

#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let storefront = use_storefront();
    let navigator = use_navigator();

    Callback::from(move |_| {
        let storefront = storefront.clone();
        let navigator = navigator.clone();

        wasm_bindgen_futures::spawn_local(async move {
            storefront.sign_out().await;
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    })
}
