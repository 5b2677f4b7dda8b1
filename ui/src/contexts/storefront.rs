use std::rc::Rc;
use stores::Storefront;
use yew::prelude::*;

use crate::config::ClientConfig;
use crate::storage::BrowserStorage;

#[derive(Properties, PartialEq)]
pub struct StorefrontProviderProps {
    pub children: Children,
}

/// Builds the stores once, restores persisted state before the first
/// render and settles the session in the background.
#[function_component]
pub fn StorefrontProvider(props: &StorefrontProviderProps) -> Html {
    let storefront = use_memo((), |_| {
        let config = ClientConfig::from_build_env();
        let storefront = Storefront::new(
            &yewdux::Context::global(),
            Rc::new(crate::get_api_client(&config)),
            Rc::new(BrowserStorage),
            config.stores,
        );
        storefront.hydrate();
        storefront
    });

    {
        let storefront = storefront.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                storefront.auth.initialize_auth().await;
                if storefront.auth.get().is_logged_in() {
                    storefront.cart.fetch_cart().await;
                }
            });
        });
    }

    html! {
        <ContextProvider<Storefront> context={(*storefront).clone()}>
            {props.children.clone()}
        </ContextProvider<Storefront>>
    }
}

#[hook]
pub fn use_storefront() -> Storefront {
    use_context::<Storefront>()
        .expect("use_storefront must be used within a StorefrontProvider")
}
