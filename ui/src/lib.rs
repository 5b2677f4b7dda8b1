use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod config;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod storage;

use components::{MainLayout, ToastContainer};
use config::ClientConfig;
use contexts::{storefront::StorefrontProvider, toast::ToastProvider};
use pages::*;

/// API client for the configured backend, or the page's own origin.
pub fn get_api_client(config: &ClientConfig) -> APIClient {
    APIClient::new(config.backend_address())
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <ToastProvider>
            <StorefrontProvider>
                <BrowserRouter>
                    <MainLayout>
                        <Switch<Route> render={switch} />
                    </MainLayout>
                    <ToastContainer />
                </BrowserRouter>
            </StorefrontProvider>
        </ToastProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/products/:id")]
    Product { id: i64 },
    #[at("/cart")]
    Cart,
    #[at("/addresses")]
    Addresses,
    #[at("/favorites")]
    Favorites,
    #[at("/partners")]
    Partners,
    #[at("/events")]
    Events,
    #[at("/community")]
    Community,
    #[at("/admin/roles")]
    AdminRoles,
    #[at("/faq")]
    Faq,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Product { id } => html! { <ProductDetailPage {id} /> },
        Route::Cart => html! { <CartPage /> },
        Route::Addresses => html! { <AddressesPage /> },
        Route::Favorites => html! { <FavoritesPage /> },
        Route::Partners => html! { <PartnersPage /> },
        Route::Events => html! { <EventsPage /> },
        Route::Community => html! { <CommunityPage /> },
        Route::AdminRoles => html! { <AdminRolesPage /> },
        Route::Faq => html! { <FaqPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
