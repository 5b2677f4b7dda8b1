use payloads::User;
use stores::AuthState;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::components::LoginForm;

#[function_component]
pub fn LoginPage() -> Html {
    let navigator = use_navigator();
    let auth = use_store_value::<AuthState>();

    // Redirect home once signed in
    {
        let navigator = navigator.clone();
        use_effect_with(auth.is_logged_in(), move |is_logged_in| {
            if *is_logged_in && let Some(navigator) = navigator {
                navigator.push(&Route::Home);
            }
        });
    }

    let on_success = Callback::from(move |_: User| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="max-w-md w-full space-y-4">
                <LoginForm
                    title="Sign in to Yarvest"
                    description="Enter your credentials to continue"
                    {on_success}
                />
            </div>
        </div>
    }
}
