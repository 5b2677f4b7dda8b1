use payloads::User;
use stores::{AuthPhase, AuthState};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::LoginForm;

/// Hook that requires authentication. Returns the user if logged in, or
/// None if logged out or still checking the stored session.
#[hook]
pub fn use_require_auth() -> Option<User> {
    let auth = use_store_value::<AuthState>();
    auth.user.clone()
}

/// Shows a spinner while a stored session is being checked, or a login
/// form if the visitor is anonymous.
#[function_component]
fn LoginFormFallback() -> Html {
    let auth = use_store_value::<AuthState>();

    match auth.phase() {
        AuthPhase::Authenticating => html! {
            <div class="text-center py-8">
                <div class="inline-block animate-spin rounded-full h-8 w-8 border-2 border-neutral-900 dark:border-neutral-100 border-t-transparent dark:border-t-transparent"></div>
            </div>
        },
        AuthPhase::Anonymous => html! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="max-w-md w-full space-y-4">
                    <LoginForm
                        title="Sign in to continue"
                        description="Please sign in to access this page"
                    />
                </div>
            </div>
        },
        AuthPhase::Authenticated => html! {},
    }
}

pub fn login_form() -> Html {
    html! { <LoginFormFallback /> }
}
