use payloads::User;
use yew::prelude::*;

use crate::hooks::{login_form, use_require_auth};

/// Only renders its children when the user is signed in; shows a login
/// form otherwise, so children and their hooks never run anonymously.
///
/// Children that need the user can use the render prop instead.
#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub render: Option<Callback<User, Html>>,
}

#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let Some(user) = use_require_auth() else {
        return login_form();
    };

    if let Some(render) = &props.render {
        return render.emit(user);
    }

    html! {
        <>
            {for props.children.iter()}
        </>
    }
}
