use payloads::{Role, RoleId, User, UserId, requests::AssignRole};
use stores::fetch::describe_error;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::RequireAuth;
use crate::contexts::{storefront::use_storefront, toast::use_toast};
use crate::hooks::{FetchOptions, use_api_fetch};

#[function_component]
pub fn AdminRolesPage() -> Html {
    let render = Callback::from(|user: User| {
        if user.has_role("admin") {
            html! { <AdminRolesInner /> }
        } else {
            html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"Only administrators can manage roles."}
                    </p>
                </div>
            }
        }
    });

    html! { <RequireAuth {render} /> }
}

#[function_component]
fn AdminRolesInner() -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let roles = use_api_fetch::<Vec<Role>>("roles".into(), FetchOptions::default());
    let user_input = use_node_ref();
    let selected = use_state(|| None::<UserId>);
    let user_roles = use_state(Vec::<Role>::new);

    let load_user = {
        let storefront = storefront.clone();
        let toast = toast.clone();
        let user_roles = user_roles.clone();
        move |user_id: UserId| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            let user_roles = user_roles.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match storefront.api.get_user_roles(&user_id).await {
                    Ok(roles) => user_roles.set(roles),
                    Err(e) => toast.error(describe_error(&e)),
                }
            });
        }
    };

    let on_lookup = {
        let user_input = user_input.clone();
        let selected = selected.clone();
        let toast = toast.clone();
        let load_user = load_user.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = user_input.cast::<HtmlInputElement>() else {
                return;
            };
            match input.value().trim().parse::<i64>() {
                Ok(id) => {
                    selected.set(Some(UserId(id)));
                    load_user(UserId(id));
                }
                Err(_) => toast.error("User id must be a number"),
            }
        })
    };

    let change_role = {
        let storefront = storefront.clone();
        let toast = toast.clone();
        let load_user = load_user.clone();
        move |user_id: UserId, role_id: RoleId, assign: bool| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            let load_user = load_user.clone();
            Callback::from(move |_: MouseEvent| {
                let storefront = storefront.clone();
                let toast = toast.clone();
                let load_user = load_user.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = if assign {
                        storefront
                            .api
                            .assign_role(&AssignRole { user_id, role_id })
                            .await
                    } else {
                        storefront.api.remove_role(&user_id, &role_id).await
                    };
                    match result {
                        Ok(()) => {
                            toast.success("Roles updated");
                            load_user(user_id);
                        }
                        Err(e) => toast.error(describe_error(&e)),
                    }
                });
            })
        }
    };

    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Roles"}
            </h1>

            <form onsubmit={on_lookup} class="flex space-x-3">
                <input
                    ref={user_input}
                    type="text"
                    placeholder="User id"
                    class="px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
                />
                <button
                    type="submit"
                    class="bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 text-white px-4 py-2 rounded-md text-sm font-medium"
                >
                    {"Look up"}
                </button>
            </form>

            {roles.render("roles", |roles, _, _| {
                let Some(user_id) = *selected else {
                    return html! {
                        <ul class="space-y-1">
                            {for roles.iter().map(|role| html! {
                                <li key={role.id.to_string()}>{&role.name}</li>
                            })}
                        </ul>
                    };
                };
                html! {
                    <table class="min-w-full text-sm">
                        <tbody>
                            {for roles.iter().map(|role| {
                                let has = user_roles.iter().any(|r| r.id == role.id);
                                html! {
                                    <tr key={role.id.to_string()} class="border-b border-neutral-200 dark:border-neutral-700">
                                        <td class="py-2">{&role.name}</td>
                                        <td class="py-2 text-right">
                                            <button
                                                onclick={change_role(user_id, role.id, !has)}
                                                class="underline"
                                            >
                                                {if has { "Remove" } else { "Assign" }}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            })}
        </div>
    }
}
