use payloads::{Address, AddressId};
use stores::AddressState;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::AddressForm;
use crate::contexts::{storefront::use_storefront, toast::use_toast};

#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    New,
    Editing(Address),
}

/// Delivery addresses. Visitors who are not signed in get a browser-only
/// book that follows them into their account.
#[function_component]
pub fn AddressesPage() -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let state = use_store_value::<AddressState>();
    let editor = use_state(|| Editor::Closed);

    {
        let storefront = storefront.clone();
        use_effect_with(state.book.is_local(), move |is_local| {
            if !*is_local {
                wasm_bindgen_futures::spawn_local(async move {
                    storefront.addresses.fetch_addresses().await;
                });
            }
        });
    }

    let run = {
        let storefront = storefront.clone();
        let toast = toast.clone();
        move |id: AddressId, remove: bool| {
            let storefront = storefront.clone();
            let toast = toast.clone();
            Callback::from(move |_: MouseEvent| {
                let storefront = storefront.clone();
                let toast = toast.clone();
                let id = id.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = if remove {
                        storefront.addresses.remove(&id).await
                    } else {
                        storefront.addresses.activate(&id).await
                    };
                    if let Err(e) = result {
                        toast.store_error(&e);
                    }
                });
            })
        }
    };

    let open = |next: Editor| {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| editor.set(next.clone()))
    };
    let close = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::Closed))
    };
    let on_saved = {
        let editor = editor.clone();
        Callback::from(move |_: Address| editor.set(Editor::Closed))
    };

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                        {"Delivery addresses"}
                    </h1>
                    if state.book.is_local() {
                        <p class="text-sm text-neutral-600 dark:text-neutral-400 mt-2">
                            {"Saved in this browser. Sign in to keep them with your account."}
                        </p>
                    }
                </div>
                if *editor == Editor::Closed {
                    <button
                        onclick={open(Editor::New)}
                        class="bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 text-white px-4 py-2 rounded-md text-sm font-medium transition-colors"
                    >
                        {"Add address"}
                    </button>
                }
            </div>

            {match &*editor {
                Editor::Closed => html! {},
                Editor::New => html! {
                    <AddressForm on_saved={on_saved.clone()} on_cancel={close.clone()} />
                },
                Editor::Editing(address) => html! {
                    <AddressForm
                        key={address.id.to_string()}
                        editing={address.clone()}
                        on_saved={on_saved.clone()}
                        on_cancel={close.clone()}
                    />
                },
            }}

            if let Some(error) = &state.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }

            if state.is_loading && state.addresses().is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading addresses..."}</p>
            } else if state.addresses().is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">{"No addresses yet."}</p>
            } else {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {for state.addresses().iter().map(|address| html! {
                        <div key={address.id.to_string()} class={classes!(
                            "p-4", "rounded-lg", "border",
                            if address.status {
                                "border-green-500 bg-green-50 dark:bg-green-900/20"
                            } else {
                                "border-neutral-200 dark:border-neutral-700"
                            }
                        )}>
                            <p class="font-medium">{address.one_line()}</p>
                            <div class="mt-3 flex space-x-4 text-sm">
                                if address.status {
                                    <span class="text-green-700 dark:text-green-400">{"Delivering here"}</span>
                                } else {
                                    <button onclick={run(address.id.clone(), false)} class="underline">
                                        {"Deliver here"}
                                    </button>
                                }
                                <button onclick={open(Editor::Editing(address.clone()))} class="underline">
                                    {"Edit"}
                                </button>
                                <button onclick={run(address.id.clone(), true)} class="text-red-600 underline">
                                    {"Delete"}
                                </button>
                            </div>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
