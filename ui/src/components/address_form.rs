use payloads::{Address, requests::NewAddress};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::{storefront::use_storefront, toast::use_toast};

#[derive(Properties, PartialEq)]
pub struct AddressFormProps {
    /// Edit this address instead of creating a new one.
    #[prop_or_default]
    pub editing: Option<Address>,
    pub on_saved: Callback<Address>,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

const FIELDS: &[(&str, &str)] = &[
    ("street_address", "Street address"),
    ("apt", "Apartment, suite (optional)"),
    ("city", "City"),
    ("state", "State"),
    ("postal_code", "Postal code"),
    ("country", "Country"),
];

fn field_value(details: &NewAddress, name: &str) -> String {
    match name {
        "street_address" => details.street_address.clone(),
        "apt" => details.apt.clone().unwrap_or_default(),
        "city" => details.city.clone(),
        "state" => details.state.clone(),
        "postal_code" => details.postal_code.clone(),
        "country" => details.country.clone(),
        _ => String::new(),
    }
}

fn set_field(details: &mut NewAddress, name: &str, value: String) {
    match name {
        "street_address" => details.street_address = value,
        "apt" => details.apt = (!value.trim().is_empty()).then_some(value),
        "city" => details.city = value,
        "state" => details.state = value,
        "postal_code" => details.postal_code = value,
        "country" => details.country = value,
        _ => {}
    }
}

/// Create or edit a delivery address. Works the same signed in or not;
/// the address store decides where the address is kept.
#[function_component]
pub fn AddressForm(props: &AddressFormProps) -> Html {
    let storefront = use_storefront();
    let toast = use_toast();
    let details = use_state(|| {
        props
            .editing
            .as_ref()
            .map(NewAddress::from)
            .unwrap_or_default()
    });
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_submit = {
        let details = details.clone();
        let error = error.clone();
        let saving = saving.clone();
        let editing = props.editing.as_ref().map(|a| a.id.clone());
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(e) = details.validate() {
                error.set(Some(e.message()));
                return;
            }
            error.set(None);
            saving.set(true);

            let storefront = storefront.clone();
            let toast = toast.clone();
            let details = (*details).clone();
            let editing = editing.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match &editing {
                    Some(id) => storefront.addresses.edit(id, details).await,
                    None => storefront.addresses.save(details).await,
                };
                saving.set(false);
                match result {
                    Ok(address) => {
                        toast.success("Address saved");
                        on_saved.emit(address);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_cancel = props.on_cancel.clone().map(|cb| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(());
        })
    });

    html! {
        <form onsubmit={on_submit} class="space-y-4 bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700">
            if let Some(error) = &*error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {for FIELDS.iter().map(|&(name, label)| {
                    let oninput = {
                        let details = details.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = (*details).clone();
                            set_field(&mut next, name, input.value());
                            details.set(next);
                        })
                    };
                    html! {
                        <div key={name}>
                            <label for={name} class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                                {label}
                            </label>
                            <input
                                id={name}
                                type="text"
                                value={field_value(&details, name)}
                                {oninput}
                                disabled={*saving}
                                class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100"
                            />
                        </div>
                    }
                })}
            </div>

            <div class="flex justify-end space-x-3">
                if let Some(on_cancel) = on_cancel {
                    <button
                        onclick={on_cancel}
                        class="px-4 py-2 rounded-md text-sm font-medium bg-neutral-100 hover:bg-neutral-200 dark:bg-neutral-700 dark:hover:bg-neutral-600 transition-colors"
                    >
                        {"Cancel"}
                    </button>
                }
                <button
                    type="submit"
                    disabled={*saving}
                    class="px-4 py-2 rounded-md text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 disabled:opacity-50 transition-colors"
                >
                    {if *saving { "Saving..." } else { "Save address" }}
                </button>
            </div>
        </form>
    }
}
