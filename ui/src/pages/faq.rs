use stores::faq::{FaqEntry, search};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        category: "Orders",
        question: "How do I place an order?",
        answer: "Add products to your cart, choose a delivery address and check out.",
    },
    FaqEntry {
        category: "Orders",
        question: "Can I change my order after placing it?",
        answer: "Farms start packing the evening before delivery. Until then you can edit quantities from your cart.",
    },
    FaqEntry {
        category: "Delivery",
        question: "Where do you deliver?",
        answer: "Couriers deliver within 30 miles of each partner farm.",
    },
    FaqEntry {
        category: "Delivery",
        question: "Can I save more than one address?",
        answer: "Yes. Add as many as you like and pick the one we should deliver to. Addresses saved before signing in move to your account.",
    },
    FaqEntry {
        category: "Account",
        question: "Why do I need to verify my email?",
        answer: "We send order confirmations and delivery updates by email, so we need an address that reaches you.",
    },
    FaqEntry {
        category: "Account",
        question: "How do I become a volunteer or courier?",
        answer: "Visit the community page and get in touch with the team in your area.",
    },
];

#[function_component]
pub fn FaqPage() -> Html {
    let query = use_state(String::new);

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let matches = search(ENTRIES, &query);

    html! {
        <div class="max-w-3xl mx-auto space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Frequently asked questions"}
            </h1>
            <input
                type="search"
                placeholder="Search questions"
                value={(*query).clone()}
                oninput={on_input}
                class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
            />
            if matches.is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Nothing matches \"{}\"", *query)}
                </p>
            } else {
                <div class="space-y-6">
                    {for matches.iter().map(|entry| html! {
                        <div key={entry.question}>
                            <p class="text-xs uppercase tracking-wide text-neutral-500">{entry.category}</p>
                            <h3 class="font-semibold text-neutral-900 dark:text-neutral-100">{entry.question}</h3>
                            <p class="text-neutral-600 dark:text-neutral-400">{entry.answer}</p>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
