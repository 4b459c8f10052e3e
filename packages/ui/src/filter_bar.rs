use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaMagnifyingGlass;
use dioxus_free_icons::Icon;
use store::FeedFilter;

use crate::filter::{CategoryFilter, LinkFilter};

const FILTER_BAR_CSS: Asset = asset!("/assets/styling/filter_bar.css");

/// Ordering buttons for the public feed.
#[component]
pub fn FeedFilterBar(selected: FeedFilter, on_select: EventHandler<FeedFilter>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: FILTER_BAR_CSS }
        div {
            class: "feed-filter-bar",
            for filter in FeedFilter::ALL {
                button {
                    key: "{filter}",
                    class: if filter == selected { "feed-filter active" } else { "feed-filter" },
                    onclick: move |_| on_select.call(filter),
                    "{filter}"
                }
            }
        }
    }
}

/// Search box plus category select. Emits the whole updated filter.
#[component]
pub fn SearchBar(
    filter: LinkFilter,
    categories: Vec<CategoryFilter>,
    on_change: EventHandler<LinkFilter>,
) -> Element {
    let term = filter.term().to_string();
    let selected = filter.category().label().to_string();
    let for_category = filter.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: FILTER_BAR_CSS }
        div {
            class: "search-bar",
            label {
                class: "search-input",
                Icon { width: 14, height: 14, icon: FaMagnifyingGlass }
                input {
                    r#type: "search",
                    placeholder: "Search title or description",
                    value: "{term}",
                    oninput: move |evt: FormEvent| {
                        let mut next = filter.clone();
                        next.search(&evt.value());
                        on_change.call(next);
                    },
                }
            }
            select {
                class: "category-select",
                value: "{selected}",
                onchange: move |evt: FormEvent| {
                    let mut next = for_category.clone();
                    next.filter_by_category(CategoryFilter::from_label(&evt.value()));
                    on_change.call(next);
                },
                for category in categories {
                    option {
                        key: "{category.label()}",
                        value: "{category.label()}",
                        selected: category.label() == selected,
                        "{category.label()}"
                    }
                }
            }
        }
    }
}
