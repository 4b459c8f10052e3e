use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Top navigation bar. The app supplies the links; the bar only lays them out.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand", "Linkshelf" }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}
