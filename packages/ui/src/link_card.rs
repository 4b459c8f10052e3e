use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaArrowUpRightFromSquare, FaThumbsDown, FaThumbsUp};
use dioxus_free_icons::Icon;
use store::{Link, LinkId};

use crate::votes::VoteDelta;

const LINK_CARD_CSS: Asset = asset!("/assets/styling/link_card.css");

/// One link with its vote button.
///
/// The button offers the inverse of the current vote: an upvoted link shows
/// "Downvote". `upvoted` is passed separately because the private list keeps
/// vote state outside the link.
#[component]
pub fn LinkCard(
    link: Link,
    upvoted: bool,
    on_vote: EventHandler<(LinkId, VoteDelta)>,
    #[props(default = true)] show_count: bool,
) -> Element {
    let delta = VoteDelta::toggle_from(upvoted);
    let id = link.id.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: LINK_CARD_CSS }
        article {
            class: "link-card",
            h3 { class: "link-card-title", "{link.title}" }
            if !link.category.is_empty() {
                span { class: "link-card-category", "{link.category}" }
            }
            p { class: "link-card-description", "{link.description}" }
            div {
                class: "link-card-actions",
                a {
                    class: "link-card-visit",
                    href: "{link.url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    Icon { width: 12, height: 12, icon: FaArrowUpRightFromSquare }
                    " Visit"
                }
                button {
                    class: if upvoted { "link-card-vote upvoted" } else { "link-card-vote" },
                    onclick: move |_| on_vote.call((id.clone(), delta)),
                    match delta {
                        VoteDelta::Upvote => rsx! {
                            Icon { width: 12, height: 12, icon: FaThumbsUp }
                            " Upvote"
                        },
                        VoteDelta::Downvote => rsx! {
                            Icon { width: 12, height: 12, icon: FaThumbsDown }
                            " Downvote"
                        },
                    }
                }
                if show_count {
                    span { class: "link-card-count", "{link.upvotes} Upvotes" }
                }
            }
        }
    }
}
