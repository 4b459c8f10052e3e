//! The signed-in user's own links.

use api::LinkId;
use dioxus::prelude::*;
use ui::{
    category_vocabulary, notify, use_api, use_auth, use_notifications, LinkCard, LinkFilter,
    NoticeLevel, PrivateListState, SearchBar, VoteDelta,
};

use super::{load_status, send_vote};

#[component]
pub fn Links() -> Element {
    let client = use_api();
    let auth = use_auth();
    let mut notifications = use_notifications();
    let mut list = use_signal(PrivateListState::default);
    let mut filter = use_signal(LinkFilter::default);

    // Reload whenever the token changes; the overlay only once per token.
    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let token = auth().token;
        async move {
            let Some(ticket) = list.write().begin_fetch(token.as_deref()) else {
                return;
            };
            let result = client.list_links().await;
            let failed = result.is_err();
            if let Err(e) = &result {
                tracing::warn!("loading links failed: {e}");
            }
            list.write().finish_fetch(ticket, result);
            if failed {
                return;
            }

            let Some(token) = token else { return };
            if list.peek().needs_overlay(&token) {
                match client.upvote_status().await {
                    Ok(ids) => list.write().set_overlay(&token, ids),
                    Err(e) => tracing::warn!("loading upvote status failed: {e}"),
                }
            }
        }
    });

    let vote = use_callback(move |(id, delta): (LinkId, VoteDelta)| {
        let Some(mutation) = list.write().begin_vote(&id, delta) else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let result = send_vote(&client, &id, delta).await;
            list.write().settle_vote(mutation, &result);
            if let Err(e) = result {
                if !e.is_session_expired() {
                    notify(&mut notifications, NoticeLevel::Error, &format!("Vote failed: {e}"));
                }
            }
        });
    });

    let (status, categories, visible) = {
        let state = list.read();
        let visible: Vec<_> = filter
            .read()
            .apply(state.links())
            .into_iter()
            .map(|link| (link.clone(), state.is_upvoted(&link.id)))
            .collect();
        (
            load_status(state.collection.state(), state.links().is_empty()),
            category_vocabulary(state.links()),
            visible,
        )
    };

    rsx! {
        section {
            class: "links-page",
            h1 { "My Links" }
            SearchBar {
                filter: filter(),
                categories: categories,
                on_change: move |next| filter.set(next),
            }
            if let Some(status) = status {
                p { class: "load-status", "{status}" }
            }
            div {
                class: "link-list",
                for (link, upvoted) in visible {
                    LinkCard {
                        key: "{link.id}",
                        link: link.clone(),
                        upvoted: upvoted,
                        show_count: false,
                        on_vote: vote,
                    }
                }
            }
        }
    }
}
