//! Public links from every user, ordered by the selected feed filter.

use api::LinkId;
use dioxus::prelude::*;
use store::{ClientConfig, FeedFilter};
use ui::{
    category_vocabulary, notify, use_api, use_auth, use_notifications, FeedFilterBar, LinkCard,
    LinkFilter, NoticeLevel, PublicFeedState, SearchBar, VoteDelta,
};

use super::{load_status, send_vote};
use crate::Route;

#[component]
pub fn PublicFeed() -> Element {
    let client = use_api();
    let auth = use_auth();
    let config = use_context::<ClientConfig>();
    let nav = use_navigator();
    let mut notifications = use_notifications();
    let mut selected = use_signal(|| config.feed.default_filter);
    let mut feed = use_signal(|| PublicFeedState::new(config.feed.default_filter));
    let mut filter = use_signal(LinkFilter::default);

    // `userUpvoted` depends on the caller, so a token change reloads too.
    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let order = selected();
        let _token = auth().token;
        async move {
            let ticket = {
                let mut feed = feed.write();
                feed.filter = order;
                feed.begin_fetch()
            };
            let result = client.public_links(order).await;
            if let Err(e) = &result {
                tracing::warn!(filter = %order, "loading public feed failed: {e}");
            }
            feed.write().finish_fetch(ticket, result);
        }
    });

    let vote = use_callback(move |(id, delta): (LinkId, VoteDelta)| {
        if !auth.peek().is_active() {
            notify(&mut notifications, NoticeLevel::Info, "Sign in to vote on links.");
            nav.push(Route::Signin {});
            return;
        }
        let Some(mutation) = feed.write().begin_vote(&id, delta) else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let result = send_vote(&client, &id, delta).await;
            feed.write().settle_vote(mutation, &result);
            if let Err(e) = result {
                if !e.is_session_expired() {
                    notify(&mut notifications, NoticeLevel::Error, &format!("Vote failed: {e}"));
                }
            }
        });
    });

    let (status, categories, visible) = {
        let state = feed.read();
        let visible: Vec<_> = filter
            .read()
            .apply(state.links())
            .into_iter()
            .cloned()
            .collect();
        (
            load_status(state.collection.state(), state.links().is_empty()),
            category_vocabulary(state.links()),
            visible,
        )
    };

    rsx! {
        section {
            class: "public-feed-page",
            h1 { "Public Links" }
            FeedFilterBar {
                selected: selected(),
                on_select: move |order: FeedFilter| selected.set(order),
            }
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
                for link in visible {
                    LinkCard {
                        key: "{link.id}",
                        link: link.clone(),
                        upvoted: link.user_upvoted,
                        on_vote: vote,
                    }
                }
            }
        }
    }
}
