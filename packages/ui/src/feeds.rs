//! # List and feed controllers
//!
//! Per-view state for the two link views. Both own a [`LinkCollection`] and a
//! set of [`PendingVotes`]; they differ in where vote state lives.
//!
//! | Controller | Fetch | Vote state |
//! |------------|-------|------------|
//! | [`PublicFeedState`] | `GET /links/public?filter=` | embedded per link (`upvotes`, `user_upvoted`) |
//! | [`PrivateListState`] | `GET /links`, only with a token | [`UpvotedSet`] overlay, fetched once per session token |
//!
//! The async orchestration (issue request, then settle) is done by the views;
//! everything here is synchronous so it can run inside a signal write.

use api::ApiError;
use store::{FeedFilter, Link, LinkId};

use crate::collection::{FetchTicket, LinkCollection, LoadState};
use crate::votes::{MutationId, PendingVotes, UpvotedSet, VoteDelta, VoteLedger};

/// Public feed: links with vote aggregates, in the chosen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublicFeedState {
    pub collection: LinkCollection,
    pub filter: FeedFilter,
    votes: PendingVotes,
}

impl PublicFeedState {
    pub fn new(filter: FeedFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn links(&self) -> &[Link] {
        self.collection.links()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.collection.begin_fetch()
    }

    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Link>, ApiError>) -> bool {
        let fresh = result.is_ok();
        let landed = self.collection.finish_fetch(ticket, result);
        if landed && fresh {
            self.votes.clear();
        }
        landed
    }

    /// Optimistically apply a vote. `None` if the link is not in the feed.
    pub fn begin_vote(&mut self, id: &LinkId, delta: VoteDelta) -> Option<MutationId> {
        self.votes.begin(self.collection.links_mut(), id, delta)
    }

    /// Settle a vote with the server's answer. Returns `true` if it was rolled back.
    pub fn settle_vote(&mut self, mutation: MutationId, result: &Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.votes.commit(mutation);
                false
            }
            Err(_) => self.votes.rollback(self.collection.links_mut(), mutation),
        }
    }

    pub fn is_upvoted(&self, id: &LinkId) -> bool {
        self.links().iter().any(|link| &link.id == id && link.user_upvoted)
    }
}

/// The signed-in user's own links plus their upvote overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrivateListState {
    pub collection: LinkCollection,
    upvoted: UpvotedSet,
    /// Token the overlay was fetched for.
    overlay_token: Option<String>,
    votes: PendingVotes,
}

impl PrivateListState {
    pub fn links(&self) -> &[Link] {
        self.collection.links()
    }

    /// Start a fetch, or do nothing when there is no token yet.
    pub fn begin_fetch(&mut self, token: Option<&str>) -> Option<FetchTicket> {
        token?;
        Some(self.collection.begin_fetch())
    }

    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Link>, ApiError>) -> bool {
        self.collection.finish_fetch(ticket, result)
    }

    /// Whether the upvote overlay still has to be fetched for `token`.
    /// Never before the links themselves have loaded.
    pub fn needs_overlay(&self, token: &str) -> bool {
        self.collection.state() == &LoadState::Loaded
            && self.overlay_token.as_deref() != Some(token)
    }

    pub fn set_overlay(&mut self, token: &str, ids: Vec<LinkId>) {
        self.upvoted = UpvotedSet::new(ids);
        self.overlay_token = Some(token.to_string());
        self.votes.clear();
    }

    pub fn begin_vote(&mut self, id: &LinkId, delta: VoteDelta) -> Option<MutationId> {
        self.votes.begin(&mut self.upvoted, id, delta)
    }

    pub fn settle_vote(&mut self, mutation: MutationId, result: &Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.votes.commit(mutation);
                false
            }
            Err(_) => self.votes.rollback(&mut self.upvoted, mutation),
        }
    }

    pub fn is_upvoted(&self, id: &LinkId) -> bool {
        self.upvoted.is_upvoted(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::testing::{far_future, mint_token, stub_client};
    use api::Method;

    const FEED: &str = r#"[{"id":1,"title":"A","url":"https://a.example","description":"x","category":"misc","isPublic":true,"upvotes":5,"userUpvoted":false}]"#;

    #[tokio::test]
    async fn test_failed_upvote_reverts_feed() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(Method::Get, "/links/public", 200, FEED);
        stub.fail(Method::Post, "/links/1/upvote");

        let mut feed = PublicFeedState::new(FeedFilter::Latest);
        let ticket = feed.begin_fetch();
        let result = client.public_links(feed.filter).await;
        feed.finish_fetch(ticket, result);

        let id = LinkId::from(1);
        let mutation = feed.begin_vote(&id, VoteDelta::Upvote).unwrap();
        assert_eq!((feed.links()[0].upvotes, feed.links()[0].user_upvoted), (6, true));

        let result = client.upvote(&id).await;
        assert!(feed.settle_vote(mutation, &result));
        assert_eq!((feed.links()[0].upvotes, feed.links()[0].user_upvoted), (5, false));
    }

    #[tokio::test]
    async fn test_successful_upvote_sticks() {
        let (client, stub, _) = stub_client();
        stub.respond(Method::Get, "/links/public", 200, FEED);
        stub.respond(Method::Post, "/links/1/upvote", 200, "{}");

        let mut feed = PublicFeedState::default();
        let ticket = feed.begin_fetch();
        feed.finish_fetch(ticket, client.public_links(feed.filter).await);

        let id = LinkId::from(1);
        let mutation = feed.begin_vote(&id, VoteDelta::Upvote).unwrap();
        assert!(!feed.settle_vote(mutation, &client.upvote(&id).await));
        assert!(feed.is_upvoted(&id));
        assert_eq!(feed.links()[0].upvotes, 6);
    }

    #[tokio::test]
    async fn test_unauthorized_vote_rolls_back_and_logs_out() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(Method::Get, "/links/public", 200, FEED);
        stub.respond(Method::Post, "/links/1/upvote", 401, "");

        let mut feed = PublicFeedState::default();
        let ticket = feed.begin_fetch();
        feed.finish_fetch(ticket, client.public_links(feed.filter).await);

        let id = LinkId::from(1);
        let mutation = feed.begin_vote(&id, VoteDelta::Upvote).unwrap();
        let result = client.upvote(&id).await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(feed.settle_vote(mutation, &result));
        assert_eq!(feed.links()[0].upvotes, 5);
        assert!(!client.session().is_active());
    }

    #[test]
    fn test_private_fetch_needs_token() {
        let mut list = PrivateListState::default();
        assert!(list.begin_fetch(None).is_none());
        assert_eq!(list.collection.state(), &LoadState::Idle);
        assert!(list.begin_fetch(Some("t")).is_some());
    }

    #[tokio::test]
    async fn test_private_list_unauthorized_clears_session() {
        let (client, stub, storage) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(Method::Get, "/links", 401, "");

        let mut list = PrivateListState::default();
        let token = client.session().token();
        let ticket = list.begin_fetch(token.as_deref()).unwrap();
        list.finish_fetch(ticket, client.list_links().await);

        assert!(matches!(list.collection.state(), LoadState::Error(_)));
        assert!(!list.needs_overlay(token.as_deref().unwrap()));
        assert_eq!(client.session().current(), api::Session::default());
        assert!(client.session().restore().is_none());
        assert!(store::KeyValueStore::get(&storage, "token").is_none());
    }

    #[test]
    fn test_failed_list_load_skips_overlay() {
        let mut list = PrivateListState::default();
        assert!(!list.needs_overlay("t1"));

        let ticket = list.begin_fetch(Some("t1")).unwrap();
        assert!(!list.needs_overlay("t1"));
        list.finish_fetch(ticket, Err(ApiError::Network("offline".into())));
        assert!(!list.needs_overlay("t1"));
    }

    #[tokio::test]
    async fn test_private_overlay_fetched_once_per_token() {
        let (client, stub, _) = stub_client();
        stub.respond(Method::Post, "/links/upvote-status", 200, r#"["a"]"#);

        let mut list = PrivateListState::default();
        let ticket = list.begin_fetch(Some("t1")).unwrap();
        list.finish_fetch(ticket, Ok(Vec::new()));
        assert!(list.needs_overlay("t1"));
        list.set_overlay("t1", client.upvote_status().await.unwrap());
        assert!(!list.needs_overlay("t1"));
        assert!(list.needs_overlay("t2"));
        assert!(list.is_upvoted(&LinkId::from("a")));

        let mutation = list.begin_vote(&LinkId::from("a"), VoteDelta::Downvote).unwrap();
        assert!(!list.is_upvoted(&LinkId::from("a")));
        list.settle_vote(mutation, &Err(ApiError::Network("offline".into())));
        assert!(list.is_upvoted(&LinkId::from("a")));
    }

    #[test]
    fn test_refetch_drops_pending_votes() {
        let mut feed = PublicFeedState::default();
        let ticket = feed.begin_fetch();
        feed.finish_fetch(ticket, Ok(feed_links()));
        let mutation = feed.begin_vote(&LinkId::from(1), VoteDelta::Upvote).unwrap();

        let ticket = feed.begin_fetch();
        feed.finish_fetch(ticket, Ok(feed_links()));

        // Fresh data is the truth; a late failure changes nothing
        assert!(!feed.settle_vote(mutation, &Err(ApiError::Network("offline".into()))));
        assert_eq!(feed.links()[0].upvotes, 5);
    }

    fn feed_links() -> Vec<Link> {
        vec![Link {
            id: LinkId::from(1),
            title: "A".into(),
            url: "https://a.example".into(),
            description: "x".into(),
            category: "misc".into(),
            is_public: true,
            upvotes: 5,
            user_upvoted: false,
        }]
    }
}
