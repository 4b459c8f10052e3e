//! Link endpoints.
//!
//! | Method | Endpoint | Auth |
//! |--------|----------|------|
//! | [`list_links`](ApiClient::list_links) | `GET /links` | bearer |
//! | [`create_link`](ApiClient::create_link) | `POST /links` | bearer |
//! | [`public_links`](ApiClient::public_links) | `GET /links/public?filter=` | bearer if signed in |
//! | [`upvote_status`](ApiClient::upvote_status) | `POST /links/upvote-status` | bearer |
//! | [`upvote`](ApiClient::upvote) | `POST /links/:id/upvote` | bearer |
//! | [`downvote`](ApiClient::downvote) | `POST /links/:id/downvote` | bearer |

use serde::Deserialize;
use store::{FeedFilter, Link, LinkId, NewLink};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

/// `upvote-status` answers either a bare id list or `{"upvotedLinks": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UpvoteStatus {
    Ids(Vec<LinkId>),
    Wrapped {
        #[serde(rename = "upvotedLinks")]
        upvoted_links: Vec<LinkId>,
    },
}

impl<T: Transport> ApiClient<T> {
    /// Links owned by the signed-in user.
    pub async fn list_links(&self) -> Result<Vec<Link>, ApiError> {
        self.get("/links", &[]).await
    }

    /// Submit a new link; returns the stored link.
    pub async fn create_link(&self, link: &NewLink) -> Result<Link, ApiError> {
        self.post("/links", link).await
    }

    /// The public feed in the requested order, with vote aggregates.
    pub async fn public_links(&self, filter: FeedFilter) -> Result<Vec<Link>, ApiError> {
        self.get("/links/public", &[("filter", filter.as_str())]).await
    }

    /// Ids of the links the signed-in user has upvoted.
    pub async fn upvote_status(&self) -> Result<Vec<LinkId>, ApiError> {
        let status: UpvoteStatus = self.post("/links/upvote-status", &serde_json::json!({})).await?;
        Ok(match status {
            UpvoteStatus::Ids(ids) => ids,
            UpvoteStatus::Wrapped { upvoted_links } => upvoted_links,
        })
    }

    pub async fn upvote(&self, id: &LinkId) -> Result<(), ApiError> {
        self.post_ack(&format!("/links/{id}/upvote")).await
    }

    pub async fn downvote(&self, id: &LinkId) -> Result<(), ApiError> {
        self.post_ack(&format!("/links/{id}/downvote")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{far_future, mint_token, stub_client};
    use crate::transport::Method;
    use crate::ApiError;
    use store::{FeedFilter, LinkId, NewLink};

    #[tokio::test]
    async fn test_public_feed_sends_filter() {
        let (client, stub, _) = stub_client();
        stub.respond(
            Method::Get,
            "/links/public",
            200,
            r#"[{"id":1,"title":"A","url":"https://a.example","description":"x","category":"rust","isPublic":true,"upvotes":5,"userUpvoted":false}]"#,
        );

        let links = client.public_links(FeedFilter::Popular).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].upvotes, 5);
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![("filter".to_string(), "popular".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_link_posts_camel_case_payload() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(
            Method::Post,
            "/links",
            201,
            r#"{"id":"abc","title":"T","url":"https://t.example","description":"d","category":"c","isPublic":true}"#,
        );

        let created = client
            .create_link(&NewLink {
                title: "T".into(),
                url: "https://t.example".into(),
                description: "d".into(),
                category: "c".into(),
                is_public: true,
            })
            .await
            .unwrap();

        assert_eq!(created.id, LinkId::from("abc"));
        let request = stub.last_request().unwrap();
        assert_eq!(request.body.unwrap()["isPublic"], true);
        assert!(request.bearer.is_some());
    }

    #[tokio::test]
    async fn test_upvote_status_accepts_both_shapes() {
        let (client, stub, _) = stub_client();
        stub.respond(Method::Post, "/links/upvote-status", 200, r#"[1,"b"]"#);
        stub.respond(Method::Post, "/links/upvote-status", 200, r#"{"upvotedLinks":["c"]}"#);

        assert_eq!(
            client.upvote_status().await.unwrap(),
            vec![LinkId::from(1), LinkId::from("b")]
        );
        assert_eq!(client.upvote_status().await.unwrap(), vec![LinkId::from("c")]);
    }

    #[tokio::test]
    async fn test_vote_paths() {
        let (client, stub, _) = stub_client();
        stub.respond(Method::Post, "/links/7/upvote", 200, r#"{"message":"ok"}"#);
        stub.respond(Method::Post, "/links/7/downvote", 500, "boom");

        client.upvote(&LinkId::from(7)).await.unwrap();
        let err = client.downvote(&LinkId::from(7)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));

        let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/links/7/upvote", "/links/7/downvote"]);
    }
}
