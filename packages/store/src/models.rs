//! # Domain models for links and feeds
//!
//! Defines the data exchanged with the link-sharing REST API. Field names follow
//! the API's camelCase JSON (`isPublic`, `userUpvoted`), mapped to snake_case on
//! the Rust side.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`LinkId`] | Server-assigned identifier. The API may send it as a JSON number or a string (and as `_id`); it is normalised to a string. |
//! | [`Link`] | A stored link. `upvotes` and `user_upvoted` are only populated by the public feed and default to `0`/`false` elsewhere. |
//! | [`NewLink`] | The payload for creating a link. |
//! | [`FeedFilter`] | Ordering requested from the public feed: `latest`, `popular` or `trending`. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a link, as assigned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LinkId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LinkId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for LinkId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => LinkId(s),
            Raw::Number(n) => LinkId(n.to_string()),
        })
    }
}

/// A link as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(alias = "_id")]
    pub id: LinkId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
    /// Aggregate upvote count (public feed only).
    #[serde(default)]
    pub upvotes: i64,
    /// Whether the signed-in user has upvoted this link (public feed only).
    #[serde(default)]
    pub user_upvoted: bool,
}

impl Link {
    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub fn mentions(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Payload for `POST /links`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Ordering of the public feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFilter {
    #[default]
    Latest,
    Popular,
    Trending,
}

impl FeedFilter {
    pub const ALL: [FeedFilter; 3] = [FeedFilter::Latest, FeedFilter::Popular, FeedFilter::Trending];

    /// Value of the `filter` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFilter::Latest => "latest",
            FeedFilter::Popular => "popular",
            FeedFilter::Trending => "trending",
        }
    }
}

impl fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(FeedFilter::Latest),
            "popular" => Ok(FeedFilter::Popular),
            "trending" => Ok(FeedFilter::Trending),
            other => Err(format!("Unknown feed filter: {other}")),
        }
    }
}
