//! This crate contains all shared UI for the workspace.
//!
//! Controllers (`collection`, `feeds`, `votes`, `filter`, `link_form`) are plain
//! state types with no Dioxus dependency and are tested natively. Components and
//! hooks wrap them in signals.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{make_client, make_storage, WebClient};

pub mod collection;
pub use collection::{FetchTicket, LinkCollection, LoadState};

pub mod votes;
pub use votes::{MutationId, PendingVotes, UpvotedSet, VoteDelta, VoteEffect, VoteLedger};

pub mod feeds;
pub use feeds::{PrivateListState, PublicFeedState};

pub mod filter;
pub use filter::{category_vocabulary, CategoryFilter, LinkFilter};

pub mod link_form;
pub use link_form::{CreateLinkForm, FormError, LinkField, SubmitOutcome};

pub mod notifications;
pub use notifications::{
    notify, use_notifications, NoticeLevel, NotificationProvider, Notifications, ToastStack,
};

mod auth;
pub use auth::{use_api, use_auth, use_session_sync, AuthProvider, LogoutButton};

mod navbar;
pub use navbar::Navbar;

mod link_card;
pub use link_card::LinkCard;

mod filter_bar;
pub use filter_bar::{FeedFilterBar, SearchBar};

#[cfg(test)]
mod test_dom;
