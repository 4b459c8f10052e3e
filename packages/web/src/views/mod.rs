mod signin;
pub use signin::Signin;

mod signup;
pub use signup::Signup;

mod links;
pub use links::Links;

mod public_feed;
pub use public_feed::PublicFeed;

mod create_link;
pub use create_link::CreateLink;

use api::{ApiError, LinkId};
use ui::{LoadState, VoteDelta, WebClient};

/// Send one vote to the server.
pub(crate) async fn send_vote(client: &WebClient, id: &LinkId, delta: VoteDelta) -> Result<(), ApiError> {
    match delta {
        VoteDelta::Upvote => client.upvote(id).await,
        VoteDelta::Downvote => client.downvote(id).await,
    }
}

/// Status line under a list heading, if any.
pub(crate) fn load_status(state: &LoadState, is_empty: bool) -> Option<String> {
    match state {
        LoadState::Idle => None,
        LoadState::Loading if is_empty => Some("Loading links...".to_string()),
        LoadState::Loading => None,
        LoadState::Error(message) => Some(format!("Could not load links: {message}")),
        LoadState::Loaded if is_empty => Some("No links yet.".to_string()),
        LoadState::Loaded => None,
    }
}
