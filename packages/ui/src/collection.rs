//! Fetched link collections and their load state.

use api::ApiError;
use store::Link;

/// `idle -> loading -> {loaded, error}`; every refetch re-enters `loading`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Identifies one fetch; only the latest issued ticket may land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A cached collection of links.
///
/// Failed fetches keep the previous links (stale but available). Responses for
/// superseded fetches are discarded, so a slow early request cannot overwrite
/// the result of a later one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkCollection {
    links: Vec<Link>,
    state: LoadState,
    issued: u64,
}

impl LinkCollection {
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.links
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.issued)
    }

    /// Land a fetch result. Returns `false` if the ticket was superseded.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Link>, ApiError>) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "discarding superseded fetch");
            return false;
        }
        match result {
            Ok(links) => {
                self.links = links;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                self.state = LoadState::Error(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::LinkId;

    fn links(ids: &[i64]) -> Vec<Link> {
        ids.iter()
            .map(|&id| Link {
                id: LinkId::from(id),
                title: format!("Link {id}"),
                url: format!("https://example.com/{id}"),
                description: String::new(),
                category: String::new(),
                is_public: false,
                upvotes: 0,
                user_upvoted: false,
            })
            .collect()
    }

    #[test]
    fn test_state_machine() {
        let mut collection = LinkCollection::default();
        assert_eq!(collection.state(), &LoadState::Idle);

        let ticket = collection.begin_fetch();
        assert!(collection.is_loading());

        assert!(collection.finish_fetch(ticket, Ok(links(&[1, 2]))));
        assert_eq!(collection.state(), &LoadState::Loaded);
        assert_eq!(collection.links().len(), 2);
    }

    #[test]
    fn test_failure_keeps_previous_links() {
        let mut collection = LinkCollection::default();
        let ticket = collection.begin_fetch();
        collection.finish_fetch(ticket, Ok(links(&[1])));

        let ticket = collection.begin_fetch();
        collection.finish_fetch(ticket, Err(ApiError::Network("offline".into())));

        assert!(matches!(collection.state(), LoadState::Error(_)));
        assert_eq!(collection.links(), links(&[1]).as_slice());
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut collection = LinkCollection::default();
        let slow = collection.begin_fetch();
        let fast = collection.begin_fetch();

        assert!(collection.finish_fetch(fast, Ok(links(&[2]))));
        assert!(!collection.finish_fetch(slow, Ok(links(&[1]))));

        assert_eq!(collection.links()[0].id, LinkId::from(2));
        assert_eq!(collection.state(), &LoadState::Loaded);
    }
}
