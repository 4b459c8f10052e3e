//! # Optimistic voting
//!
//! A vote is applied to local state before the server confirms it. Each
//! in-flight vote is recorded as a [`VoteMutation`] holding the exact
//! [`VoteEffect`] that was applied, so settling it is data-driven:
//!
//! - success → [`PendingVotes::commit`] forgets the record;
//! - failure → [`PendingVotes::rollback`] reverts the recorded effect.
//!
//! A record is removed when it settles, so one optimistic update pairs with at
//! most one rollback. Votes on different links are independent. Repeated votes
//! on the same link are not deduplicated; each keeps its own record.
//!
//! Two ledgers hold vote state:
//!
//! | Ledger | Used by | Effect of an upvote |
//! |--------|---------|---------------------|
//! | `Vec<Link>` | public feed | `upvotes + 1`, `user_upvoted = true` |
//! | [`UpvotedSet`] | private list | id inserted into the set |

use std::collections::{BTreeMap, HashSet};

use store::{Link, LinkId};

/// Direction of a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteDelta {
    Upvote,
    Downvote,
}

impl VoteDelta {
    /// The vote a button offers given the current state: upvoted links can
    /// only be downvoted and vice versa.
    pub fn toggle_from(upvoted: bool) -> Self {
        if upvoted {
            VoteDelta::Downvote
        } else {
            VoteDelta::Upvote
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            VoteDelta::Upvote => VoteDelta::Downvote,
            VoteDelta::Downvote => VoteDelta::Upvote,
        }
    }

    fn count_delta(self) -> i64 {
        match self {
            VoteDelta::Upvote => 1,
            VoteDelta::Downvote => -1,
        }
    }
}

/// What applying a vote actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteEffect {
    pub count_delta: i64,
    pub was_upvoted: bool,
}

/// Local state that votes are applied to.
pub trait VoteLedger {
    /// Apply `delta` to `id`. Returns `None` when the ledger has no such link.
    fn apply_vote(&mut self, id: &LinkId, delta: VoteDelta) -> Option<VoteEffect>;
    /// Undo a previously applied effect.
    fn revert_vote(&mut self, id: &LinkId, effect: &VoteEffect);
    fn is_upvoted(&self, id: &LinkId) -> bool;
}

impl VoteLedger for Vec<Link> {
    fn apply_vote(&mut self, id: &LinkId, delta: VoteDelta) -> Option<VoteEffect> {
        let link = self.iter_mut().find(|link| &link.id == id)?;
        let effect = VoteEffect {
            count_delta: delta.count_delta(),
            was_upvoted: link.user_upvoted,
        };
        link.upvotes += effect.count_delta;
        link.user_upvoted = delta == VoteDelta::Upvote;
        Some(effect)
    }

    fn revert_vote(&mut self, id: &LinkId, effect: &VoteEffect) {
        if let Some(link) = self.iter_mut().find(|link| &link.id == id) {
            link.upvotes -= effect.count_delta;
            link.user_upvoted = effect.was_upvoted;
        }
    }

    fn is_upvoted(&self, id: &LinkId) -> bool {
        self.iter().any(|link| &link.id == id && link.user_upvoted)
    }
}

/// Ids the signed-in user has upvoted, as reported by `upvote-status`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpvotedSet(HashSet<LinkId>);

impl UpvotedSet {
    pub fn new(ids: impl IntoIterator<Item = LinkId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl VoteLedger for UpvotedSet {
    fn apply_vote(&mut self, id: &LinkId, delta: VoteDelta) -> Option<VoteEffect> {
        let was_upvoted = self.0.contains(id);
        match delta {
            VoteDelta::Upvote => self.0.insert(id.clone()),
            VoteDelta::Downvote => self.0.remove(id),
        };
        Some(VoteEffect {
            count_delta: 0,
            was_upvoted,
        })
    }

    fn revert_vote(&mut self, id: &LinkId, effect: &VoteEffect) {
        if effect.was_upvoted {
            self.0.insert(id.clone());
        } else {
            self.0.remove(id);
        }
    }

    fn is_upvoted(&self, id: &LinkId) -> bool {
        self.0.contains(id)
    }
}

/// Handle to one in-flight vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationId(u64);

/// An applied, unconfirmed vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteMutation {
    pub link_id: LinkId,
    pub delta: VoteDelta,
    pub effect: VoteEffect,
}

/// In-flight votes for one controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingVotes {
    next_id: u64,
    pending: BTreeMap<MutationId, VoteMutation>,
}

impl PendingVotes {
    /// Apply `delta` to the ledger and record it. `None` if the link is unknown.
    pub fn begin<L: VoteLedger>(
        &mut self,
        ledger: &mut L,
        link_id: &LinkId,
        delta: VoteDelta,
    ) -> Option<MutationId> {
        let effect = ledger.apply_vote(link_id, delta)?;
        self.next_id += 1;
        let id = MutationId(self.next_id);
        self.pending.insert(
            id,
            VoteMutation {
                link_id: link_id.clone(),
                delta,
                effect,
            },
        );
        Some(id)
    }

    /// The server accepted the vote. Returns whether the mutation was pending.
    pub fn commit(&mut self, id: MutationId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// The server rejected the vote: revert its effect. Returns whether
    /// anything was reverted; settling the same mutation twice is a no-op.
    pub fn rollback<L: VoteLedger>(&mut self, ledger: &mut L, id: MutationId) -> bool {
        match self.pending.remove(&id) {
            Some(mutation) => {
                ledger.revert_vote(&mutation.link_id, &mutation.effect);
                true
            }
            None => false,
        }
    }

    /// Forget every in-flight vote. Called when the ledger is replaced by fresh
    /// server data, which already is the truth a rollback would restore.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, link_id: &LinkId) -> bool {
        self.pending.values().any(|m| &m.link_id == link_id)
    }
}
