//! Graph store trait and error types.

use crate::{Interaction, Member, MemberId};
use std::collections::BTreeSet;

/// Read access to a social graph (members, follow edges, interaction counters).
///
/// Neighbor sets iterate in ascending identity order. Searches depend on this for
/// reproducible results, so implementations must not hand out hash-ordered collections.
pub trait GraphStore {
    /// Get one member by id.
    fn member(&self, id: MemberId) -> Option<&Member>;

    /// Ids of every member, ascending.
    fn member_ids(&self) -> Vec<MemberId>;

    fn member_count(&self) -> usize;

    /// Members that `id` follows.
    fn following(&self, id: MemberId) -> Result<&BTreeSet<MemberId>, GraphError>;

    /// Members that follow `id`.
    fn followers(&self, id: MemberId) -> Result<&BTreeSet<MemberId>, GraphError>;

    /// Counters for the ordered pair; zero for pairs that never interacted.
    fn interaction(&self, source: MemberId, target: MemberId) -> Interaction;

    /// Every outgoing interaction recorded by `id`, ascending by target.
    fn interactions_from(&self, id: MemberId) -> Result<Vec<(MemberId, Interaction)>, GraphError>;

    /// Like `member`, but an unknown id is a lookup failure.
    fn require(&self, id: MemberId) -> Result<&Member, GraphError> {
        self.member(id).ok_or(GraphError::MemberNotFound(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    #[error("duplicate member: {0}")]
    DuplicateMember(MemberId),
    #[error("member {0} cannot follow or interact with itself")]
    SelfInteraction(MemberId),
    #[error("follow {follower} -> {followee} is not mirrored in the follower index")]
    AsymmetricFollow {
        follower: MemberId,
        followee: MemberId,
    },
    #[error("engagement counters of member {0} overflow u64")]
    CounterOverflow(MemberId),
    #[error("search stopped after {limit} expansions")]
    ExpansionLimit { limit: usize },
}
