//! In-memory social graph with mirrored following/follower indexes.

use social_types::{GraphError, GraphStore, Interaction, InteractionKind, Member, MemberId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

type FollowIndex = HashMap<MemberId, BTreeSet<MemberId>>;
type InteractionIndex = HashMap<MemberId, BTreeMap<MemberId, Interaction>>;

/// In-memory implementation of GraphStore.
/// Members are keyed by id (externally assigned, unique). Every follow edge is written to both
/// `following` and `followers` in the same call, so the relation is always symmetric.
#[derive(Debug, Clone, Default)]
pub struct InMemorySocialGraph {
    /// member_id -> member.
    members: BTreeMap<MemberId, Member>,
    /// follower -> members it follows.
    following: FollowIndex,
    /// followee -> members following it.
    followers: FollowIndex,
    /// source -> target -> counters.
    interactions: InteractionIndex,
}

impl InMemorySocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Ids are never reused; inserting an existing id is an error.
    pub fn add_member(&mut self, id: MemberId, name: impl Into<String>) -> Result<(), GraphError> {
        if self.members.contains_key(&id) {
            return Err(GraphError::DuplicateMember(id));
        }
        self.members.insert(
            id,
            Member {
                id,
                name: name.into(),
            },
        );
        self.following.insert(id, BTreeSet::new());
        self.followers.insert(id, BTreeSet::new());
        Ok(())
    }

    /// Record that `follower` follows `followee`. Returns false when the edge already existed.
    pub fn follow(&mut self, follower: MemberId, followee: MemberId) -> Result<bool, GraphError> {
        self.check_pair(follower, followee)?;
        let added = self.following.entry(follower).or_default().insert(followee);
        self.followers.entry(followee).or_default().insert(follower);
        if added {
            tracing::trace!(follower, followee, "follow edge added");
        }
        Ok(added)
    }

    pub fn like(&mut self, source: MemberId, target: MemberId, count: u64) -> Result<(), GraphError> {
        self.interact(source, target, InteractionKind::Like, count)
    }

    pub fn comment(
        &mut self,
        source: MemberId,
        target: MemberId,
        count: u64,
    ) -> Result<(), GraphError> {
        self.interact(source, target, InteractionKind::Comment, count)
    }

    /// Add `count` to the source -> target counter of the given kind.
    pub fn interact(
        &mut self,
        source: MemberId,
        target: MemberId,
        kind: InteractionKind,
        count: u64,
    ) -> Result<(), GraphError> {
        self.check_pair(source, target)?;
        let entry = self
            .interactions
            .entry(source)
            .or_default()
            .entry(target)
            .or_default();
        let counter = match kind {
            InteractionKind::Like => &mut entry.likes,
            InteractionKind::Comment => &mut entry.comments,
        };
        *counter = counter
            .checked_add(count)
            .ok_or(GraphError::CounterOverflow(source))?;
        Ok(())
    }

    /// Number of follow edges.
    pub fn edge_count(&self) -> usize {
        self.following.values().map(BTreeSet::len).sum()
    }

    fn check_pair(&self, source: MemberId, target: MemberId) -> Result<(), GraphError> {
        self.require(source)?;
        self.require(target)?;
        if source == target {
            return Err(GraphError::SelfInteraction(source));
        }
        Ok(())
    }
}

impl GraphStore for InMemorySocialGraph {
    fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    fn member_ids(&self) -> Vec<MemberId> {
        self.members.keys().copied().collect()
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }

    fn following(&self, id: MemberId) -> Result<&BTreeSet<MemberId>, GraphError> {
        self.following.get(&id).ok_or(GraphError::MemberNotFound(id))
    }

    fn followers(&self, id: MemberId) -> Result<&BTreeSet<MemberId>, GraphError> {
        self.followers.get(&id).ok_or(GraphError::MemberNotFound(id))
    }

    fn interaction(&self, source: MemberId, target: MemberId) -> Interaction {
        self.interactions
            .get(&source)
            .and_then(|targets| targets.get(&target))
            .copied()
            .unwrap_or_default()
    }

    fn interactions_from(&self, id: MemberId) -> Result<Vec<(MemberId, Interaction)>, GraphError> {
        self.require(id)?;
        Ok(self
            .interactions
            .get(&id)
            .map(|targets| targets.iter().map(|(t, i)| (*t, *i)).collect())
            .unwrap_or_default())
    }
}
