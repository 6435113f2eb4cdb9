//! Member, interaction and search result types.

use serde::{Deserialize, Serialize};

/// Externally assigned, stable member identity.
pub type MemberId = u64;

/// A member of the social graph.
///
/// Follow edges and interaction counters are not stored on the member; the graph store keeps
/// them in id-keyed indexes so members never reference each other directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// Cumulative interactions given by one member to another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
}

impl Interaction {
    /// Likes plus comments; `None` if the sum does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.likes.checked_add(self.comments)
    }
}

/// Kind of interaction counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Comment,
}

/// Frontier state recorded at one dequeue of the breadth-first search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierSnapshot {
    /// Members still waiting in the queue, front first.
    pub queued: Vec<MemberId>,
    /// Member just taken off the queue.
    pub current: MemberId,
}

impl FrontierSnapshot {
    /// Flat form used in reports: queued ids followed by the current id.
    pub fn to_ids(&self) -> Vec<MemberId> {
        let mut ids = Vec::with_capacity(self.queued.len() + 1);
        ids.extend_from_slice(&self.queued);
        ids.push(self.current);
        ids
    }
}

/// Result of a shortest-path search.
///
/// An empty `path` means the target is not reachable from the source; that is a normal
/// outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath {
    pub path: Vec<MemberId>,
    pub trace: Vec<FrontierSnapshot>,
}

impl ShortestPath {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of follow edges on the path; `None` when no path was found.
    pub fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Result of a maximum-engagement path search.
///
/// `weight` is the summed total engagement of every member on `path` except the last.
/// `trace` lists members in the order the search visited them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementPath {
    pub path: Vec<MemberId>,
    pub weight: u64,
    pub trace: Vec<MemberId>,
}

impl EngagementPath {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_snapshot_flattens_queue_then_current() {
        let snap = FrontierSnapshot {
            queued: vec![4, 5],
            current: 2,
        };
        assert_eq!(snap.to_ids(), vec![4, 5, 2]);
    }

    #[test]
    fn hops_counts_edges() {
        let found = ShortestPath {
            path: vec![1, 2, 3],
            trace: Vec::new(),
        };
        assert_eq!(found.hops(), Some(2));
        assert_eq!(ShortestPath::default().hops(), None);
        assert!(!ShortestPath::default().is_found());
    }

    #[test]
    fn interaction_defaults_missing_counters() {
        let i: Interaction = serde_json::from_str(r#"{"likes": 3}"#).unwrap();
        assert_eq!(i.comments, 0);
        assert_eq!(i.total(), Some(3));
    }

    #[test]
    fn interaction_total_is_checked() {
        let i = Interaction {
            likes: u64::MAX,
            comments: 1,
        };
        assert_eq!(i.total(), None);
    }
}
