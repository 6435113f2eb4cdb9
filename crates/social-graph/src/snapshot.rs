//! Serializable snapshot of a social graph, used to ingest prebuilt networks and export them.

use crate::InMemorySocialGraph;
use serde::{Deserialize, Serialize};
use social_types::{GraphError, GraphStore, MemberId};
use std::collections::{BTreeMap, BTreeSet};

/// One member with its outgoing edges and counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: MemberId,
    pub name: String,
    /// Members this one follows.
    #[serde(default)]
    pub following: Vec<MemberId>,
    /// Optional copy of the inverse relation. When present it must agree with everyone's
    /// `following` lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<MemberId>>,
    /// Likes given, by target.
    #[serde(default)]
    pub likes: BTreeMap<MemberId, u64>,
    /// Comments given, by target.
    #[serde(default)]
    pub comments: BTreeMap<MemberId, u64>,
}

/// Snapshot of the whole graph, members in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub members: Vec<MemberSnapshot>,
}

impl GraphSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl InMemorySocialGraph {
    /// Create a snapshot for serialization.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut members = Vec::with_capacity(self.member_count());
        for id in self.member_ids() {
            let Some(member) = self.member(id) else {
                continue;
            };
            let mut likes = BTreeMap::new();
            let mut comments = BTreeMap::new();
            for (target, interaction) in self.interactions_from(id).unwrap_or_default() {
                likes.insert(target, interaction.likes);
                comments.insert(target, interaction.comments);
            }
            members.push(MemberSnapshot {
                id,
                name: member.name.clone(),
                following: self
                    .following(id)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default(),
                followers: self
                    .followers(id)
                    .ok()
                    .map(|set| set.iter().copied().collect()),
                likes,
                comments,
            });
        }
        GraphSnapshot { members }
    }

    /// Build a graph from a snapshot.
    ///
    /// The follower index is rebuilt from the `following` lists, so the relation is symmetric
    /// by construction; any `followers` lists supplied must match the rebuilt index.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for member in &snapshot.members {
            graph.add_member(member.id, member.name.clone())?;
        }

        for member in &snapshot.members {
            for &followee in &member.following {
                graph.follow(member.id, followee)?;
            }
            for (&target, &count) in &member.likes {
                graph.like(member.id, target, count)?;
            }
            for (&target, &count) in &member.comments {
                graph.comment(member.id, target, count)?;
            }
        }

        for member in &snapshot.members {
            let Some(declared) = &member.followers else {
                continue;
            };
            let declared: BTreeSet<MemberId> = declared.iter().copied().collect();
            let actual = graph.followers(member.id)?;
            if let Some(&follower) = declared.symmetric_difference(actual).next() {
                return Err(GraphError::AsymmetricFollow {
                    follower,
                    followee: member.id,
                });
            }
        }

        tracing::debug!(
            members = graph.member_count(),
            edges = graph.edge_count(),
            "graph loaded from snapshot"
        );
        Ok(graph)
    }
}
