//! Seeded synthetic network generation for demos and fixtures.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use social_graph::{GraphError, GraphStore, InMemorySocialGraph, MemberId};

/// Produces a populated graph.
pub trait NetworkGenerator {
    fn generate(&mut self) -> Result<InMemorySocialGraph, GraphError>;
}

/// Shape of a generated network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Members are numbered `1..=member_count`.
    pub member_count: u64,
    /// Each member follows between 1 and this many others (capped at `member_count - 1`).
    pub max_following: usize,
    /// Per ordered pair, likes are drawn from `0..=max_likes`.
    pub max_likes: u64,
    /// Per ordered pair, comments are drawn from `0..=max_comments`.
    pub max_comments: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            member_count: 9,
            max_following: 5,
            max_likes: 5,
            max_comments: 3,
        }
    }
}

/// Random network generator driven by a fixed seed; the same seed and config always yield
/// the same graph.
pub struct SeededNetworkGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SeededNetworkGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NetworkGenerator for SeededNetworkGenerator {
    fn generate(&mut self) -> Result<InMemorySocialGraph, GraphError> {
        let mut graph = InMemorySocialGraph::new();
        for id in 1..=self.config.member_count {
            graph.add_member(id, format!("Member{id}"))?;
        }
        let ids = graph.member_ids();

        if ids.len() > 1 {
            let upper = self.config.max_following.min(ids.len() - 1).max(1);
            for &id in &ids {
                let count = self.rng.gen_range(1..=upper);
                let others: Vec<MemberId> = ids.iter().copied().filter(|o| *o != id).collect();
                for &followee in others.choose_multiple(&mut self.rng, count) {
                    graph.follow(id, followee)?;
                }
            }
        }

        for &source in &ids {
            for &target in &ids {
                if source == target {
                    continue;
                }
                let likes = self.rng.gen_range(0..=self.config.max_likes);
                let comments = self.rng.gen_range(0..=self.config.max_comments);
                graph.like(source, target, likes)?;
                graph.comment(source, target, comments)?;
            }
        }

        tracing::debug!(
            members = graph.member_count(),
            edges = graph.edge_count(),
            "generated network"
        );
        Ok(graph)
    }
}
