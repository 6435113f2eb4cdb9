//! Breadth-first shortest path over follow edges.
//!
//! Edges have unit weight, so the first time the target is discovered the path has the
//! minimum number of hops (the same answer Dijkstra gives with all weights equal to 1).

use std::collections::{HashSet, VecDeque};

use social_types::{FrontierSnapshot, GraphError, GraphStore, MemberId, ShortestPath};

use super::{ExpansionBudget, SearchLimits};

/// Shortest-path search configuration and executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestPathSearch {
    source: MemberId,
    target: MemberId,
    limits: SearchLimits,
}

impl ShortestPathSearch {
    pub fn new(source: MemberId, target: MemberId) -> Self {
        Self {
            source,
            target,
            limits: SearchLimits::unbounded(),
        }
    }

    /// Do not explore paths longer than `max_depth` edges.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits = self.limits.with_max_depth(max_depth);
        self
    }

    pub const fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.limits = self.limits.with_max_expansions(max_expansions);
        self
    }

    pub const fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run the search.
    ///
    /// Returns an empty path when the target is unreachable; an unknown source or target is
    /// [`GraphError::MemberNotFound`]. A snapshot of the frontier is recorded at every dequeue,
    /// plus a final target-only snapshot when the target is found.
    pub fn execute<G: GraphStore + ?Sized>(&self, graph: &G) -> Result<ShortestPath, GraphError> {
        graph.require(self.source)?;
        graph.require(self.target)?;

        if self.source == self.target {
            return Ok(ShortestPath {
                path: vec![self.source],
                trace: Vec::new(),
            });
        }

        let mut queue: VecDeque<(MemberId, Vec<MemberId>)> = VecDeque::new();
        let mut visited: HashSet<MemberId> = HashSet::new();
        let mut trace: Vec<FrontierSnapshot> = Vec::new();
        let mut budget = ExpansionBudget::new(&self.limits);

        queue.push_back((self.source, vec![self.source]));

        while let Some((current, path)) = queue.pop_front() {
            trace.push(FrontierSnapshot {
                queued: queue.iter().map(|(id, _)| *id).collect(),
                current,
            });
            if !visited.insert(current) {
                continue;
            }
            // Extending `path` adds one edge.
            if !self.limits.allows_depth(path.len()) {
                continue;
            }
            budget.charge()?;

            for &neighbor in graph.following(current)? {
                if visited.contains(&neighbor) {
                    continue;
                }
                if neighbor == self.target {
                    trace.push(FrontierSnapshot {
                        queued: Vec::new(),
                        current: neighbor,
                    });
                    let mut found = path;
                    found.push(neighbor);
                    tracing::debug!(
                        source = self.source,
                        target = self.target,
                        hops = found.len() - 1,
                        expansions = budget.used(),
                        "shortest path found"
                    );
                    return Ok(ShortestPath { path: found, trace });
                }
                let mut next = path.clone();
                next.push(neighbor);
                queue.push_back((neighbor, next));
            }
        }

        tracing::debug!(
            source = self.source,
            target = self.target,
            expansions = budget.used(),
            "no follow path"
        );
        Ok(ShortestPath {
            path: Vec::new(),
            trace,
        })
    }
}
