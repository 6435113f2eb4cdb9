//! Maximum-engagement simple path search.
//!
//! A path's weight is the total engagement of every member on it except the last one: each
//! member contributes its engagement when the path leaves it. Two strategies are provided:
//!
//! - [`EngagementSearch::execute`] enumerates simple paths depth-first, visiting neighbors in
//!   ascending id order, and keeps the first path found with the strictly greatest weight.
//!   This is the canonical answer, including tie-breaks.
//! - [`EngagementSearch::execute_best_first`] pops partial paths from a max-heap ordered by an
//!   upper bound on their final weight and stops at the first complete path popped. It yields
//!   the same weight; on ties it may pick a different path.
//!
//! # Scaling
//!
//! Both strategies are worst-case exponential in the number of members, since the number of
//! simple paths between two members can be. They are meant for small graphs. On anything
//! larger, set [`SearchLimits::max_depth`] or [`SearchLimits::max_expansions`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use social_types::{EngagementPath, GraphError, GraphStore, MemberId};

use super::{ExpansionBudget, SearchLimits};
use crate::scoring;

/// Maximum-engagement path search configuration and executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementSearch {
    source: MemberId,
    target: MemberId,
    limits: SearchLimits,
}

/// One pending branch of the depth-first search. The path is owned by the frame, so sibling
/// branches never share visited state.
#[derive(Debug)]
struct Frame {
    member: MemberId,
    path: Vec<MemberId>,
    /// Weight accumulated by the members before `member`.
    weight: u64,
}

/// Entry in the best-first priority queue.
///
/// Ordered by bound (higher first), then complete paths before partial ones, then insertion
/// order (earlier first).
#[derive(Debug)]
struct Candidate {
    bound: u64,
    complete: bool,
    seq: u64,
    member: MemberId,
    path: Vec<MemberId>,
    weight: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .cmp(&other.bound)
            .then_with(|| self.complete.cmp(&other.complete))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl EngagementSearch {
    pub fn new(source: MemberId, target: MemberId) -> Self {
        Self {
            source,
            target,
            limits: SearchLimits::unbounded(),
        }
    }

    /// Only consider paths of at most `max_depth` edges.
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

    /// Depth-first enumeration of simple paths.
    ///
    /// The trace lists every member in the order it is visited, the source first.
    pub fn execute<G: GraphStore + ?Sized>(&self, graph: &G) -> Result<EngagementPath, GraphError> {
        if let Some(trivial) = self.trivial(graph)? {
            return Ok(trivial);
        }

        let engagement = scoring::engagement_table(graph)?;
        let mut budget = ExpansionBudget::new(&self.limits);
        let mut trace = Vec::new();
        let mut best: Option<(Vec<MemberId>, u64)> = None;
        let mut stack = vec![Frame {
            member: self.source,
            path: vec![self.source],
            weight: 0,
        }];

        while let Some(frame) = stack.pop() {
            trace.push(frame.member);

            if frame.member == self.target {
                if best.as_ref().map_or(true, |(_, w)| frame.weight > *w) {
                    best = Some((frame.path, frame.weight));
                }
                continue;
            }
            if !self.limits.allows_depth(frame.path.len()) {
                continue;
            }
            budget.charge()?;

            let through = accumulate(frame.weight, &engagement, frame.member)?;
            // Pushed in reverse so the lowest id is popped first, matching recursive order.
            for &neighbor in graph.following(frame.member)?.iter().rev() {
                if frame.path.contains(&neighbor) {
                    continue;
                }
                let mut path = frame.path.clone();
                path.push(neighbor);
                stack.push(Frame {
                    member: neighbor,
                    path,
                    weight: through,
                });
            }
        }

        tracing::debug!(
            source = self.source,
            target = self.target,
            visited = trace.len(),
            expansions = budget.used(),
            found = best.is_some(),
            "engagement search finished"
        );
        Ok(match best {
            Some((path, weight)) => EngagementPath {
                path,
                weight,
                trace,
            },
            None => EngagementPath {
                path: Vec::new(),
                weight: 0,
                trace,
            },
        })
    }

    /// Branch-and-bound best-first search.
    ///
    /// A partial path's bound is its accumulated weight plus the engagement of every member
    /// (other than the target) still reachable from its end without revisiting the path. The
    /// bound never underestimates, so the first complete path popped is optimal. Branches that
    /// can no longer reach the target are dropped. The trace lists members in pop order.
    pub fn execute_best_first<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<EngagementPath, GraphError> {
        if let Some(trivial) = self.trivial(graph)? {
            return Ok(trivial);
        }

        let engagement = scoring::engagement_table(graph)?;
        let reaches_target = reverse_reachable(graph, self.target)?;
        let mut trace = Vec::new();
        let mut budget = ExpansionBudget::new(&self.limits);
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        let source_path = vec![self.source];
        let Some(source_bound) =
            self.remaining_bound(graph, &engagement, &reaches_target, &source_path)?
        else {
            return Ok(EngagementPath {
                path: Vec::new(),
                weight: 0,
                trace,
            });
        };
        heap.push(Candidate {
            bound: source_bound,
            complete: false,
            seq,
            member: self.source,
            path: source_path,
            weight: 0,
        });

        while let Some(candidate) = heap.pop() {
            trace.push(candidate.member);

            if candidate.complete {
                tracing::debug!(
                    source = self.source,
                    target = self.target,
                    weight = candidate.weight,
                    expansions = budget.used(),
                    "best-first engagement path found"
                );
                return Ok(EngagementPath {
                    path: candidate.path,
                    weight: candidate.weight,
                    trace,
                });
            }
            if !self.limits.allows_depth(candidate.path.len()) {
                continue;
            }
            budget.charge()?;

            let through = accumulate(candidate.weight, &engagement, candidate.member)?;
            for &neighbor in graph.following(candidate.member)? {
                if candidate.path.contains(&neighbor) || !reaches_target.contains(&neighbor) {
                    continue;
                }
                let mut path = candidate.path.clone();
                path.push(neighbor);
                let (bound, complete) = if neighbor == self.target {
                    (through, true)
                } else {
                    match self.remaining_bound(graph, &engagement, &reaches_target, &path)? {
                        Some(extra) => (through.saturating_add(extra), false),
                        None => continue,
                    }
                };
                seq += 1;
                heap.push(Candidate {
                    bound,
                    complete,
                    seq,
                    member: neighbor,
                    path,
                    weight: through,
                });
            }
        }

        Ok(EngagementPath {
            path: Vec::new(),
            weight: 0,
            trace,
        })
    }

    /// Validates both ends and handles the self-pair.
    fn trivial<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<Option<EngagementPath>, GraphError> {
        graph.require(self.source)?;
        graph.require(self.target)?;
        if self.source != self.target {
            return Ok(None);
        }
        Ok(Some(EngagementPath {
            path: vec![self.source],
            weight: 0,
            trace: vec![self.source],
        }))
    }

    /// Engagement still collectable after `path`: the path's end plus every non-target member
    /// reachable from it without touching the rest of the path. `None` when the target can no
    /// longer be reached at all.
    fn remaining_bound<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
        engagement: &HashMap<MemberId, u64>,
        reaches_target: &HashSet<MemberId>,
        path: &[MemberId],
    ) -> Result<Option<u64>, GraphError> {
        let (reachable, target_seen) = self.forward_reachable(graph, reaches_target, path)?;
        if !target_seen {
            return Ok(None);
        }
        Ok(Some(
            reachable
                .iter()
                .filter(|id| **id != self.target)
                .map(|id| engagement_of(engagement, *id))
                .fold(0u64, u64::saturating_add),
        ))
    }

    /// Members reachable from the end of `path` (inclusive) inside `allowed`, avoiding the
    /// rest of the path, and whether the target was among them. The walk never continues
    /// past the target.
    fn forward_reachable<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
        allowed: &HashSet<MemberId>,
        path: &[MemberId],
    ) -> Result<(HashSet<MemberId>, bool), GraphError> {
        let Some((&end, before)) = path.split_last() else {
            return Ok((HashSet::new(), false));
        };
        let blocked: HashSet<MemberId> = before.iter().copied().collect();
        let mut seen = HashSet::from([end]);
        let mut queue = VecDeque::from([end]);
        let mut target_seen = end == self.target;

        while let Some(current) = queue.pop_front() {
            if current == self.target {
                continue;
            }
            for &next in graph.following(current)? {
                if blocked.contains(&next) || !allowed.contains(&next) || !seen.insert(next) {
                    continue;
                }
                if next == self.target {
                    target_seen = true;
                }
                queue.push_back(next);
            }
        }
        Ok((seen, target_seen))
    }
}

/// Members that can reach `target` along follow edges, `target` included. Walks the
/// follower index backwards.
fn reverse_reachable<G: GraphStore + ?Sized>(
    graph: &G,
    target: MemberId,
) -> Result<HashSet<MemberId>, GraphError> {
    let mut seen = HashSet::from([target]);
    let mut queue = VecDeque::from([target]);
    while let Some(current) = queue.pop_front() {
        for &prev in graph.followers(current)? {
            if seen.insert(prev) {
                queue.push_back(prev);
            }
        }
    }
    Ok(seen)
}

fn engagement_of(table: &HashMap<MemberId, u64>, id: MemberId) -> u64 {
    table.get(&id).copied().unwrap_or(0)
}

/// Path weight after leaving `member`. Bounds may saturate; real path weights may not.
fn accumulate(
    weight: u64,
    table: &HashMap<MemberId, u64>,
    member: MemberId,
) -> Result<u64, GraphError> {
    weight
        .checked_add(engagement_of(table, member))
        .ok_or(GraphError::CounterOverflow(member))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemorySocialGraph;

    fn graph_with_edges(ids: &[MemberId], edges: &[(MemberId, MemberId)]) -> InMemorySocialGraph {
        let mut graph = InMemorySocialGraph::new();
        for &id in ids {
            graph.add_member(id, format!("Member{id}")).unwrap();
        }
        for &(from, to) in edges {
            graph.follow(from, to).unwrap();
        }
        graph
    }

    fn both(
        graph: &InMemorySocialGraph,
        source: MemberId,
        target: MemberId,
    ) -> (EngagementPath, EngagementPath) {
        let search = EngagementSearch::new(source, target);
        (
            search.execute(graph).unwrap(),
            search.execute_best_first(graph).unwrap(),
        )
    }

    #[test]
    fn cycle_terminates_without_revisiting() {
        let mut graph = graph_with_edges(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        graph.like(1, 2, 2).unwrap();
        graph.comment(1, 2, 1).unwrap();

        let (dfs, best_first) = both(&graph, 1, 3);
        assert_eq!(dfs.path, vec![1, 2, 3]);
        assert_eq!(dfs.weight, 3);
        assert_eq!(dfs.trace, vec![1, 2, 3]);
        assert_eq!(best_first.path, vec![1, 2, 3]);
        assert_eq!(best_first.weight, 3);
    }

    #[test]
    fn ties_keep_first_found_in_ascending_order() {
        // Alice (1) is the only member with engagement; both two-hop routes to Bob (2) tie.
        let mut graph = graph_with_edges(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 5), (1, 6), (5, 2), (6, 3), (3, 4), (4, 1), (6, 2)],
        );
        for (target, likes, comments) in [(2, 3, 2), (3, 3, 2), (4, 1, 1), (5, 1, 2), (6, 3, 2)] {
            graph.like(1, target, likes).unwrap();
            graph.comment(1, target, comments).unwrap();
        }

        let result = EngagementSearch::new(1, 2).execute(&graph).unwrap();
        assert_eq!(result.path, vec![1, 5, 2]);
        assert_eq!(result.weight, 20);
        assert_eq!(result.trace, vec![1, 5, 2, 6, 2, 3, 4]);
    }

    #[test]
    fn strictly_heavier_later_path_replaces_earlier() {
        let mut graph = graph_with_edges(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
        graph.like(2, 1, 1).unwrap();
        graph.like(3, 1, 5).unwrap();

        let (dfs, best_first) = both(&graph, 1, 4);
        assert_eq!(dfs.path, vec![1, 3, 4]);
        assert_eq!(dfs.weight, 5);
        assert_eq!(best_first.path, vec![1, 3, 4]);
        assert_eq!(best_first.weight, 5);
    }

    #[test]
    fn member_excluded_on_one_branch_stays_eligible_on_sibling() {
        let mut graph = graph_with_edges(&[1, 2, 3, 4], &[(1, 2), (2, 4), (1, 3), (3, 2)]);
        graph.like(3, 1, 10).unwrap();

        let (dfs, best_first) = both(&graph, 1, 4);
        assert_eq!(dfs.path, vec![1, 3, 2, 4]);
        assert_eq!(dfs.weight, 10);
        assert_eq!(best_first.path, vec![1, 3, 2, 4]);
        assert_eq!(best_first.trace, vec![1, 3, 2, 4]);
    }

    #[test]
    fn zero_weight_path_is_still_a_path() {
        let graph = graph_with_edges(&[1, 2], &[(1, 2)]);
        let (dfs, best_first) = both(&graph, 1, 2);
        assert_eq!(dfs.path, vec![1, 2]);
        assert_eq!(dfs.weight, 0);
        assert_eq!(best_first.path, vec![1, 2]);
    }

    #[test]
    fn disconnected_pair_is_empty() {
        let mut graph = graph_with_edges(&[1, 2, 3], &[(2, 1), (1, 3)]);
        graph.like(1, 2, 4).unwrap();
        let (dfs, best_first) = both(&graph, 1, 2);
        assert!(!dfs.is_found());
        assert_eq!(dfs.weight, 0);
        assert_eq!(dfs.trace, vec![1, 3]);
        assert!(!best_first.is_found());
        assert!(best_first.trace.is_empty());
    }

    #[test]
    fn self_pair_has_zero_weight() {
        let mut graph = graph_with_edges(&[1, 2], &[(1, 2), (2, 1)]);
        graph.like(1, 2, 9).unwrap();
        let (dfs, best_first) = both(&graph, 1, 1);
        assert_eq!(dfs.path, vec![1]);
        assert_eq!(dfs.weight, 0);
        assert_eq!(best_first, dfs);
    }

    #[test]
    fn unknown_member_is_lookup_failure() {
        let graph = graph_with_edges(&[1], &[]);
        let search = EngagementSearch::new(1, 5);
        assert_eq!(search.execute(&graph), Err(GraphError::MemberNotFound(5)));
        assert_eq!(
            search.execute_best_first(&graph),
            Err(GraphError::MemberNotFound(5))
        );
    }

    #[test]
    fn max_depth_restricts_candidates() {
        let mut graph = graph_with_edges(&[1, 2, 3, 4], &[(1, 2), (2, 4), (1, 3), (3, 2)]);
        graph.like(3, 1, 10).unwrap();

        let search = EngagementSearch::new(1, 4).with_max_depth(2);
        let dfs = search.execute(&graph).unwrap();
        let best_first = search.execute_best_first(&graph).unwrap();
        assert_eq!(dfs.path, vec![1, 2, 4]);
        assert_eq!(dfs.weight, 0);
        assert_eq!(best_first.weight, 0);
    }

    #[test]
    fn expansion_limit_stops_search() {
        let graph = graph_with_edges(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);
        let search = EngagementSearch::new(1, 4).with_max_expansions(2);
        assert_eq!(
            search.execute(&graph),
            Err(GraphError::ExpansionLimit { limit: 2 })
        );
        assert_eq!(
            search.execute_best_first(&graph),
            Err(GraphError::ExpansionLimit { limit: 2 })
        );
    }

    #[test]
    fn overflowing_member_total_is_an_error() {
        let mut graph = graph_with_edges(&[1, 2, 3], &[(1, 2)]);
        graph.like(1, 2, u64::MAX).unwrap();
        graph.like(1, 3, 1).unwrap();
        let search = EngagementSearch::new(1, 2);
        assert_eq!(search.execute(&graph), Err(GraphError::CounterOverflow(1)));
        assert_eq!(
            search.execute_best_first(&graph),
            Err(GraphError::CounterOverflow(1))
        );
    }

    #[test]
    fn overflowing_path_weight_is_an_error() {
        let half = u64::MAX / 2 + 1;
        let mut graph = graph_with_edges(&[1, 2, 3], &[(1, 2), (2, 3)]);
        graph.like(1, 3, half).unwrap();
        graph.like(2, 3, half).unwrap();
        let search = EngagementSearch::new(1, 3);
        assert_eq!(search.execute(&graph), Err(GraphError::CounterOverflow(2)));
        assert_eq!(
            search.execute_best_first(&graph),
            Err(GraphError::CounterOverflow(2))
        );
        // One heavy member alone still fits.
        assert_eq!(EngagementSearch::new(1, 2).execute(&graph).unwrap().weight, half);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut graph = graph_with_edges(
            &[1, 2, 3, 4, 5],
            &[(1, 2), (1, 3), (2, 3), (3, 2), (2, 5), (3, 4), (4, 5)],
        );
        graph.like(2, 4, 2).unwrap();
        graph.comment(3, 1, 2).unwrap();
        graph.like(4, 2, 1).unwrap();

        let search = EngagementSearch::new(1, 5);
        assert_eq!(search.execute(&graph).unwrap(), search.execute(&graph).unwrap());
        assert_eq!(
            search.execute_best_first(&graph).unwrap(),
            search.execute_best_first(&graph).unwrap()
        );
    }
}
