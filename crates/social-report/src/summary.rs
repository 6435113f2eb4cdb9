//! All-pairs summary: influence and both path searches for every ordered pair of members.
//!
//! Each source member is summarized on its own blocking task over a shared read-only graph.

use crate::ReportError;
use serde::{Deserialize, Serialize};
use social_graph::scoring::{engagement_rate, influence};
use social_graph::{
    EngagementSearch, GraphError, GraphStore, InMemorySocialGraph, MemberId, SearchLimits,
    ShortestPathSearch,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathEntry {
    pub path: Vec<MemberId>,
    pub elapsed_secs: f64,
    /// Flattened frontier snapshots, one row per dequeue.
    pub trace: Vec<Vec<MemberId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementPathEntry {
    pub path: Vec<MemberId>,
    pub weight: u64,
    pub elapsed_secs: f64,
    pub trace: Vec<MemberId>,
    /// The search gave up on its expansion budget; path and trace are empty.
    #[serde(default)]
    pub limit_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub source: MemberId,
    pub target: MemberId,
    pub influence: f64,
    pub shortest: ShortestPathEntry,
    pub engagement: EngagementPathEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairwiseSummary {
    pub engagement_rates: BTreeMap<MemberId, f64>,
    /// Ordered by source then target, ascending.
    pub pairs: Vec<PairReport>,
}

/// Every pair starting at `source`, with `source`'s engagement rate.
pub fn summarize_source<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    limits: SearchLimits,
) -> Result<(f64, Vec<PairReport>), GraphError> {
    let rate = engagement_rate(graph, source)?;
    let mut pairs = Vec::new();
    for target in graph.member_ids() {
        if target == source {
            continue;
        }
        pairs.push(PairReport {
            source,
            target,
            influence: influence(graph, source, target)?,
            shortest: shortest_entry(graph, source, target)?,
            engagement: engagement_entry(graph, source, target, limits)?,
        });
    }
    Ok((rate, pairs))
}

fn shortest_entry<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
) -> Result<ShortestPathEntry, GraphError> {
    let started = Instant::now();
    let result = ShortestPathSearch::new(source, target).execute(graph)?;
    let elapsed_secs = started.elapsed().as_secs_f64();
    if !result.is_found() {
        return Ok(ShortestPathEntry::default());
    }
    Ok(ShortestPathEntry {
        trace: result.trace.iter().map(|s| s.to_ids()).collect(),
        path: result.path,
        elapsed_secs,
    })
}

fn engagement_entry<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
    limits: SearchLimits,
) -> Result<EngagementPathEntry, GraphError> {
    let started = Instant::now();
    let result = EngagementSearch::new(source, target)
        .with_limits(limits)
        .execute(graph);
    let elapsed_secs = started.elapsed().as_secs_f64();
    match result {
        Ok(found) if found.is_found() => Ok(EngagementPathEntry {
            path: found.path,
            weight: found.weight,
            elapsed_secs,
            trace: found.trace,
            limit_reached: false,
        }),
        Ok(_) => Ok(EngagementPathEntry::default()),
        Err(GraphError::ExpansionLimit { limit }) => {
            tracing::warn!(source, target, limit, "engagement search hit expansion limit");
            Ok(EngagementPathEntry {
                limit_reached: true,
                ..EngagementPathEntry::default()
            })
        }
        Err(e) => Err(e),
    }
}

/// Summarize every ordered pair, one blocking task per source member.
pub async fn summarize(
    graph: Arc<InMemorySocialGraph>,
    limits: SearchLimits,
) -> Result<PairwiseSummary, ReportError> {
    let handles: Vec<_> = graph
        .member_ids()
        .into_iter()
        .map(|source| {
            let graph = Arc::clone(&graph);
            let handle = tokio::task::spawn_blocking(move || {
                summarize_source(graph.as_ref(), source, limits)
            });
            (source, handle)
        })
        .collect();

    let mut summary = PairwiseSummary::default();
    for (source, handle) in handles {
        let (rate, pairs) = handle.await??;
        tracing::debug!(source, pairs = pairs.len(), "summarized source");
        summary.engagement_rates.insert(source, rate);
        summary.pairs.extend(pairs);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> InMemorySocialGraph {
        let mut graph = InMemorySocialGraph::new();
        for id in 1..=3 {
            graph.add_member(id, format!("Member{id}")).unwrap();
        }
        graph.follow(1, 2).unwrap();
        graph.follow(2, 3).unwrap();
        graph.like(1, 2, 3).unwrap();
        graph.comment(1, 3, 1).unwrap();
        graph
    }

    #[test]
    fn source_rows_cover_every_other_member() {
        let graph = chain();
        let (rate, pairs) = summarize_source(&graph, 1, SearchLimits::default()).unwrap();
        assert_eq!(rate, 0.0);
        assert_eq!(
            pairs.iter().map(|p| p.target).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(pairs[0].influence, 75.0);
        assert_eq!(pairs[1].shortest.path, vec![1, 2, 3]);
        assert_eq!(pairs[1].shortest.trace, vec![vec![1], vec![2], vec![3]]);
        assert_eq!(pairs[1].engagement.path, vec![1, 2, 3]);
        assert_eq!(pairs[1].engagement.weight, 4);
    }

    #[test]
    fn unreachable_pairs_are_cleared() {
        let graph = chain();
        let (_, pairs) = summarize_source(&graph, 3, SearchLimits::default()).unwrap();
        for pair in pairs {
            assert_eq!(pair.shortest, ShortestPathEntry::default());
            assert_eq!(pair.engagement, EngagementPathEntry::default());
        }
    }

    #[test]
    fn expansion_limit_is_recorded_not_fatal() {
        let graph = chain();
        let limits = SearchLimits::unbounded().with_max_expansions(1);
        let (_, pairs) = summarize_source(&graph, 1, limits).unwrap();
        assert!(pairs[1].engagement.limit_reached);
        assert!(pairs[1].engagement.path.is_empty());
        assert_eq!(pairs[1].shortest.path, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn summarize_orders_pairs_by_source() {
        let summary = summarize(Arc::new(chain()), SearchLimits::default())
            .await
            .unwrap();
        assert_eq!(summary.engagement_rates.len(), 3);
        assert_eq!(summary.engagement_rates[&2], 0.0);
        let order: Vec<_> = summary.pairs.iter().map(|p| (p.source, p.target)).collect();
        assert_eq!(order, vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2)]);
    }
}
