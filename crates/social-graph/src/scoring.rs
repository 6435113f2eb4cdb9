//! Engagement and influence scores derived from a member's interaction counters.
//!
//! All scores are computed on demand from the store; nothing is cached between calls.

use social_types::{GraphError, GraphStore, MemberId};
use std::collections::HashMap;

/// Sum of every like and comment `id` has given, across all targets.
/// A sum past `u64::MAX` is [`GraphError::CounterOverflow`].
pub fn total_engagement<G: GraphStore + ?Sized>(graph: &G, id: MemberId) -> Result<u64, GraphError> {
    graph
        .interactions_from(id)?
        .iter()
        .try_fold(0u64, |acc, (_, interaction)| {
            interaction.total().and_then(|t| acc.checked_add(t))
        })
        .ok_or(GraphError::CounterOverflow(id))
}

/// Total engagement per follower, as a percentage. Zero followers yields 0.0.
pub fn engagement_rate<G: GraphStore + ?Sized>(graph: &G, id: MemberId) -> Result<f64, GraphError> {
    let followers = graph.followers(id)?.len();
    if followers == 0 {
        return Ok(0.0);
    }
    Ok(total_engagement(graph, id)? as f64 / followers as f64 * 100.0)
}

/// Share of `source`'s total engagement directed at `target`, as a percentage.
/// Yields 0.0 when `source` has given no engagement at all.
pub fn influence<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
) -> Result<f64, GraphError> {
    graph.require(target)?;
    let total = total_engagement(graph, source)?;
    if total == 0 {
        return Ok(0.0);
    }
    let given = graph
        .interaction(source, target)
        .total()
        .ok_or(GraphError::CounterOverflow(source))?;
    Ok(given as f64 / total as f64 * 100.0)
}

/// Total engagement of every member, computed once for a search.
pub fn engagement_table<G: GraphStore + ?Sized>(
    graph: &G,
) -> Result<HashMap<MemberId, u64>, GraphError> {
    graph
        .member_ids()
        .into_iter()
        .map(|id| total_engagement(graph, id).map(|total| (id, total)))
        .collect()
}
