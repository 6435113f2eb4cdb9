//! Dense adjacency views indexed by ascending member id.

use social_graph::{GraphError, GraphStore};

/// Entry `(i, j)` is 1 when the i-th member follows the j-th.
pub fn relationship_matrix<G: GraphStore + ?Sized>(graph: &G) -> Result<Vec<Vec<u8>>, GraphError> {
    let ids = graph.member_ids();
    ids.iter()
        .map(|&row| {
            let following = graph.following(row)?;
            Ok(ids
                .iter()
                .map(|col| u8::from(following.contains(col)))
                .collect())
        })
        .collect()
}

/// Entry `(i, j)` is likes plus comments from the i-th member to the j-th.
pub fn engagement_matrix<G: GraphStore + ?Sized>(graph: &G) -> Result<Vec<Vec<u64>>, GraphError> {
    let ids = graph.member_ids();
    ids.iter()
        .map(|&row| {
            ids.iter()
                .map(|&col| {
                    graph
                        .interaction(row, col)
                        .total()
                        .ok_or(GraphError::CounterOverflow(row))
                })
                .collect()
        })
        .collect()
}
