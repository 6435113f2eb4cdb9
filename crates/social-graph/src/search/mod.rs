//! Path search over follow edges.
//!
//! Both searches borrow the graph immutably and own all of their working state (queue or
//! stack, visited set, trace), so any number of searches can run over one shared graph.
//!
//! # Example
//!
//! ```ignore
//! use social_graph::{EngagementSearch, ShortestPathSearch};
//!
//! let hops = ShortestPathSearch::new(1, 3).execute(&graph)?;
//! let best = EngagementSearch::new(1, 3).with_max_depth(6).execute(&graph)?;
//! ```

mod engagement;
mod shortest;

use serde::{Deserialize, Serialize};
use social_types::{EngagementPath, GraphError, GraphStore, MemberId, ShortestPath};

pub use engagement::EngagementSearch;
pub use shortest::ShortestPathSearch;

/// Bounds applied to a search. The default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of follow edges on a returned path.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Maximum number of node expansions before the search fails with
    /// [`GraphError::ExpansionLimit`].
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_expansions: None,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub const fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Whether a path with `edges` follow edges is within the depth bound.
    pub(crate) fn allows_depth(&self, edges: usize) -> bool {
        self.max_depth.map_or(true, |max| edges <= max)
    }
}

/// Counts node expansions against [`SearchLimits::max_expansions`].
#[derive(Debug)]
pub(crate) struct ExpansionBudget {
    used: usize,
    limit: Option<usize>,
}

impl ExpansionBudget {
    pub(crate) fn new(limits: &SearchLimits) -> Self {
        Self {
            used: 0,
            limit: limits.max_expansions,
        }
    }

    /// Charge one expansion. Called before a node's neighbors are examined, never midway.
    pub(crate) fn charge(&mut self) -> Result<(), GraphError> {
        self.used += 1;
        match self.limit {
            Some(limit) if self.used > limit => Err(GraphError::ExpansionLimit { limit }),
            _ => Ok(()),
        }
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }
}

/// Fewest-hops path from `source` to `target` with no limits.
pub fn shortest_path<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
) -> Result<ShortestPath, GraphError> {
    ShortestPathSearch::new(source, target).execute(graph)
}

/// Highest-engagement simple path by depth-first enumeration; first found wins ties.
pub fn max_engagement_path<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
) -> Result<EngagementPath, GraphError> {
    EngagementSearch::new(source, target).execute(graph)
}

/// Highest-engagement simple path by branch-and-bound best-first search.
/// Yields the same weight as [`max_engagement_path`]; the path may differ on ties.
pub fn best_first_engagement_path<G: GraphStore + ?Sized>(
    graph: &G,
    source: MemberId,
    target: MemberId,
) -> Result<EngagementPath, GraphError> {
    EngagementSearch::new(source, target).execute_best_first(graph)
}
