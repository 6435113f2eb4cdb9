//! Social graph store, engagement scoring and path search.

mod memory;
pub mod scoring;
pub mod search;
mod snapshot;

pub use memory::InMemorySocialGraph;
pub use search::{
    best_first_engagement_path, max_engagement_path, shortest_path, EngagementSearch,
    SearchLimits, ShortestPathSearch,
};
pub use snapshot::{GraphSnapshot, MemberSnapshot};
pub use social_types::{
    EngagementPath, FrontierSnapshot, GraphError, GraphStore, Interaction, InteractionKind,
    Member, MemberId, ShortestPath,
};
