use crate::config::ReportConfig;
use crate::generate::{NetworkGenerator, SeededNetworkGenerator};
use crate::matrix::{engagement_matrix, relationship_matrix};
use crate::stats::{overall_statistics, OverallStatistics};
use crate::summary::{summarize, PairwiseSummary};
use crate::ReportError;
use serde::{Deserialize, Serialize};
use social_graph::{GraphSnapshot, GraphStore, InMemorySocialGraph, MemberId, SearchLimits};
use std::sync::Arc;

/// Everything the driver writes out for one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    /// RFC 3339 creation time.
    pub generated_at: String,
    /// Row and column order of both matrices.
    pub member_ids: Vec<MemberId>,
    pub overall: OverallStatistics,
    pub summary: PairwiseSummary,
    pub relationship_matrix: Vec<Vec<u8>>,
    pub engagement_matrix: Vec<Vec<u64>>,
}

/// Load the snapshot named by `config.input`, or generate a network from the seed.
pub fn load_graph(config: &ReportConfig) -> Result<InMemorySocialGraph, ReportError> {
    match &config.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let graph = InMemorySocialGraph::from_snapshot(GraphSnapshot::from_json(&raw)?)?;
            tracing::info!(
                path = %path.display(),
                members = graph.member_count(),
                "loaded network"
            );
            Ok(graph)
        }
        None => {
            let graph =
                SeededNetworkGenerator::new(config.generator.clone(), config.seed).generate()?;
            tracing::info!(
                seed = config.seed,
                members = graph.member_count(),
                "generated network"
            );
            Ok(graph)
        }
    }
}

pub async fn build_report(
    graph: Arc<InMemorySocialGraph>,
    limits: SearchLimits,
) -> Result<NetworkReport, ReportError> {
    let relationship_matrix = relationship_matrix(graph.as_ref())?;
    let engagement_matrix = engagement_matrix(graph.as_ref())?;
    let overall = overall_statistics(graph.as_ref())?;
    let member_ids = graph.member_ids();
    let summary = summarize(graph, limits).await?;

    tracing::info!(
        members = member_ids.len(),
        pairs = summary.pairs.len(),
        "report built"
    );
    Ok(NetworkReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        member_ids,
        overall,
        summary,
        relationship_matrix,
        engagement_matrix,
    })
}
