use social_types::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("graph: {0}")]
    Graph(#[from] GraphError),
    #[error("config: {0}")]
    Config(String),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
