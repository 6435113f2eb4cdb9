//! All-pairs report over a social graph: generation, statistics, search summaries and output.

pub mod config;
mod error;
pub mod generate;
pub mod matrix;
pub mod render;
pub mod report;
pub mod stats;
pub mod summary;

pub use error::ReportError;
