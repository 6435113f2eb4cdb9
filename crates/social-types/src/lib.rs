//! Core types and traits for social graph analytics.
//!
//! Member records, interaction counters, search results and the read-side `GraphStore`
//! trait shared by the store, scoring and search code.

mod dto;
mod traits;

pub use dto::*;
pub use traits::*;
