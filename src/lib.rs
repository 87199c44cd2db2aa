//! # Facet
//!
//! Turns tabular uploads into storage-ready table specs and chart-ready
//! summaries, and plain-language questions into SQL-backed chart suggestions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            CSV / Excel / JSON (file or URL)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ingest]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Dataset (columns + typed rows)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [identifier + schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │        TableSpec ──▶ TableStore (external seam)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema::describe + llm]
//! ┌─────────────────────────────────────────────────────────┐
//! │        question ──▶ SQL ──▶ [classify] ──▶ suggestion    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [chart]
//! ┌─────────────────────────────────────────────────────────┐
//! │          ChartData { labels, datasets }                  │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod chart;
pub mod classify;
pub mod config;
pub mod identifier;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod schema;
pub mod store;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::chart::{ChartData, ChartSeries, ChartSuggestion, ChartType};
    pub use crate::classify::classify;
    pub use crate::config::Settings;
    pub use crate::identifier::IdentifierScope;
    pub use crate::ingest::Dataset;
    pub use crate::llm::SqlGenerator;
    pub use crate::pipeline::{ask, upload, AskOutcome, UploadOutcome};
    pub use crate::schema::{FieldKind, FieldSpec, TableSpec};
    pub use crate::store::{MemoryStore, Row, TableStore};
}

// Also export the core entry points at the crate root for convenience
pub use chart::{ChartData, ChartSuggestion, ChartType};
pub use classify::classify;
pub use identifier::IdentifierScope;
