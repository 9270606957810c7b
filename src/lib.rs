//! # Trie-Indexed Player Search Engine
//!
//! ## Overview
//! This library builds an in-memory index over three tabular datasets
//! (player records, per-user numeric ratings, free-form tags) and answers
//! ad-hoc queries against it: substring and prefix name search, per-user
//! rating lookup, top-N ranking by position, and tag-intersection search.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `parser`: tolerant line-oriented tabular field splitting
//! - `store`: record aggregates keyed by identifier, insertion-ordered
//! - `trie`: character-level prefix index over display names
//! - `ingestion`: three-phase pipeline populating both indexes
//! - `search`: read-only query engine with per-query ranking rules
//! - `repl`: command parsing and table rendering for the interactive loop
//! - `config`: configuration management and settings
//! - `errors`: centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: line streams for the records, ratings, and tags datasets
//! - **Output**: ordered lists of records (or score/record pairs)
//! - **Lifecycle**: indexes are built once per run, then read-only
//!
//! ## Usage
//! ```rust,no_run
//! use player_trie_search::{IngestionPipeline, QueryConfig, QueryEngine};
//!
//! fn main() -> player_trie_search::Result<()> {
//!     let records = vec![
//!         "sofifa_id,short_name,long_name,player_positions,nationality,club_name,league_name"
//!             .to_string(),
//!         "158023,L. Messi,Lionel Andres Messi,\"RW, ST, CF\",Argentina,FC Barcelona,La Liga"
//!             .to_string(),
//!     ];
//!     let catalog = IngestionPipeline::new().ingest(
//!         records,
//!         std::iter::empty::<String>(),
//!         std::iter::empty::<String>(),
//!     )?;
//!     let engine = QueryEngine::new(&catalog, QueryConfig::default());
//!     println!("{} matches", engine.search_by_name_substring("Messi").len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod ingestion;
pub mod parser;
pub mod store;
pub mod trie;
pub mod search;
pub mod repl;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use config::{Config, QueryConfig};
pub use errors::{CatalogError, Result};
pub use ingestion::{IngestStats, IngestionPipeline};
pub use search::QueryEngine;
pub use store::{Record, RecordStore};
pub use trie::NamePrefixIndex;

/// Unique identifier for catalogued players, assigned by the source data.
pub type RecordId = u32;

/// The fully built index pair plus the counters gathered while loading.
///
/// Produced once by [`IngestionPipeline::ingest`] and treated as immutable
/// for the rest of the run; the query engine borrows it read-only.
#[derive(Debug)]
pub struct Catalog {
    pub store: RecordStore,
    pub names: NamePrefixIndex,
    pub stats: IngestStats,
}
