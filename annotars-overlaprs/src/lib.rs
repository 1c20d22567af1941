//! Interval overlap machinery for gene annotation lookups.
//!
//! This crate provides the sorted-position data structures used to answer
//! "which genes overlap this coordinate range" on genomic-scale annotation
//! snapshots. All overlap computation logic should live here. Higher-level
//! crates (`annotars-resolve`) build their gene indexes on top of this
//! functionality but should not reimplement overlap algorithms.
//!
//! ## Quick Start
//!
//! ```rust
//! use annotars_overlaprs::{Overlapper, SortedIndex};
//! use annotars_core::models::Interval;
//!
//! // per-chromosome gene spans
//! let spans = vec![
//!     Interval { start: 1000, end: 2000, val: "BRCA1" },
//!     Interval { start: 1500, end: 3000, val: "TP53" },
//!     Interval { start: 4000, end: 5000, val: "EGFR" },
//! ];
//!
//! let index = SortedIndex::build(spans);
//!
//! // query for overlapping intervals
//! let overlaps = index.find(1800, 2500);
//! assert_eq!(overlaps.len(), 2); // BRCA1 and TP53
//! ```
//!
//! Intervals are half-open `[start, end)` and coordinates are `u32`, matching
//! the models in `annotars-core`. The structures are immutable after `build`:
//! answering queries never mutates them, and refreshing the underlying data
//! means building a new index.

/// Sorted-position interval index.
///
/// See [`SortedIndex`] for details.
pub mod sorted_index;

/// Genome-wide gene interval indexing.
///
/// See [`GeneIndex`] for details.
pub mod gene_index;

/// Core trait for overlap operations.
///
/// See [`Overlapper`] for details.
pub mod traits;

// re-exports
pub use self::gene_index::GeneIndex;
pub use self::sorted_index::SortedIndex;
pub use self::traits::{Interval, Overlapper};
