//! Genomic annotation resolution engine.
//!
//! This crate answers three questions over an annotation snapshot provided by
//! an [`AnnotationStore`]:
//!
//! 1. *What is the canonical symbol for this gene name?* The symbol
//!    resolver walks the approved-symbol set and the previous/synonym alias
//!    edges and surfaces ambiguity instead of guessing
//!    ([`AnnotationDb::resolve`]).
//! 2. *Which genomic regions belong to this gene?* The region mapper turns
//!    transcripts and exons into sorted, merged BED regions, with
//!    coding-region clipping ([`AnnotationDb::gene_to_regions`]).
//! 3. *Which genes are linked to this phenotype, or overlap this range?* The
//!    ontology navigator walks the parent-to-child term graph cycle-safely,
//!    and the lazily-built gene indexes answer overlap queries
//!    ([`AnnotationDb::phenotype_to_genes`],
//!    [`AnnotationDb::genes_overlapping`]).
//!
//! The engine is synchronous. Its only shared state are process-scoped
//! caches on [`AnnotationDb`] that are built at most once and read-only
//! afterwards; a change in the backing store is not reflected until
//! [`AnnotationDb::reset_caches`] is called.

pub mod db;
pub mod errors;
pub mod gene;
pub mod memory;
pub mod phenotype;
pub mod regions;
pub mod store;

// re-exports
pub use self::db::AnnotationDb;
pub use self::errors::AnnotationError;
pub use self::gene::ResolutionResult;
pub use self::memory::MemoryStore;
pub use self::regions::RegionMode;
pub use self::store::{AliasKind, AliasMatch, AnnotationStore, GeneId, GeneRecord, TermId};
