//! Narrow read interface to the persistent annotation store.
//!
//! The engine never talks to a database directly; it consumes a snapshot of
//! gene, transcript and phenotype records through [`AnnotationStore`]. All
//! methods are plain reads over already-resident data; transport, schema and
//! query language of the backing store are somebody else's problem.

use annotars_core::models::{GeneSet, Phenotype, Transcript, TranscriptSource};

/// Internal numeric id of a gene record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneId(pub i64);

/// Internal numeric id of a phenotype term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub i64);

/// One gene record: canonical symbol plus internal id. Owned by the store;
/// the engine reads it, never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub id: GeneId,
    pub symbol: String,
}

/// Kind of an alias edge: a historical symbol or an alternate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasKind {
    Previous,
    Synonym,
}

/// One gene claiming an alias symbol. `symbol` is the gene's canonical
/// symbol, not the alias text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch {
    pub gene_id: GeneId,
    pub symbol: String,
    pub kind: AliasKind,
}

/// Snapshot reads the engine is allowed to perform.
///
/// Gene and alias symbols are matched case-sensitively; the engine normalizes
/// its inputs (trim + uppercase) before lookup, and implementations are
/// expected to hold uppercase symbols.
pub trait AnnotationStore: Send + Sync {
    /// Every approved (canonical) gene symbol.
    fn approved_gene_symbols(&self) -> GeneSet;

    /// Id of the gene with this canonical symbol.
    fn gene_id(&self, symbol: &str) -> Option<GeneId>;

    /// Canonical symbol of the gene with this id.
    fn gene_symbol(&self, id: GeneId) -> Option<String>;

    /// All genes claiming `symbol` as an alias of the given kind, ordered by
    /// ascending gene id.
    fn aliases_of(&self, symbol: &str, kind: AliasKind) -> Vec<AliasMatch>;

    /// Alias symbols of one gene (the reverse direction of [`Self::aliases_of`]).
    fn alias_symbols_of(&self, id: GeneId, kind: AliasKind) -> GeneSet;

    /// Snapshot of all gene records, ordered by id.
    fn genes(&self) -> Vec<GeneRecord>;

    /// Transcripts of a gene, ordered by transcript name, each with its exons
    /// merged into sorted non-overlapping blocks.
    ///
    /// `source = None` places no restriction on the annotation source.
    /// `coding_only` drops non-coding transcripts and clips the exon blocks
    /// of coding ones to the coding region.
    fn transcripts_of(
        &self,
        gene_id: GeneId,
        source: Option<TranscriptSource>,
        coding_only: bool,
    ) -> Vec<Transcript>;

    fn phenotype_by_name(&self, name: &str) -> Option<Phenotype>;

    fn phenotype_by_accession(&self, accession: &str) -> Option<Phenotype>;

    /// Term id for a phenotype name.
    fn phenotype_id(&self, name: &str) -> Option<TermId>;

    /// Child terms of one term in the parent-to-child adjacency. The data may be
    /// malformed (cycles, duplicate edges); callers must guard traversal.
    fn child_terms_of(&self, id: TermId) -> Vec<TermId>;

    fn term(&self, id: TermId) -> Option<Phenotype>;

    /// Raw (possibly outdated) gene symbols directly associated with a term.
    fn genes_of_term(&self, id: TermId) -> Vec<String>;

    /// Terms whose name, accession or any synonym contains `substring`
    /// (case-insensitive). An empty substring matches every term. No
    /// ordering is guaranteed.
    fn phenotype_search_candidates(&self, substring: &str) -> Vec<Phenotype>;

    /// Valid values of an enumerated column, or `None` if the column is not
    /// an enumeration known to the store.
    fn enumeration(&self, table: &str, column: &str) -> Option<Vec<String>>;
}
