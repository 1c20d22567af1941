//! In-memory implementation of [`AnnotationStore`].
//!
//! `MemoryStore` holds a full annotation snapshot in plain maps. It backs the
//! test suites and serves as the reference implementation of the store
//! contract (symbol case, alias ordering, transcript clipping).

use std::collections::BTreeMap;

use fxhash::FxHashMap;

use annotars_core::models::{
    CodingRegion, GeneSet, Phenotype, Region, RegionSet, Strand, Transcript, TranscriptSource,
};

use crate::store::{AliasKind, AliasMatch, AnnotationStore, GeneId, GeneRecord, TermId};

#[derive(Debug, Clone)]
struct TranscriptRecord {
    name: String,
    source: TranscriptSource,
    strand: Strand,
    chromosome: String,
    coding: Option<CodingRegion>,
    exons: Vec<(u32, u32)>,
}

#[derive(Debug, Clone)]
struct PhenotypeRecord {
    accession: String,
    name: String,
    synonyms: Vec<String>,
}

/// A complete annotation snapshot held in memory.
#[derive(Default)]
pub struct MemoryStore {
    genes: BTreeMap<GeneId, String>,
    symbols: FxHashMap<String, GeneId>,
    aliases: Vec<(GeneId, String, AliasKind)>,
    transcripts: FxHashMap<GeneId, Vec<TranscriptRecord>>,
    terms: BTreeMap<TermId, PhenotypeRecord>,
    term_names: FxHashMap<String, TermId>,
    term_accessions: FxHashMap<String, TermId>,
    children: FxHashMap<TermId, Vec<TermId>>,
    term_genes: FxHashMap<TermId, Vec<String>>,
    enumerations: FxHashMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Register an approved gene. Symbols are stored uppercased.
    pub fn add_gene(&mut self, id: i64, symbol: &str) {
        let symbol = symbol.trim().to_uppercase();
        self.genes.insert(GeneId(id), symbol.clone());
        self.symbols.insert(symbol, GeneId(id));
    }

    /// Register an alias edge pointing at a gene. Alias text is stored
    /// uppercased. The same alias may point at several genes.
    pub fn add_alias(&mut self, alias: &str, gene_id: i64, kind: AliasKind) {
        self.aliases
            .push((GeneId(gene_id), alias.trim().to_uppercase(), kind));
    }

    /// Register a transcript with its raw exon list. `coding = None` marks a
    /// non-coding transcript.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transcript(
        &mut self,
        gene_id: i64,
        name: &str,
        source: TranscriptSource,
        strand: Strand,
        chromosome: &str,
        coding: Option<(u32, u32)>,
        exons: &[(u32, u32)],
    ) {
        self.transcripts
            .entry(GeneId(gene_id))
            .or_default()
            .push(TranscriptRecord {
                name: name.to_string(),
                source,
                strand,
                chromosome: chromosome.to_string(),
                coding: coding.map(|(start, end)| CodingRegion { start, end }),
                exons: exons.to_vec(),
            });
    }

    pub fn add_phenotype(&mut self, id: i64, accession: &str, name: &str, synonyms: &[&str]) {
        self.terms.insert(
            TermId(id),
            PhenotypeRecord {
                accession: accession.to_string(),
                name: name.to_string(),
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            },
        );
        self.term_names.insert(name.to_string(), TermId(id));
        self.term_accessions
            .insert(accession.to_string(), TermId(id));
    }

    /// Register a parent-to-child ontology edge. Nothing prevents cycles; the
    /// engine's traversal must cope with them.
    pub fn add_phenotype_child(&mut self, parent: i64, child: i64) {
        self.children
            .entry(TermId(parent))
            .or_default()
            .push(TermId(child));
    }

    /// Associate a raw gene symbol with a term.
    pub fn add_phenotype_gene(&mut self, term: i64, gene: &str) {
        self.term_genes
            .entry(TermId(term))
            .or_default()
            .push(gene.to_string());
    }

    /// Register the valid values of an enumerated column.
    pub fn add_enumeration(&mut self, table: &str, column: &str, values: &[&str]) {
        self.enumerations.insert(
            format!("{table}.{column}"),
            values.iter().map(|v| v.to_string()).collect(),
        );
    }

    fn record(&self, id: TermId) -> Option<&PhenotypeRecord> {
        self.terms.get(&id)
    }
}

fn to_phenotype(record: &PhenotypeRecord) -> Phenotype {
    Phenotype::new(record.accession.clone(), record.name.clone())
}

impl AnnotationStore for MemoryStore {
    fn approved_gene_symbols(&self) -> GeneSet {
        self.genes.values().map(String::as_str).collect()
    }

    fn gene_id(&self, symbol: &str) -> Option<GeneId> {
        self.symbols.get(symbol).copied()
    }

    fn gene_symbol(&self, id: GeneId) -> Option<String> {
        self.genes.get(&id).cloned()
    }

    fn aliases_of(&self, symbol: &str, kind: AliasKind) -> Vec<AliasMatch> {
        let mut matches: Vec<AliasMatch> = self
            .aliases
            .iter()
            .filter(|(_, alias, alias_kind)| *alias_kind == kind && alias == symbol)
            .filter_map(|(gene_id, _, alias_kind)| {
                self.genes.get(gene_id).map(|canonical| AliasMatch {
                    gene_id: *gene_id,
                    symbol: canonical.clone(),
                    kind: *alias_kind,
                })
            })
            .collect();
        matches.sort_by_key(|m| m.gene_id);
        matches
    }

    fn alias_symbols_of(&self, id: GeneId, kind: AliasKind) -> GeneSet {
        self.aliases
            .iter()
            .filter(|(gene_id, _, alias_kind)| *gene_id == id && *alias_kind == kind)
            .map(|(_, alias, _)| alias.as_str())
            .collect()
    }

    fn genes(&self) -> Vec<GeneRecord> {
        self.genes
            .iter()
            .map(|(id, symbol)| GeneRecord {
                id: *id,
                symbol: symbol.clone(),
            })
            .collect()
    }

    fn transcripts_of(
        &self,
        gene_id: GeneId,
        source: Option<TranscriptSource>,
        coding_only: bool,
    ) -> Vec<Transcript> {
        let Some(records) = self.transcripts.get(&gene_id) else {
            return Vec::new();
        };

        let mut output: Vec<Transcript> = Vec::new();
        for record in records {
            if source.is_some_and(|s| s != record.source) {
                continue;
            }
            if coding_only && record.coding.is_none() {
                continue;
            }

            // clip to the coding region, dropping fully non-coding exons
            let clip = if coding_only { record.coding } else { None };
            let mut regions = RegionSet::new();
            for &(mut start, mut end) in &record.exons {
                if let Some(coding) = clip {
                    if end <= coding.start || start >= coding.end {
                        continue;
                    }
                    start = start.max(coding.start);
                    end = end.min(coding.end);
                }
                regions.push(Region::new(record.chromosome.clone(), start, end));
            }
            regions.sort();
            regions.merge();

            output.push(Transcript {
                name: record.name.clone(),
                source: record.source,
                strand: record.strand,
                chromosome: record.chromosome.clone(),
                coding: record.coding,
                regions,
            });
        }
        output.sort_by(|a, b| a.name.cmp(&b.name));
        output
    }

    fn phenotype_by_name(&self, name: &str) -> Option<Phenotype> {
        self.term_names
            .get(name)
            .and_then(|id| self.record(*id))
            .map(to_phenotype)
    }

    fn phenotype_by_accession(&self, accession: &str) -> Option<Phenotype> {
        self.term_accessions
            .get(accession)
            .and_then(|id| self.record(*id))
            .map(to_phenotype)
    }

    fn phenotype_id(&self, name: &str) -> Option<TermId> {
        self.term_names.get(name).copied()
    }

    fn child_terms_of(&self, id: TermId) -> Vec<TermId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }

    fn term(&self, id: TermId) -> Option<Phenotype> {
        self.record(id).map(to_phenotype)
    }

    fn genes_of_term(&self, id: TermId) -> Vec<String> {
        self.term_genes.get(&id).cloned().unwrap_or_default()
    }

    fn phenotype_search_candidates(&self, substring: &str) -> Vec<Phenotype> {
        let needle = substring.to_lowercase();
        self.terms
            .values()
            .filter(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record.accession.to_lowercase().contains(&needle)
                    || record
                        .synonyms
                        .iter()
                        .any(|s| s.to_lowercase().contains(&needle))
            })
            .map(to_phenotype)
            .collect()
    }

    fn enumeration(&self, table: &str, column: &str) -> Option<Vec<String>> {
        self.enumerations.get(&format!("{table}.{column}")).cloned()
    }
}
