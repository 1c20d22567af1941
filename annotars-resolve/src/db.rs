//! The engine entry point: an annotation store plus process-scoped caches.

use std::sync::RwLock;

use fxhash::FxHashMap;
use once_cell::sync::OnceCell;

use annotars_core::models::{GeneSet, Region, RegionSet};
use annotars_overlaprs::GeneIndex;

use crate::errors::AnnotationError;
use crate::store::AnnotationStore;

/// Resolution engine over an [`AnnotationStore`] snapshot.
///
/// All caches follow the same lifecycle: built lazily on first use, at most
/// once (concurrent first access cannot race a duplicate build), then
/// read-only for the life of the value. A mutation of the backing store is
/// deliberately NOT picked up: callers get stale answers until
/// [`reset_caches`](Self::reset_caches) (normally: until process restart).
pub struct AnnotationDb<S> {
    store: S,
    approved: OnceCell<GeneSet>,
    symbol_cache: RwLock<FxHashMap<String, Option<String>>>,
    transcript_index: OnceCell<GeneIndex>,
    exon_index: OnceCell<GeneIndex>,
    enum_cache: RwLock<FxHashMap<String, Vec<String>>>,
}

impl<S: AnnotationStore> AnnotationDb<S> {
    pub fn new(store: S) -> Self {
        AnnotationDb {
            store,
            approved: OnceCell::new(),
            symbol_cache: RwLock::new(FxHashMap::default()),
            transcript_index: OnceCell::new(),
            exon_index: OnceCell::new(),
            enum_cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop every cache so the next access rebuilds from the store. Intended
    /// for tests; production code lives with the staleness window instead.
    pub fn reset_caches(&mut self) {
        self.approved = OnceCell::new();
        self.symbol_cache = RwLock::new(FxHashMap::default());
        self.transcript_index = OnceCell::new();
        self.exon_index = OnceCell::new();
        self.enum_cache = RwLock::new(FxHashMap::default());
    }

    /// The approved-symbol set, fetched from the store once per process.
    pub fn approved_gene_symbols(&self) -> &GeneSet {
        self.approved
            .get_or_init(|| self.store.approved_gene_symbols())
    }

    /// Valid values of an enumerated column, cached per `table.column`.
    pub fn enum_values(&self, table: &str, column: &str) -> Result<Vec<String>, AnnotationError> {
        let key = format!("{table}.{column}");
        if let Some(values) = self
            .enum_cache
            .read()
            .expect("enum cache lock poisoned")
            .get(&key)
        {
            return Ok(values.clone());
        }

        let values =
            self.store
                .enumeration(table, column)
                .ok_or_else(|| AnnotationError::UnknownEnumeration {
                    table: table.to_string(),
                    column: column.to_string(),
                })?;
        self.enum_cache
            .write()
            .expect("enum cache lock poisoned")
            .insert(key, values.clone());
        Ok(values)
    }

    /// All genes whose transcript span intersects
    /// [start-extend, end+extend) on the given chromosome.
    pub fn genes_overlapping(&self, chr: &str, start: u32, end: u32, extend: u32) -> GeneSet {
        self.transcript_index().query(chr, start, end, extend)
    }

    /// Like [`genes_overlapping`](Self::genes_overlapping), but indexed per
    /// exon instead of per transcript span.
    pub fn genes_overlapping_by_exon(
        &self,
        chr: &str,
        start: u32,
        end: u32,
        extend: u32,
    ) -> GeneSet {
        self.exon_index().query(chr, start, end, extend)
    }

    pub(crate) fn symbol_cache_get(&self, symbol: &str) -> Option<Option<String>> {
        self.symbol_cache
            .read()
            .expect("symbol cache lock poisoned")
            .get(symbol)
            .cloned()
    }

    pub(crate) fn symbol_cache_put(&self, symbol: String, resolved: Option<String>) {
        self.symbol_cache
            .write()
            .expect("symbol cache lock poisoned")
            .insert(symbol, resolved);
    }

    fn transcript_index(&self) -> &GeneIndex {
        self.transcript_index.get_or_init(|| {
            let mut regions = RegionSet::new();
            for gene in self.store.genes() {
                for transcript in self.store.transcripts_of(gene.id, None, false) {
                    if let Some((start, end)) = transcript.span() {
                        regions.push(Region::with_annotations(
                            transcript.chromosome.clone(),
                            start,
                            end,
                            vec![gene.symbol.clone()],
                        ));
                    }
                }
            }
            log::info!(
                "built transcript-span gene index with {} intervals",
                regions.len()
            );
            GeneIndex::build(regions)
        })
    }

    fn exon_index(&self) -> &GeneIndex {
        self.exon_index.get_or_init(|| {
            let mut regions = RegionSet::new();
            for gene in self.store.genes() {
                for transcript in self.store.transcripts_of(gene.id, None, false) {
                    for exon in &transcript.regions {
                        regions.push(Region::with_annotations(
                            exon.chr.clone(),
                            exon.start,
                            exon.end,
                            vec![gene.symbol.clone()],
                        ));
                    }
                }
            }
            log::info!("built exon gene index with {} intervals", regions.len());
            GeneIndex::build(regions)
        })
    }
}
