//! Phenotype ontology navigation: descendant genes and terms, free-text
//! search.
//!
//! The parent-to-child term graph is treated as untrusted data. Traversal uses
//! an explicit work list and a visited set, so cycles or duplicate edges in a
//! malformed ontology cost nothing but a skipped iteration.

use fxhash::FxHashSet;

use annotars_core::models::{GeneSet, Phenotype};

use crate::db::AnnotationDb;
use crate::errors::AnnotationError;
use crate::store::{AnnotationStore, TermId};

impl<S: AnnotationStore> AnnotationDb<S> {
    /// Lookup a phenotype by name; absence is an error.
    pub fn phenotype_by_name(&self, name: &str) -> Result<Phenotype, AnnotationError> {
        self.store()
            .phenotype_by_name(name)
            .ok_or_else(|| AnnotationError::PhenotypeNameNotFound(name.to_string()))
    }

    /// Lookup a phenotype by name; absence is an empty result.
    pub fn try_phenotype_by_name(&self, name: &str) -> Option<Phenotype> {
        self.store().phenotype_by_name(name)
    }

    /// Lookup a phenotype by accession; absence is an error.
    pub fn phenotype_by_accession(&self, accession: &str) -> Result<Phenotype, AnnotationError> {
        self.store()
            .phenotype_by_accession(accession)
            .ok_or_else(|| AnnotationError::PhenotypeAccessionNotFound(accession.to_string()))
    }

    /// Lookup a phenotype by accession; absence is an empty result.
    pub fn try_phenotype_by_accession(&self, accession: &str) -> Option<Phenotype> {
        self.store().phenotype_by_accession(accession)
    }

    /// All canonical gene symbols associated with a phenotype.
    ///
    /// With `recursive`, genes of every descendant term are included. Raw
    /// symbols go through best-effort resolution, keeping the original text
    /// when unresolvable.
    pub fn phenotype_to_genes(
        &self,
        phenotype: &Phenotype,
        recursive: bool,
    ) -> Result<GeneSet, AnnotationError> {
        let seed = self
            .store()
            .phenotype_id(&phenotype.name)
            .ok_or_else(|| AnnotationError::UnknownPhenotype(phenotype.to_string()))?;

        let mut genes = GeneSet::new();
        let mut pending = vec![seed];
        let mut visited: FxHashSet<TermId> = FxHashSet::default();

        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                // cyclic or duplicate edge in the ontology data
                log::debug!("phenotype traversal revisited term {:?}, skipping", id);
                continue;
            }

            for raw in self.store().genes_of_term(id) {
                if let Some(symbol) = self.gene_to_approved(&raw, true) {
                    genes.insert(symbol);
                }
            }

            if recursive {
                pending.extend(self.store().child_terms_of(id));
            }
        }

        Ok(genes)
    }

    /// Child terms of a phenotype, in discovery order. With `recursive`,
    /// grandchildren and deeper descendants follow their parent.
    pub fn phenotype_children(
        &self,
        phenotype: &Phenotype,
        recursive: bool,
    ) -> Result<Vec<Phenotype>, AnnotationError> {
        let seed = self
            .store()
            .phenotype_id(&phenotype.name)
            .ok_or_else(|| AnnotationError::UnknownPhenotype(phenotype.to_string()))?;

        let mut terms = Vec::new();
        let mut pending = vec![seed];
        let mut visited: FxHashSet<TermId> = FxHashSet::default();
        visited.insert(seed);

        while let Some(id) = pending.pop() {
            for child in self.store().child_terms_of(id) {
                if !visited.insert(child) {
                    log::debug!("phenotype traversal revisited term {:?}, skipping", child);
                    continue;
                }
                if let Some(term) = self.store().term(child) {
                    terms.push(term);
                }
                if recursive {
                    pending.push(child);
                }
            }
        }

        Ok(terms)
    }

    /// Free-text phenotype search.
    ///
    /// Every search term is matched independently against name, accession and
    /// synonyms (substring, case-insensitive); the per-term result sets are
    /// then intersected. No terms means every phenotype. The result is always
    /// sorted by name.
    pub fn phenotypes<T: AsRef<str>>(&self, search_terms: &[T]) -> Vec<Phenotype> {
        let terms: Vec<&str> = search_terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();

        let mut list: Vec<Phenotype> = if terms.is_empty() {
            self.store().phenotype_search_candidates("")
        } else {
            let mut intersection: Option<FxHashSet<Phenotype>> = None;
            for term in terms {
                let candidates: FxHashSet<Phenotype> = self
                    .store()
                    .phenotype_search_candidates(term)
                    .into_iter()
                    .collect();
                intersection = Some(match intersection {
                    None => candidates,
                    Some(previous) => previous.intersection(&candidates).cloned().collect(),
                });
            }
            intersection.unwrap_or_default().into_iter().collect()
        };

        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}
