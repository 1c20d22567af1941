//! Gene symbol resolution: approved symbols, previous/synonym aliases and
//! the two calling conventions layered on one canonical lookup.

use annotars_core::models::GeneSet;

use crate::db::AnnotationDb;
use crate::store::{AliasKind, AnnotationStore, GeneId};

/// Outcome of resolving one raw gene symbol.
///
/// Ambiguity is a first-class result: a symbol claimed by several genes is
/// reported with every candidate, and callers must not silently pick one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The input is an approved symbol itself.
    Approved(String),
    /// The input is an alias of exactly one gene.
    Replaced { symbol: String, via: AliasKind },
    /// The input is an alias of several genes; candidates are canonical
    /// symbols ordered by ascending gene id.
    Ambiguous {
        candidates: Vec<String>,
        via: AliasKind,
    },
    /// The input matches neither approved symbols nor aliases.
    Unknown,
}

impl ResolutionResult {
    /// The single resolved symbol, if there is one.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            ResolutionResult::Approved(symbol) => Some(symbol),
            ResolutionResult::Replaced { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}

impl<S: AnnotationStore> AnnotationDb<S> {
    /// Resolve a raw gene name to its canonical symbol.
    ///
    /// The input is trimmed and uppercased, then checked against the approved
    /// set, then against `previous` alias edges, then against `synonym`
    /// edges. An ambiguous `previous` match does NOT fall through to the
    /// synonym check. Both public calling conventions
    /// ([`gene_to_approved`](Self::gene_to_approved),
    /// [`resolve_with_message`](Self::resolve_with_message)) derive from this
    /// one lookup.
    pub fn resolve(&self, raw: &str) -> ResolutionResult {
        let gene = raw.trim().to_uppercase();

        if self.approved_gene_symbols().contains(&gene) {
            return ResolutionResult::Approved(gene);
        }

        for kind in [AliasKind::Previous, AliasKind::Synonym] {
            let mut matches = self.store().aliases_of(&gene, kind);
            matches.sort_by_key(|m| m.gene_id);
            match matches.len() {
                0 => continue,
                1 => {
                    return ResolutionResult::Replaced {
                        symbol: matches.remove(0).symbol,
                        via: kind,
                    };
                }
                _ => {
                    return ResolutionResult::Ambiguous {
                        candidates: matches.into_iter().map(|m| m.symbol).collect(),
                        via: kind,
                    };
                }
            }
        }

        ResolutionResult::Unknown
    }

    /// Best-effort resolution. Returns the canonical symbol, or on an
    /// ambiguous/unknown input either the (normalized) input itself or
    /// `None`, depending on `return_input_when_unconvertable`. Results are
    /// memoized for the life of the process.
    pub fn gene_to_approved(
        &self,
        gene: &str,
        return_input_when_unconvertable: bool,
    ) -> Option<String> {
        let gene = gene.trim().to_uppercase();

        // approved symbols never enter the memo
        if self.approved_gene_symbols().contains(&gene) {
            return Some(gene);
        }

        let resolved = match self.symbol_cache_get(&gene) {
            Some(cached) => cached,
            None => {
                let resolved = self.resolve(&gene).symbol().map(String::from);
                self.symbol_cache_put(gene.clone(), resolved.clone());
                resolved
            }
        };

        match resolved {
            Some(symbol) => Some(symbol),
            None if return_input_when_unconvertable => Some(gene),
            None => None,
        }
    }

    /// Best-effort resolution of a whole set; unconvertable symbols are
    /// dropped unless `return_input_when_unconvertable` keeps them as-is.
    pub fn genes_to_approved(
        &self,
        genes: &GeneSet,
        return_input_when_unconvertable: bool,
    ) -> GeneSet {
        let mut output = GeneSet::new();
        for gene in genes {
            if let Some(symbol) = self.gene_to_approved(gene, return_input_when_unconvertable) {
                output.insert(symbol);
            }
        }
        output
    }

    /// Resolve the approved numeric gene id of a raw symbol, if it resolves
    /// to exactly one gene.
    pub fn gene_to_approved_id(&self, gene: &str) -> Option<GeneId> {
        self.resolve(gene)
            .symbol()
            .and_then(|symbol| self.store().gene_id(symbol))
    }

    /// Diagnostic resolution: the resolved symbol (or the normalized input if
    /// unresolvable) plus a human-readable reason.
    pub fn resolve_with_message(&self, gene: &str) -> (String, String) {
        let gene = gene.trim().to_uppercase();

        match self.resolve(&gene) {
            ResolutionResult::Approved(symbol) => {
                let message = format!("KEPT: {gene} is an approved symbol");
                (symbol, message)
            }
            ResolutionResult::Replaced { symbol, via } => {
                (symbol, format!("REPLACED: {gene} is {}", via.describe()))
            }
            ResolutionResult::Ambiguous { candidates, via } => {
                let message = format!(
                    "ERROR: {gene} is {} of the genes {}",
                    via.describe(),
                    candidates.join(", ")
                );
                (gene, message)
            }
            ResolutionResult::Unknown => {
                let message = format!("ERROR: {gene} is an unknown symbol");
                (gene, message)
            }
        }
    }

    /// Like [`resolve_with_message`](Self::resolve_with_message), but an
    /// ambiguous symbol yields one row per candidate gene instead of one
    /// error row.
    pub fn resolve_all_with_message(&self, gene: &str) -> Vec<(String, String)> {
        let gene = gene.trim().to_uppercase();

        match self.resolve(&gene) {
            ResolutionResult::Approved(symbol) => {
                vec![(symbol, format!("KEPT: {gene} is an approved symbol"))]
            }
            ResolutionResult::Replaced { symbol, via } => {
                vec![(symbol, format!("REPLACED: {gene} is {}", via.describe()))]
            }
            ResolutionResult::Ambiguous { candidates, via } => candidates
                .into_iter()
                .map(|symbol| (symbol, format!("REPLACED: {gene} is {}", via.describe())))
                .collect(),
            ResolutionResult::Unknown => {
                vec![(gene.clone(), format!("ERROR: {gene} is an unknown symbol"))]
            }
        }
    }

    /// Historical symbols of one gene.
    pub fn previous_symbols(&self, id: GeneId) -> GeneSet {
        self.store().alias_symbols_of(id, AliasKind::Previous)
    }

    /// Alternate names of one gene.
    pub fn synonymous_symbols(&self, id: GeneId) -> GeneSet {
        self.store().alias_symbols_of(id, AliasKind::Synonym)
    }
}

impl AliasKind {
    fn describe(self) -> &'static str {
        match self {
            AliasKind::Previous => "a previous symbol",
            AliasKind::Synonym => "a synonymous symbol",
        }
    }
}
