use thiserror::Error;

/// Errors of the resolution engine.
///
/// Ambiguous or unknown gene symbols are NOT errors; they are values of
/// [`crate::ResolutionResult`] that callers must branch on.
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// The region mode string is not one of the recognized values. Fatal to
    /// the call, never retried.
    #[error("Invalid mode '{0}'. Valid modes are: gene, exon.")]
    InvalidMode(String),

    /// A phenotype passed into a traversal does not exist in the ontology.
    #[error("Unknown phenotype '{0}'!")]
    UnknownPhenotype(String),

    /// Raised only by the throwing lookup variant.
    #[error("Cannot find phenotype with name '{0}'!")]
    PhenotypeNameNotFound(String),

    /// Raised only by the throwing lookup variant.
    #[error("Cannot find phenotype with accession '{0}'!")]
    PhenotypeAccessionNotFound(String),

    /// The requested enumerated column is not known to the store.
    #[error("Could not determine enum values of column '{column}' in table '{table}'!")]
    UnknownEnumeration { table: String, column: String },
}
