use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown transcript source: {0}")]
    UnknownSource(String),

    #[error("Unknown strand: {0}")]
    UnknownStrand(String),
}
