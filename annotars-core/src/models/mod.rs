pub mod gene_set;
pub mod interval;
pub mod phenotype;
pub mod region;
pub mod region_set;
pub mod transcript;

// re-export for cleaner imports
pub use self::gene_set::GeneSet;
pub use self::interval::Interval;
pub use self::phenotype::Phenotype;
pub use self::region::Region;
pub use self::region_set::RegionSet;
pub use self::transcript::{CodingRegion, Strand, Transcript, TranscriptSource};
