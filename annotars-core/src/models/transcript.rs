use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ModelError;
use crate::models::RegionSet;

/// Annotation source a transcript was imported from.
///
/// This is a closed enumeration: the two sources are mutually each other's
/// alternate, which the fallback paths of the region mapper rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TranscriptSource {
    Ccds,
    Ensembl,
}

impl TranscriptSource {
    /// The other recognized source (CCDS <-> ENSEMBL).
    pub fn alternate(self) -> TranscriptSource {
        match self {
            TranscriptSource::Ccds => TranscriptSource::Ensembl,
            TranscriptSource::Ensembl => TranscriptSource::Ccds,
        }
    }
}

impl FromStr for TranscriptSource {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ccds" => Ok(TranscriptSource::Ccds),
            "ensembl" => Ok(TranscriptSource::Ensembl),
            _ => Err(ModelError::UnknownSource(s.to_string())),
        }
    }
}

impl Display for TranscriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptSource::Ccds => write!(f, "ccds"),
            TranscriptSource::Ensembl => write!(f, "ensembl"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Plus,
    Minus,
}

impl FromStr for Strand {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(ModelError::UnknownStrand(s.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// Translated subrange of a transcript, half-open like all coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodingRegion {
    pub start: u32,
    pub end: u32,
}

///
/// Transcript struct, one exon/coding structure of a gene.
///
/// `regions` holds the exons as sorted, merged, non-overlapping blocks on the
/// transcript's chromosome (unprefixed label, e.g. "1"). A transcript without
/// a coding region is non-coding.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transcript {
    pub name: String,
    pub source: TranscriptSource,
    pub strand: Strand,
    pub chromosome: String,
    pub coding: Option<CodingRegion>,
    pub regions: RegionSet,
}

impl Transcript {
    pub fn is_coding(&self) -> bool {
        self.coding.is_some()
    }

    /// Total number of exonic positions.
    pub fn base_count(&self) -> u64 {
        self.regions.base_count()
    }

    /// Bounding interval of all exons: (min start, max end).
    pub fn span(&self) -> Option<(u32, u32)> {
        match (self.regions.first(), self.regions.last()) {
            (Some(first), Some(last)) => Some((first.start, last.end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ccds", TranscriptSource::Ccds)]
    #[case("CCDS", TranscriptSource::Ccds)]
    #[case("ensembl", TranscriptSource::Ensembl)]
    fn test_source_from_str(#[case] text: &str, #[case] expected: TranscriptSource) {
        assert_eq!(text.parse::<TranscriptSource>().unwrap(), expected);
    }

    #[test]
    fn test_source_from_str_rejects_unknown() {
        assert!("refseq".parse::<TranscriptSource>().is_err());
    }

    #[test]
    fn test_sources_are_mutually_alternate() {
        assert_eq!(TranscriptSource::Ccds.alternate(), TranscriptSource::Ensembl);
        assert_eq!(TranscriptSource::Ensembl.alternate(), TranscriptSource::Ccds);
    }

    #[test]
    fn test_span_and_base_count() {
        let transcript = Transcript {
            name: "ENST0001".into(),
            source: TranscriptSource::Ensembl,
            strand: Strand::Plus,
            chromosome: "1".into(),
            coding: None,
            regions: RegionSet::from(vec![
                Region::new("1", 10, 50),
                Region::new("1", 60, 100),
            ]),
        };
        assert_eq!(transcript.span(), Some((10, 100)));
        assert_eq!(transcript.base_count(), 80);
        assert!(!transcript.is_coding());
    }

    #[test]
    fn test_span_of_empty_transcript() {
        let transcript = Transcript {
            name: "ENST0002".into(),
            source: TranscriptSource::Ensembl,
            strand: Strand::Minus,
            chromosome: "2".into(),
            coding: None,
            regions: RegionSet::new(),
        };
        assert_eq!(transcript.span(), None);
    }
}
