use std::fmt::{self, Display};

///
/// Region struct, one annotated genomic interval in BED coordinates
/// (zero-based, half-open).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub annotations: Vec<String>,
}

impl Region {
    pub fn new(chr: impl Into<String>, start: u32, end: u32) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(
        chr: impl Into<String>,
        start: u32,
        end: u32,
        annotations: Vec<String>,
    ) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
            annotations,
        }
    }

    ///
    /// Number of positions covered by the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Check if two regions share at least one position (same chromosome,
    /// half-open coordinates).
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chr == other.chr && self.start < other.end && self.end > other.start
    }

    /// Check if `other` starts exactly where this region ends (or vice versa).
    pub fn adjacent_to(&self, other: &Region) -> bool {
        self.chr == other.chr && (self.end == other.start || other.end == self.start)
    }

    ///
    /// BED line representation of the region
    ///
    pub fn as_string(&self) -> String {
        let mut line = format!("{}\t{}\t{}", self.chr, self.start, self.end);
        for annotation in &self.annotations {
            line.push('\t');
            line.push_str(annotation);
        }
        line
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_width() {
        assert_eq!(Region::new("chr1", 100, 250).width(), 150);
    }

    #[test]
    fn test_overlaps_requires_same_chromosome() {
        let a = Region::new("chr1", 100, 200);
        let b = Region::new("chr2", 100, 200);
        assert_eq!(a.overlaps(&b), false);
        assert_eq!(a.overlaps(&Region::new("chr1", 150, 300)), true);
        assert_eq!(a.overlaps(&Region::new("chr1", 200, 300)), false);
    }

    #[test]
    fn test_adjacent() {
        let a = Region::new("chr1", 100, 200);
        assert_eq!(a.adjacent_to(&Region::new("chr1", 200, 300)), true);
        assert_eq!(a.adjacent_to(&Region::new("chr1", 50, 100)), true);
        assert_eq!(a.adjacent_to(&Region::new("chr1", 201, 300)), false);
    }

    #[test]
    fn test_as_string_appends_annotations() {
        let region =
            Region::with_annotations("chr7", 10, 20, vec!["EGFR".into(), "NM_005228".into()]);
        assert_eq!(region.as_string(), "chr7\t10\t20\tEGFR\tNM_005228");
    }
}
