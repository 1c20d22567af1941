use std::fmt::{self, Display};

use crate::models::Region;

///
/// RegionSet struct, an ordered collection of [Region]s, the in-memory
/// equivalent of a BED file.
///
/// Most operations (merging, base counting) expect the set to be sorted by
/// (chromosome, start, end) first; `sort` establishes that order.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionSet {
    pub regions: Vec<Region>,
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet { regions }
    }
}

impl RegionSet {
    pub fn new() -> Self {
        RegionSet::default()
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Append all regions of another set (NOT re-sorted).
    pub fn extend(&mut self, other: RegionSet) {
        self.regions.extend(other.regions);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn first(&self) -> Option<&Region> {
        self.regions.first()
    }

    pub fn last(&self) -> Option<&Region> {
        self.regions.last()
    }

    /// Sort regions by (chromosome, start, end). Chromosome labels compare
    /// lexicographically.
    pub fn sort(&mut self) {
        self.regions
            .sort_by(|a, b| (&a.chr, a.start, a.end).cmp(&(&b.chr, b.start, b.end)));
    }

    pub fn is_sorted(&self) -> bool {
        self.regions
            .windows(2)
            .all(|w| (&w[0].chr, w[0].start, w[0].end) <= (&w[1].chr, w[1].start, w[1].end))
    }

    /// Combine overlapping and book-ended regions on the same chromosome.
    ///
    /// The set must be sorted. Annotations of combined regions are unioned,
    /// keeping first-seen order. After merging, no two regions overlap.
    pub fn merge(&mut self) {
        if self.regions.len() < 2 {
            return;
        }
        debug_assert!(self.is_sorted());

        let mut merged: Vec<Region> = Vec::with_capacity(self.regions.len());
        for region in self.regions.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.chr == region.chr && region.start <= prev.end => {
                    prev.end = prev.end.max(region.end);
                    for annotation in region.annotations {
                        if !prev.annotations.contains(&annotation) {
                            prev.annotations.push(annotation);
                        }
                    }
                }
                _ => merged.push(region),
            }
        }
        self.regions = merged;
    }

    /// Total number of covered positions. Only meaningful on a merged set,
    /// where regions are disjoint.
    pub fn base_count(&self) -> u64 {
        self.regions.iter().map(|r| u64::from(r.width())).sum()
    }

    /// BED text representation, one line per region.
    pub fn to_bed_string(&self) -> String {
        let mut out = String::new();
        for region in &self.regions {
            out.push_str(&region.as_string());
            out.push('\n');
        }
        out
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bed_string())
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl IntoIterator for RegionSet {
    type Item = Region;
    type IntoIter = std::vec::IntoIter<Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        RegionSet {
            regions: iter.into_iter().collect(),
        }
    }
}
