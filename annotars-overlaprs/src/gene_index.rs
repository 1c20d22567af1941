//! Genome-wide gene interval indexing for multi-chromosome overlap queries.
//!
//! [`GeneIndex`] partitions labeled gene intervals by chromosome and keeps one
//! [`SortedIndex`] per chromosome, so a query touches only the index of its
//! own chromosome. It is the structure behind "which genes overlap this
//! range" lookups, built once from an annotation snapshot and immutable
//! afterwards.

use fxhash::FxHashMap;

use annotars_core::models::{GeneSet, Interval, RegionSet};

use crate::{Overlapper, SortedIndex};

/// An immutable, chromosome-partitioned index of gene intervals.
///
/// Built from a [`RegionSet`] whose first annotation per region is the gene
/// symbol the interval belongs to (regions without annotations are skipped).
/// Queries match the chromosome label exactly, widen the range by `extend` on
/// both sides (saturating at zero) and return the set of overlapping gene
/// symbols.
///
/// # Examples
///
/// ```
/// use annotars_core::models::{Region, RegionSet};
/// use annotars_overlaprs::GeneIndex;
///
/// let spans = RegionSet::from(vec![
///     Region::with_annotations("2", 500, 1500, vec!["FOO".into()]),
///     Region::with_annotations("2", 1800, 2500, vec!["BAR".into()]),
///     Region::with_annotations("3", 1000, 2000, vec!["BAZ".into()]),
/// ]);
///
/// let index = GeneIndex::build(spans);
/// let genes = index.query("2", 1000, 2000, 0);
/// assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["BAR", "FOO"]);
/// ```
pub struct GeneIndex {
    chroms: FxHashMap<String, SortedIndex<String>>,
}

impl GeneIndex {
    /// Build the index from labeled regions. The input order does not matter;
    /// intervals are sorted per chromosome.
    pub fn build(regions: RegionSet) -> Self {
        let mut by_chrom: FxHashMap<String, Vec<Interval<String>>> = FxHashMap::default();
        let mut skipped = 0usize;

        for region in regions {
            let Some(symbol) = region.annotations.into_iter().next() else {
                skipped += 1;
                continue;
            };
            by_chrom.entry(region.chr).or_default().push(Interval {
                start: region.start,
                end: region.end,
                val: symbol,
            });
        }
        if skipped > 0 {
            log::warn!("gene index build skipped {skipped} regions without a gene label");
        }

        let chroms = by_chrom
            .into_iter()
            .map(|(chr, intervals)| (chr, SortedIndex::build(intervals)))
            .collect();

        GeneIndex { chroms }
    }

    /// All genes whose interval intersects [start-extend, end+extend) on the
    /// given chromosome. Unknown chromosomes yield an empty set.
    pub fn query(&self, chr: &str, start: u32, end: u32, extend: u32) -> GeneSet {
        let Some(index) = self.chroms.get(chr) else {
            return GeneSet::new();
        };
        index
            .find_iter(start.saturating_sub(extend), end.saturating_add(extend))
            .map(|interval| interval.val.clone())
            .collect()
    }

    /// Total number of indexed intervals across all chromosomes.
    pub fn len(&self) -> usize {
        self.chroms.values().map(SortedIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.values().all(SortedIndex::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotars_core::models::Region;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn labeled(chr: &str, start: u32, end: u32, gene: &str) -> Region {
        Region::with_annotations(chr, start, end, vec![gene.to_string()])
    }

    #[fixture]
    fn index() -> GeneIndex {
        GeneIndex::build(RegionSet::from(vec![
            labeled("1", 100, 200, "GENE_A"),
            labeled("1", 150, 300, "GENE_B"),
            labeled("2", 1000, 2000, "GENE_C"),
        ]))
    }

    #[rstest]
    fn test_query_single_chromosome(index: GeneIndex) {
        let genes = index.query("1", 180, 250, 0);
        assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["GENE_A", "GENE_B"]);
    }

    #[rstest]
    fn test_query_is_chromosome_exact(index: GeneIndex) {
        assert!(index.query("chr1", 180, 250, 0).is_empty());
        assert!(index.query("7", 180, 250, 0).is_empty());
    }

    #[rstest]
    fn test_query_half_open(index: GeneIndex) {
        // [200, 210) touches GENE_A's end but does not overlap it
        let genes = index.query("1", 200, 210, 0);
        assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["GENE_B"]);
    }

    #[rstest]
    fn test_extend_widens_both_sides(index: GeneIndex) {
        assert!(index.query("2", 2100, 2200, 0).is_empty());
        let genes = index.query("2", 2100, 2200, 150);
        assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["GENE_C"]);

        assert!(index.query("2", 900, 950, 0).is_empty());
        let genes = index.query("2", 900, 950, 75);
        assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["GENE_C"]);
    }

    #[rstest]
    fn test_extend_saturates_at_zero(index: GeneIndex) {
        // extend larger than start must not underflow
        let genes = index.query("1", 50, 60, 1000);
        assert_eq!(genes.iter().collect::<Vec<_>>(), vec!["GENE_A", "GENE_B"]);
    }

    #[rstest]
    fn test_duplicate_labels_collapse_in_result(index: GeneIndex) {
        // both GENE_A and GENE_B intervals overlap; each symbol appears once
        let genes = index.query("1", 100, 300, 0);
        assert_eq!(genes.len(), 2);
    }

    #[rstest]
    fn test_unlabeled_regions_are_skipped() {
        let index = GeneIndex::build(RegionSet::from(vec![
            Region::new("1", 100, 200),
            labeled("1", 100, 200, "GENE_A"),
        ]));
        assert_eq!(index.len(), 1);
    }
}
