//! Region mapping: genes to BED regions, gene-level or exon-level, with
//! coding-region clipping and source fallback.

use std::fmt::{self, Display};
use std::str::FromStr;

use annotars_core::models::{Region, RegionSet, Transcript, TranscriptSource};

use crate::db::AnnotationDb;
use crate::errors::AnnotationError;
use crate::store::{AnnotationStore, GeneId};

/// Granularity of region output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMode {
    /// One region per transcript, spanning min exon start to max exon end.
    Gene,
    /// One region per exon, clipped to the coding region for coding
    /// transcripts.
    Exon,
}

impl FromStr for RegionMode {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(RegionMode::Gene),
            "exon" => Ok(RegionMode::Exon),
            _ => Err(AnnotationError::InvalidMode(s.to_string())),
        }
    }
}

impl Display for RegionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionMode::Gene => write!(f, "gene"),
            RegionMode::Exon => write!(f, "exon"),
        }
    }
}

impl<S: AnnotationStore> AnnotationDb<S> {
    /// Genomic regions of one gene as a sorted BED region list.
    ///
    /// The symbol is resolved first; an unresolvable symbol yields an empty
    /// set plus a diagnostic line in `messages`, never an error, so callers
    /// mapping gene lists can continue past one bad entry. Transcripts are
    /// fetched for the requested `source`; if none exist and `fallback` is
    /// set, the source restriction is dropped.
    ///
    /// Output regions carry the chromosome label prefixed with "chr" and the
    /// approved symbol as annotation ("SYMBOL name" per transcript when
    /// `annotate_transcript_names`). The result is always sorted by
    /// (chromosome, start); overlapping regions are merged only when
    /// transcript names are NOT annotated, so distinct labels stay apart.
    pub fn gene_to_regions(
        &self,
        gene: &str,
        source: TranscriptSource,
        mode: RegionMode,
        fallback: bool,
        annotate_transcript_names: bool,
        mut messages: Option<&mut Vec<String>>,
    ) -> RegionSet {
        let mut output = RegionSet::new();

        let Some(gene_id) = self.gene_to_approved_id(gene) else {
            if let Some(messages) = messages.as_mut() {
                messages.push(format!(
                    "Gene name '{gene}' is no HGNC-approved symbol. Skipping it!"
                ));
            }
            return output;
        };
        let approved = match self.store().gene_symbol(gene_id) {
            Some(symbol) => symbol,
            None => gene.trim().to_uppercase(),
        };

        let mut transcripts = self.store().transcripts_of(gene_id, Some(source), false);
        if transcripts.is_empty() && fallback {
            transcripts = self.store().transcripts_of(gene_id, None, false);
        }
        if transcripts.is_empty() {
            if let Some(messages) = messages.as_mut() {
                messages.push(format!(
                    "No transcripts found for gene '{gene}'. Skipping it!"
                ));
            }
            return output;
        }

        for transcript in &transcripts {
            let annotations = if annotate_transcript_names {
                vec![format!("{approved} {}", transcript.name)]
            } else {
                vec![approved.clone()]
            };
            let chr = format!("chr{}", transcript.chromosome);

            match mode {
                RegionMode::Gene => {
                    if let Some((start, end)) = transcript.span() {
                        output.push(Region::with_annotations(chr, start, end, annotations));
                    }
                }
                RegionMode::Exon => {
                    for exon in &transcript.regions {
                        let (mut start, mut end) = (exon.start, exon.end);
                        if let Some(coding) = transcript.coding {
                            // skip non-coding exons of coding transcripts
                            if end <= coding.start || start >= coding.end {
                                continue;
                            }
                            start = start.max(coding.start);
                            end = end.min(coding.end);
                        }
                        output.push(Region::with_annotations(
                            chr.clone(),
                            start,
                            end,
                            annotations.clone(),
                        ));
                    }
                }
            }
        }

        output.sort();
        if !annotate_transcript_names {
            output.merge();
        }
        output
    }

    /// Pointwise union of [`gene_to_regions`](Self::gene_to_regions) over a
    /// gene set, followed by the same final sort/merge pass.
    pub fn genes_to_regions<I, T>(
        &self,
        genes: I,
        source: TranscriptSource,
        mode: RegionMode,
        fallback: bool,
        annotate_transcript_names: bool,
        mut messages: Option<&mut Vec<String>>,
    ) -> RegionSet
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut output = RegionSet::new();
        for gene in genes {
            let per_gene = self.gene_to_regions(
                gene.as_ref(),
                source,
                mode,
                fallback,
                annotate_transcript_names,
                messages.as_mut().map(|m| &mut **m),
            );
            output.extend(per_gene);
        }
        output.sort();
        if !annotate_transcript_names {
            output.merge();
        }
        output
    }

    /// The coding transcript covering the most exonic bases.
    ///
    /// Fetches coding transcripts of `source` first; if there are none and
    /// `fallback_alt_source` is set, retries with the alternate source; if
    /// still empty and `fallback_alt_source_noncoding` is set, retries the
    /// alternate source without the coding restriction. Ties on covered base
    /// count go to the first transcript encountered (the store's name order);
    /// this tie-break carries no meaning.
    pub fn longest_coding_transcript(
        &self,
        gene_id: GeneId,
        source: TranscriptSource,
        fallback_alt_source: bool,
        fallback_alt_source_noncoding: bool,
    ) -> Option<Transcript> {
        let mut list = self.store().transcripts_of(gene_id, Some(source), true);
        let alt = source.alternate();
        if list.is_empty() && fallback_alt_source {
            list = self.store().transcripts_of(gene_id, Some(alt), true);
        }
        if list.is_empty() && fallback_alt_source_noncoding {
            list = self.store().transcripts_of(gene_id, Some(alt), false);
        }

        let mut best: Option<Transcript> = None;
        for transcript in list {
            let is_better = match &best {
                Some(current) => transcript.base_count() > current.base_count(),
                None => true,
            };
            if is_better {
                best = Some(transcript);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use annotars_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn db() -> AnnotationDb<MemoryStore> {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        store.add_gene(2, "NOTRANS");
        // coding CCDS transcript, exons (10,50) and (60,100), coding 20..90
        store.add_transcript(
            1,
            "CCDS1",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            Some((20, 90)),
            &[(10, 50), (60, 100)],
        );
        // non-coding ENSEMBL transcript on the same gene
        store.add_transcript(
            1,
            "ENST1",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            None,
            &[(5, 45), (200, 300)],
        );
        AnnotationDb::new(store)
    }

    #[rstest]
    fn test_mode_parsing() {
        assert_eq!("gene".parse::<RegionMode>().unwrap(), RegionMode::Gene);
        assert_eq!("exon".parse::<RegionMode>().unwrap(), RegionMode::Exon);
        let err = "intron".parse::<RegionMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid mode 'intron'. Valid modes are: gene, exon."
        );
    }

    #[rstest]
    fn test_exon_mode_clips_to_coding_region(db: AnnotationDb<MemoryStore>) {
        let regions = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ccds,
            RegionMode::Exon,
            false,
            false,
            None,
        );
        let spans: Vec<(&str, u32, u32)> = regions
            .iter()
            .map(|r| (r.chr.as_str(), r.start, r.end))
            .collect();
        assert_eq!(spans, vec![("chr1", 20, 50), ("chr1", 60, 90)]);
        assert_eq!(regions.regions[0].annotations, vec!["FOO"]);
    }

    #[rstest]
    fn test_exon_entirely_outside_coding_region_is_dropped() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        store.add_transcript(
            1,
            "CCDS1",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            Some((100, 500)),
            &[(80, 120), (600, 700)],
        );
        let db = AnnotationDb::new(store);
        let regions = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ccds,
            RegionMode::Exon,
            false,
            false,
            None,
        );
        let spans: Vec<(u32, u32)> = regions.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(spans, vec![(100, 120)]);
    }

    #[rstest]
    fn test_gene_mode_spans_transcript(db: AnnotationDb<MemoryStore>) {
        let regions = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ccds,
            RegionMode::Gene,
            false,
            false,
            None,
        );
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.regions[0], Region::with_annotations("chr1", 10, 100, vec!["FOO".into()]));
    }

    #[rstest]
    fn test_unresolvable_gene_yields_empty_plus_message(db: AnnotationDb<MemoryStore>) {
        let mut messages = Vec::new();
        let regions = db.gene_to_regions(
            "DOESNOTEXIST",
            TranscriptSource::Ccds,
            RegionMode::Gene,
            false,
            false,
            Some(&mut messages),
        );
        assert!(regions.is_empty());
        assert_eq!(
            messages,
            vec!["Gene name 'DOESNOTEXIST' is no HGNC-approved symbol. Skipping it!"]
        );
    }

    #[rstest]
    fn test_no_transcripts_yields_empty_plus_message(db: AnnotationDb<MemoryStore>) {
        let mut messages = Vec::new();
        let regions = db.gene_to_regions(
            "NOTRANS",
            TranscriptSource::Ccds,
            RegionMode::Gene,
            true,
            false,
            Some(&mut messages),
        );
        assert!(regions.is_empty());
        assert_eq!(
            messages,
            vec!["No transcripts found for gene 'NOTRANS'. Skipping it!"]
        );
    }

    #[rstest]
    fn test_source_fallback() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "ONLYENST");
        store.add_transcript(
            1,
            "ENST9",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "3",
            None,
            &[(100, 200)],
        );
        let db = AnnotationDb::new(store);

        let without = db.gene_to_regions(
            "ONLYENST",
            TranscriptSource::Ccds,
            RegionMode::Gene,
            false,
            false,
            None,
        );
        assert!(without.is_empty());

        let with = db.gene_to_regions(
            "ONLYENST",
            TranscriptSource::Ccds,
            RegionMode::Gene,
            true,
            false,
            None,
        );
        assert_eq!(with.len(), 1);
        assert_eq!(with.regions[0], Region::with_annotations("chr3", 100, 200, vec!["ONLYENST".into()]));
    }

    #[rstest]
    fn test_transcript_name_annotation_suppresses_merge() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        store.add_transcript(
            1,
            "ENST_A",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            None,
            &[(100, 250)],
        );
        store.add_transcript(
            1,
            "ENST_B",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            None,
            &[(200, 400)],
        );
        let db = AnnotationDb::new(store);

        // overlapping transcript spans collapse when only the symbol is
        // annotated
        let merged = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ensembl,
            RegionMode::Gene,
            false,
            false,
            None,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.regions[0].annotations, vec!["FOO"]);

        // with per-transcript labels the regions are sorted but kept apart
        let annotated = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ensembl,
            RegionMode::Gene,
            false,
            true,
            None,
        );
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated.regions[0].annotations, vec!["FOO ENST_A"]);
        assert_eq!(annotated.regions[1].annotations, vec!["FOO ENST_B"]);
    }

    #[rstest]
    fn test_idempotence(db: AnnotationDb<MemoryStore>) {
        let first = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ccds,
            RegionMode::Exon,
            false,
            false,
            None,
        );
        let second = db.gene_to_regions(
            "FOO",
            TranscriptSource::Ccds,
            RegionMode::Exon,
            false,
            false,
            None,
        );
        assert_eq!(first, second);
        assert_eq!(first.to_bed_string(), second.to_bed_string());
    }

    #[rstest]
    fn test_genes_to_regions_unions_and_merges() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "LEFT");
        store.add_gene(2, "RIGHT");
        store.add_transcript(
            1,
            "T1",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            None,
            &[(100, 250)],
        );
        store.add_transcript(
            2,
            "T2",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            None,
            &[(200, 400)],
        );
        let db = AnnotationDb::new(store);

        let regions = db.genes_to_regions(
            ["LEFT", "RIGHT"],
            TranscriptSource::Ccds,
            RegionMode::Gene,
            false,
            false,
            None,
        );
        // overlapping spans of the two genes merge into one block carrying
        // both annotations
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.regions[0].start, 100);
        assert_eq!(regions.regions[0].end, 400);
        assert_eq!(regions.regions[0].annotations, vec!["LEFT", "RIGHT"]);
    }

    #[rstest]
    fn test_genes_to_regions_collects_messages() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "GOOD");
        store.add_transcript(
            1,
            "T1",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            None,
            &[(10, 20)],
        );
        let db = AnnotationDb::new(store);

        let mut messages = Vec::new();
        let regions = db.genes_to_regions(
            ["GOOD", "BAD1", "BAD2"],
            TranscriptSource::Ccds,
            RegionMode::Gene,
            false,
            false,
            Some(&mut messages),
        );
        assert_eq!(regions.len(), 1);
        assert_eq!(messages.len(), 2);
    }

    #[rstest]
    fn test_longest_coding_transcript_ladder() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        // two coding ENSEMBL transcripts with different covered base counts
        store.add_transcript(
            1,
            "ENST_SHORT",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            Some((0, 1000)),
            &[(100, 200)],
        );
        store.add_transcript(
            1,
            "ENST_LONG",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            Some((0, 1000)),
            &[(100, 200), (300, 500)],
        );
        // a non-coding CCDS transcript
        store.add_transcript(
            1,
            "CCDS_NC",
            TranscriptSource::Ccds,
            Strand::Plus,
            "1",
            None,
            &[(0, 50)],
        );
        let db = AnnotationDb::new(store);

        // no coding CCDS transcript and no fallback
        assert!(
            db.longest_coding_transcript(GeneId(1), TranscriptSource::Ccds, false, false)
                .is_none()
        );

        // fallback to the alternate source picks the widest coding transcript
        let best = db
            .longest_coding_transcript(GeneId(1), TranscriptSource::Ccds, true, false)
            .unwrap();
        assert_eq!(best.name, "ENST_LONG");

        // requesting ENSEMBL directly agrees
        let direct = db
            .longest_coding_transcript(GeneId(1), TranscriptSource::Ensembl, false, false)
            .unwrap();
        assert_eq!(direct.name, "ENST_LONG");
    }

    #[rstest]
    fn test_longest_coding_transcript_noncoding_fallback() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        store.add_transcript(
            1,
            "ENST_NC",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            None,
            &[(0, 80)],
        );
        let db = AnnotationDb::new(store);

        assert!(
            db.longest_coding_transcript(GeneId(1), TranscriptSource::Ccds, true, false)
                .is_none()
        );
        let best = db
            .longest_coding_transcript(GeneId(1), TranscriptSource::Ccds, true, true)
            .unwrap();
        assert_eq!(best.name, "ENST_NC");
    }

    #[rstest]
    fn test_longest_coding_transcript_tie_goes_to_first() {
        let mut store = MemoryStore::new();
        store.add_gene(1, "FOO");
        // equal covered base counts; store order is by name
        store.add_transcript(
            1,
            "ENST_B",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            Some((0, 1000)),
            &[(100, 200)],
        );
        store.add_transcript(
            1,
            "ENST_A",
            TranscriptSource::Ensembl,
            Strand::Plus,
            "1",
            Some((0, 1000)),
            &[(300, 400)],
        );
        let db = AnnotationDb::new(store);

        let best = db
            .longest_coding_transcript(GeneId(1), TranscriptSource::Ensembl, false, false)
            .unwrap();
        assert_eq!(best.name, "ENST_A");
    }
}
