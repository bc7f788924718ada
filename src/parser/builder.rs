//! Gene building from a region's feature table.
//!
//! Genes come from `gene` features, transcripts from `mRNA`/`transcript`
//! features naming their gene as `Parent`, and exons attach to every
//! transcript listed in their `Parent`. Exons of other transcript kinds
//! (`ncRNA`, `pseudogenic_transcript`, ...) are skipped. Introns are the gaps between the
//! sorted exons. Each intron is checked for a GT donor and an AG acceptor
//! on the transcript's strand; a failing intron marks the transcript.

use indexmap::IndexMap;
use log::debug;

use crate::parser::util::reverse_complement;
use crate::types::{Exon, Feature, Gene, Intron, Strand, Transcript, TranscriptIssue};

const DONOR: &str = "GT";
const ACCEPTOR: &str = "AG";

/// Build the genes of a region, in order of first appearance.
pub fn build_genes(features: &[Feature], sequence: &str) -> Vec<Gene> {
    let mut genes: IndexMap<String, Gene> = IndexMap::new();
    // transcript_id -> (gene_id, transcript)
    let mut transcripts: IndexMap<String, (String, Transcript)> = IndexMap::new();

    for (idx, f) in features.iter().enumerate() {
        if f.ftype == "gene" {
            let id = f.id().map(str::to_string).unwrap_or_else(|| format!("gene-{}", idx));
            genes
                .entry(id.clone())
                .or_insert_with(|| Gene::new(id, f.strand));
        }
    }

    for (idx, f) in features.iter().enumerate() {
        if f.ftype != "mRNA" && f.ftype != "transcript" {
            continue;
        }
        let tx_id = f.id().map(str::to_string).unwrap_or_else(|| format!("tx-{}", idx));
        let Some(gene_id) = f.parents().first().map(|p| p.to_string()) else {
            debug!("Skipping transcript {} without Parent gene", tx_id);
            continue;
        };
        genes
            .entry(gene_id.clone())
            .or_insert_with(|| Gene::new(gene_id.clone(), f.strand));
        transcripts
            .entry(tx_id.clone())
            .or_insert_with(|| (gene_id, Transcript::new(tx_id, f.strand)));
    }

    for f in features.iter().filter(|f| f.ftype == "exon") {
        for parent in f.parents() {
            match transcripts.get_mut(parent) {
                Some((_, tx)) => tx.add_exon(Exon::new(f.beg, f.end)),
                None => debug!("Skipping exon {}-{} of unmodelled parent {}", f.beg, f.end, parent),
            }
        }
    }

    for (_, (gene_id, mut tx)) in transcripts {
        tx.build_introns();
        tx.issues = check_splice_sites(&tx, sequence);
        if let Some(gene) = genes.get_mut(&gene_id) {
            gene.add_transcript(tx);
        }
    }

    genes.into_values().collect()
}

/// Splice-site problems of a transcript's introns.
pub fn check_splice_sites(tx: &Transcript, sequence: &str) -> Vec<TranscriptIssue> {
    let mut issues = Vec::new();
    for intron in &tx.introns {
        let Some((donor, acceptor)) = intron_sites(intron, tx.strand, sequence) else {
            issues.push(TranscriptIssue::OutOfBounds {
                intron: intron.signature(),
            });
            continue;
        };
        if donor != DONOR {
            issues.push(TranscriptIssue::Donor {
                intron: intron.signature(),
                site: donor,
            });
        }
        if acceptor != ACCEPTOR {
            issues.push(TranscriptIssue::Acceptor {
                intron: intron.signature(),
                site: acceptor,
            });
        }
    }
    issues
}

/// Donor and acceptor dinucleotides of an intron, read on its strand.
fn intron_sites(intron: &Intron, strand: Strand, sequence: &str) -> Option<(String, String)> {
    if intron.beg < 1 || intron.length() < 2 {
        return None;
    }
    let beg = intron.beg as usize;
    let end = intron.end as usize;
    let head = sequence.get(beg - 1..beg + 1)?.to_ascii_uppercase();
    let tail = sequence.get(end - 2..end)?.to_ascii_uppercase();
    match strand {
        Strand::Negative => Some((reverse_complement(&tail), reverse_complement(&head))),
        _ => Some((head, tail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1-based: exon 1-10, intron 11-20 (GT....AG), exon 21-30
    const SEQ: &str = "AAAAAAAAAAGTCCCCCCAGTTTTTTTTTT";

    fn feature(ftype: &str, beg: i64, end: i64, attrs: &[(&str, &str)]) -> Feature {
        let mut f = Feature::new("WormBase", ftype, beg, end, 0.0);
        f.strand = Strand::Positive;
        for (k, v) in attrs {
            f = f.with_attribute(k, v);
        }
        f
    }

    fn single_gene(exons: &[(i64, i64)]) -> Vec<Feature> {
        let mut features = vec![
            feature("gene", 1, 30, &[("ID", "G1")]),
            feature("mRNA", 1, 30, &[("ID", "T1"), ("Parent", "G1")]),
        ];
        for (b, e) in exons {
            features.push(feature("exon", *b, *e, &[("Parent", "T1")]));
        }
        features
    }

    #[test]
    fn test_build_single_gene() {
        let genes = build_genes(&single_gene(&[(21, 30), (1, 10)]), SEQ);
        assert_eq!(genes.len(), 1);
        let tx = &genes[0].transcripts()[0];
        assert_eq!(tx.id, "T1");
        assert_eq!(tx.introns, vec![Intron::new(11, 20)]);
        assert!(!tx.has_issues());
    }

    #[test]
    fn test_non_canonical_acceptor() {
        // intron 11-19 ends in "CA"
        let genes = build_genes(&single_gene(&[(1, 10), (20, 30)]), SEQ);
        let tx = &genes[0].transcripts()[0];
        assert!(tx.has_issues());
        assert!(matches!(tx.issues[0], TranscriptIssue::Acceptor { .. }));
    }

    #[test]
    fn test_minus_strand_sites() {
        // reverse complement of SEQ keeps the intron canonical on the minus strand
        let rc = reverse_complement(SEQ);
        let mut features = single_gene(&[(1, 10), (21, 30)]);
        for f in &mut features {
            f.strand = Strand::Negative;
        }
        let genes = build_genes(&features, &rc);
        assert!(!genes[0].transcripts()[0].has_issues());
        assert_eq!(genes[0].strand, Strand::Negative);
    }

    #[test]
    fn test_intron_outside_sequence() {
        let genes = build_genes(&single_gene(&[(1, 10), (40, 50)]), SEQ);
        let tx = &genes[0].transcripts()[0];
        assert!(matches!(tx.issues[0], TranscriptIssue::OutOfBounds { .. }));
    }

    #[test]
    fn test_implied_gene_and_shared_exons() {
        let features = vec![
            feature("mRNA", 1, 30, &[("ID", "T1"), ("Parent", "G9")]),
            feature("mRNA", 1, 30, &[("ID", "T2"), ("Parent", "G9")]),
            feature("exon", 1, 10, &[("Parent", "T1,T2")]),
            feature("exon", 21, 30, &[("Parent", "T1")]),
        ];
        let genes = build_genes(&features, SEQ);
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].id, "G9");
        assert_eq!(genes[0].transcripts()[0].introns.len(), 1);
        assert_eq!(genes[0].transcripts()[1].introns.len(), 0);
    }

    #[test]
    fn test_no_genes() {
        let features = vec![feature("intron", 11, 20, &[])];
        assert!(build_genes(&features, SEQ).is_empty());
    }

    #[test]
    fn test_ncrna_exons_skipped() {
        let mut features = single_gene(&[(1, 10), (21, 30)]);
        features.push(feature("ncRNA", 1, 30, &[("ID", "N1"), ("Parent", "G1")]));
        features.push(feature("exon", 1, 5, &[("Parent", "N1")]));
        features.push(feature("exon", 25, 30, &[("Parent", "N1")]));

        let genes = build_genes(&features, SEQ);
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].transcripts().len(), 1);
        assert_eq!(genes[0].transcripts()[0].id, "T1");
    }

    #[test]
    fn test_orphan_exon_and_parentless_transcript_skipped() {
        let features = vec![
            feature("mRNA", 1, 30, &[("ID", "T1")]),
            feature("exon", 1, 10, &[("Parent", "T7")]),
        ];
        assert!(build_genes(&features, SEQ).is_empty());
    }
}
