//! Configuration and defaults for geneselect.
//!
//! This module contains the thresholds that control the six acceptance
//! filters and the parameters handed to the isoform counter.

use crate::isoform::LocusParams;

/// Source label of RNA-seq splice-evidence features.
pub const DEFAULT_SPLICE_SOURCE: &str = "RNASeq_splice";

/// Kept-region cap applied by `--debug`.
pub const DEBUG_KEPT_CAP: u64 = 20;

/// Configuration for the region selection process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum region sequence length in bp (inclusive).
    pub max_seqlen: usize,
    /// Minimum splice-evidence score supporting one of the gene's introns (inclusive).
    pub min_rnaseq: u64,
    /// Minimum intron length used for isoform counting.
    pub min_intron: usize,
    /// Minimum exon length used for isoform counting.
    pub min_exon: usize,
    /// Genomic flank around the gene in bp.
    pub flank: usize,
    /// Isoform count at which a region is rejected; also the enumeration limit.
    pub max_isoforms: u64,
    /// Feature source label identifying splice evidence.
    pub splice_source: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_seqlen: 1200,
            min_rnaseq: 10000,
            min_intron: 35,
            min_exon: 25,
            flank: 99,
            max_isoforms: 10_000_000,
            splice_source: DEFAULT_SPLICE_SOURCE.to_string(),
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the isoform cap in millions (converts to a count internally).
    pub fn set_isoforms_millions(&mut self, millions: f64) {
        if millions > 0.0 {
            self.max_isoforms = (millions * 1_000_000.0) as u64;
        }
    }

    /// Parameters for the isoform counter, limited at `max_isoforms`.
    pub fn locus_params(&self) -> LocusParams {
        LocusParams {
            min_intron: self.min_intron,
            min_exon: self.min_exon,
            flank: self.flank,
            limit: self.max_isoforms,
            count_only: true,
        }
    }
}
