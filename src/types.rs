//! Core data structures for geneselect.
//!
//! This module contains the region, feature and gene-structure types the
//! filter chain reads, plus the outcome and record types it produces.
//! Coordinates are 1-based and inclusive, as in GFF3.

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::parser::builder::build_genes;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
    /// GFF3 `.` or `?`.
    Unknown,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+', '-', '.' or '?'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            "." | "?" => Ok(Strand::Unknown),
            _ => Err(ParseStrandError),
        }
    }
}

/// One row of a region's feature table.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Source label (column 2), e.g. `RNASeq_splice`.
    pub source: String,
    /// Type tag (column 3), e.g. `gene`, `mRNA`, `exon`, `intron`.
    pub ftype: String,
    pub beg: i64,
    pub end: i64,
    /// Numeric score; `.` in the file is read as 0.
    pub score: f64,
    pub strand: Strand,
    pub attributes: IndexMap<String, String>,
}

impl Feature {
    /// Create a feature without attributes.
    pub fn new(source: &str, ftype: &str, beg: i64, end: i64, score: f64) -> Self {
        Feature {
            source: source.to_string(),
            ftype: ftype.to_string(),
            beg,
            end,
            score,
            strand: Strand::Unknown,
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// The `ID` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("ID").map(|s| s.as_str())
    }

    /// All comma-separated `Parent` values.
    pub fn parents(&self) -> Vec<&str> {
        self.attributes
            .get("Parent")
            .map(|p| p.split(',').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn signature(&self) -> IntronSignature {
        IntronSignature::new(self.beg, self.end)
    }
}

/// The (begin, end) pair identifying an intron irrespective of transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntronSignature {
    pub beg: i64,
    pub end: i64,
}

impl IntronSignature {
    pub fn new(beg: i64, end: i64) -> Self {
        IntronSignature { beg, end }
    }
}

/// An exon within a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    pub beg: i64,
    pub end: i64,
}

impl Exon {
    pub fn new(beg: i64, end: i64) -> Self {
        Exon { beg, end }
    }

    /// Get exon length.
    pub fn length(&self) -> i64 {
        self.end - self.beg + 1
    }
}

/// An intron, derived from the gap between two consecutive exons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intron {
    pub beg: i64,
    pub end: i64,
}

impl Intron {
    pub fn new(beg: i64, end: i64) -> Self {
        Intron { beg, end }
    }

    /// Get intron length.
    pub fn length(&self) -> i64 {
        self.end - self.beg + 1
    }

    pub fn signature(&self) -> IntronSignature {
        IntronSignature::new(self.beg, self.end)
    }
}

/// A reason a transcript is considered non-canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptIssue {
    /// Intron does not start with a GT donor.
    Donor { intron: IntronSignature, site: String },
    /// Intron does not end with an AG acceptor.
    Acceptor { intron: IntronSignature, site: String },
    /// Intron coordinates fall outside the region sequence.
    OutOfBounds { intron: IntronSignature },
}

impl fmt::Display for TranscriptIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptIssue::Donor { intron, site } => {
                write!(f, "non-canonical donor {} at {}-{}", site, intron.beg, intron.end)
            }
            TranscriptIssue::Acceptor { intron, site } => {
                write!(f, "non-canonical acceptor {} at {}-{}", site, intron.beg, intron.end)
            }
            TranscriptIssue::OutOfBounds { intron } => {
                write!(f, "intron {}-{} outside sequence", intron.beg, intron.end)
            }
        }
    }
}

/// A transcript containing exons and the introns between them.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub strand: Strand,
    pub exons: Vec<Exon>,
    pub introns: Vec<Intron>,
    pub issues: Vec<TranscriptIssue>,
}

impl Transcript {
    /// Create a new transcript with the given ID.
    pub fn new(id: String, strand: Strand) -> Self {
        Transcript {
            id,
            strand,
            exons: Vec::new(),
            introns: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Create a transcript directly from its introns.
    pub fn with_introns(id: &str, introns: Vec<Intron>) -> Self {
        Transcript {
            id: id.to_string(),
            strand: Strand::Positive,
            exons: Vec::new(),
            introns,
            issues: Vec::new(),
        }
    }

    /// Add an exon to this transcript.
    pub fn add_exon(&mut self, exon: Exon) {
        self.exons.push(exon);
    }

    /// Sort exons by position and derive the introns from the gaps.
    pub fn build_introns(&mut self) {
        self.exons.sort_by_key(|e| (e.beg, e.end));
        self.introns = self
            .exons
            .windows(2)
            .filter(|w| w[1].beg > w[0].end + 1)
            .map(|w| Intron::new(w[0].end + 1, w[1].beg - 1))
            .collect();
    }

    /// True when the region source flagged non-canonical splicing.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// A gene containing transcripts.
#[derive(Debug, Clone)]
pub struct Gene {
    pub id: String,
    pub strand: Strand,
    pub transcripts: Vec<Transcript>,
}

impl Gene {
    /// Create a new gene with the given ID and strand.
    pub fn new(id: String, strand: Strand) -> Self {
        Gene {
            id,
            strand,
            transcripts: Vec::new(),
        }
    }

    /// Add a transcript to this gene.
    pub fn add_transcript(&mut self, transcript: Transcript) {
        self.transcripts.push(transcript);
    }

    pub fn transcripts(&self) -> &[Transcript] {
        &self.transcripts
    }
}

/// One single-gene genomic region: sequence, feature table and, once
/// asked for, the genes built from it.
#[derive(Debug, Clone)]
pub struct GeneRegion {
    pub name: String,
    pub sequence: String,
    pub features: Vec<Feature>,
    /// `None` until built from the feature table.
    genes: Option<Vec<Gene>>,
}

impl GeneRegion {
    /// Region with its genes already assembled.
    pub fn new(name: String, sequence: String, features: Vec<Feature>, genes: Vec<Gene>) -> Self {
        GeneRegion {
            name,
            sequence,
            features,
            genes: Some(genes),
        }
    }

    /// Region whose genes are built from `features` only when requested.
    pub fn from_annotation(name: String, sequence: String, features: Vec<Feature>) -> Self {
        GeneRegion {
            name,
            sequence,
            features,
            genes: None,
        }
    }

    /// Sequence length in bp.
    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Genes of the region, in file order.
    ///
    /// Assembles transcripts and checks splice sites on every call for a
    /// region read from annotation, so callers should ask once.
    pub fn genes(&self) -> Cow<'_, [Gene]> {
        match &self.genes {
            Some(genes) => Cow::Borrowed(genes.as_slice()),
            None => Cow::Owned(build_genes(&self.features, &self.sequence)),
        }
    }

    /// Number of features typed `gene`.
    pub fn gene_feature_count(&self) -> usize {
        self.features.iter().filter(|f| f.ftype == "gene").count()
    }
}

/// Scalars derived by the filter chain for a region that passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneStats {
    pub max_introns: usize,
    pub max_expression: u64,
    pub isoforms: u64,
}

/// Result of running one region through the filter chain.
///
/// Variants are listed in filter order; the first failing filter wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RegionTooLong,
    MultipleGenes,
    NoIntrons,
    PoorlyExpressed,
    NonCanonical,
    TooManyIsoforms,
    Kept(GeneStats),
}

impl Outcome {
    /// Single-character marker for the progress trace.
    pub fn marker(&self) -> char {
        match self {
            Outcome::RegionTooLong => 'L',
            Outcome::MultipleGenes => 'M',
            Outcome::NoIntrons => '0',
            Outcome::PoorlyExpressed => 'P',
            Outcome::NonCanonical => 'W',
            Outcome::TooManyIsoforms => 'N',
            Outcome::Kept(_) => 'K',
        }
    }

    /// Counter key used in the summary document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::RegionTooLong => "region_too_long",
            Outcome::MultipleGenes => "multiple_genes",
            Outcome::NoIntrons => "no_introns",
            Outcome::PoorlyExpressed => "poorly_expressed",
            Outcome::NonCanonical => "non_canonical",
            Outcome::TooManyIsoforms => "too_many_isoforms",
            Outcome::Kept(_) => "kept",
        }
    }

    pub fn is_kept(&self) -> bool {
        matches!(self, Outcome::Kept(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the accepted-records file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRecord {
    pub id: String,
    pub length: usize,
    pub max_introns: usize,
    pub max_expression: u64,
    pub isoforms: u64,
}

impl AcceptedRecord {
    pub fn new(region: &GeneRegion, stats: &GeneStats) -> Self {
        AcceptedRecord {
            id: region.name.clone(),
            length: region.length(),
            max_introns: stats.max_introns,
            max_expression: stats.max_expression,
            isoforms: stats.isoforms,
        }
    }
}
