//! Directory reader pairing `*.fa` sequences with `*.gff3` annotations.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::fasta::read_fasta;
use crate::parser::gff::read_gff;
use crate::parser::RegionSource;
use crate::types::GeneRegion;

/// One sequence file and its same-stem annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPair {
    pub fasta: PathBuf,
    pub gff: PathBuf,
}

/// Streams gene regions from a gene build directory, one per file pair,
/// in sorted path order.
pub struct GeneDirReader {
    pairs: Vec<RegionPair>,
    next: usize,
}

impl GeneDirReader {
    /// Scan `dir` for `*.fa` / `*.fa.gz` files and pair each with its
    /// `*.gff3` / `*.gff3.gz` partner.
    pub fn new(dir: &Path) -> Result<Self> {
        let pairs = find_pairs(dir)?;
        info!("Found {} region pairs in {}", pairs.len(), dir.display());
        Ok(GeneDirReader { pairs, next: 0 })
    }

    pub fn pairs(&self) -> &[RegionPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl RegionSource for GeneDirReader {
    fn next_region(&mut self) -> Result<Option<GeneRegion>> {
        let Some(pair) = self.pairs.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        read_region(pair).map(Some)
    }
}

/// Read one region from its file pair. Genes are assembled later, only
/// for regions that reach the gene-level filters.
pub fn read_region(pair: &RegionPair) -> Result<GeneRegion> {
    debug!("Reading {}", pair.fasta.display());
    let record = read_fasta(&pair.fasta)?;
    let features = read_gff(&pair.gff)?;
    Ok(GeneRegion::from_annotation(record.name, record.seq, features))
}

fn find_pairs(dir: &Path) -> Result<Vec<RegionPair>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        let name = path.to_string_lossy().into_owned();
        let gff = if let Some(stem) = name.strip_suffix(".fa") {
            PathBuf::from(format!("{}.gff3", stem))
        } else if let Some(stem) = name.strip_suffix(".fa.gz") {
            PathBuf::from(format!("{}.gff3.gz", stem))
        } else {
            continue;
        };
        if !gff.exists() {
            bail!("No annotation file {} for {}", gff.display(), path.display());
        }
        pairs.push(RegionPair { fasta: path, gff });
    }

    pairs.sort_by(|a, b| a.fasta.cmp(&b.fasta));
    Ok(pairs)
}
