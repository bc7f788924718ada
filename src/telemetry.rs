//! Run counters and the live progress trace.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::types::Outcome;

/// Per-outcome region counts for one run.
///
/// Every recorded region bumps `total_gene_regions` and exactly one other
/// bucket, so the seven buckets always sum to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounters {
    pub total_gene_regions: u64,
    pub region_too_long: u64,
    pub multiple_genes: u64,
    pub no_introns: u64,
    pub poorly_expressed: u64,
    pub non_canonical: u64,
    pub too_many_isoforms: u64,
    pub kept: u64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one region under its outcome.
    pub fn bump(&mut self, outcome: &Outcome) {
        self.total_gene_regions += 1;
        let bucket = match outcome {
            Outcome::RegionTooLong => &mut self.region_too_long,
            Outcome::MultipleGenes => &mut self.multiple_genes,
            Outcome::NoIntrons => &mut self.no_introns,
            Outcome::PoorlyExpressed => &mut self.poorly_expressed,
            Outcome::NonCanonical => &mut self.non_canonical,
            Outcome::TooManyIsoforms => &mut self.too_many_isoforms,
            Outcome::Kept(_) => &mut self.kept,
        };
        *bucket += 1;
    }

    /// Sum of the seven outcome buckets.
    pub fn bucket_sum(&self) -> u64 {
        self.region_too_long
            + self.multiple_genes
            + self.no_introns
            + self.poorly_expressed
            + self.non_canonical
            + self.too_many_isoforms
            + self.kept
    }

    pub fn rejected(&self) -> u64 {
        self.total_gene_regions - self.kept
    }
}

/// Owns the run counters and writes one marker character per region to
/// the trace stream.
pub struct Telemetry<W: Write> {
    counters: RunCounters,
    trace: W,
}

impl<W: Write> Telemetry<W> {
    pub fn new(trace: W) -> Self {
        Telemetry {
            counters: RunCounters::new(),
            trace,
        }
    }

    /// Count the outcome and emit its marker, flushed immediately.
    pub fn record(&mut self, outcome: &Outcome) -> Result<()> {
        self.counters.bump(outcome);
        write!(self.trace, "{}", outcome.marker()).context("Failed to write progress trace")?;
        self.trace.flush().context("Failed to flush progress trace")?;
        Ok(())
    }

    /// Terminate the trace with a newline.
    pub fn finish(&mut self) -> Result<()> {
        writeln!(self.trace).context("Failed to write progress trace")?;
        self.trace.flush().context("Failed to flush progress trace")?;
        Ok(())
    }

    pub fn summary(&self) -> RunCounters {
        self.counters
    }

    pub fn into_inner(self) -> W {
        self.trace
    }
}
