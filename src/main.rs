//! CLI entry point for geneselect.
//!
//! Screens a gene build directory and writes `initial.genes.txt` (accepted
//! regions) and `initial.log.json` (per-filter counts) to the output
//! directory. A one-character-per-region trace goes to stderr.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, Level};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use geneselect::config::{Config, DEBUG_KEPT_CAP, DEFAULT_SPLICE_SOURCE};
use geneselect::isoform::LocusCounter;
use geneselect::output::{AcceptedWriter, ACCEPTED_FILE, SUMMARY_FILE};
use geneselect::parser::GeneDirReader;
use geneselect::pipeline::{KeptCap, Pipeline, RunToCompletion, StopPolicy};
use geneselect::telemetry::Telemetry;

/// Initial gene selector for small single-gene regions.
///
/// Keeps regions that are short, isolated, spliced, well supported by
/// RNA-seq, canonical and not too combinatorially complex.
#[derive(Parser, Debug)]
#[command(name = "geneselect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to gene build directory (paired .fa/.gff3 files)
    #[arg(value_name = "GENES_DIR")]
    genes: PathBuf,

    /// Maximum sequence length
    #[arg(long = "seqlen", default_value = "1200")]
    seqlen: usize,

    /// Minimum RNAseq value
    #[arg(long = "rnaseq", default_value = "10000")]
    rnaseq: u64,

    /// Minimum intron length
    #[arg(long = "ilen", default_value = "35")]
    ilen: usize,

    /// Minimum exon length
    #[arg(long = "elen", default_value = "25")]
    elen: usize,

    /// Genomic flank length
    #[arg(long = "flank", default_value = "99")]
    flank: usize,

    /// Maximum number of isoforms in millions
    #[arg(long = "isoforms", default_value = "10")]
    isoforms: f64,

    /// Source label of RNA-seq splice features
    #[arg(long = "source", default_value = DEFAULT_SPLICE_SOURCE)]
    source: String,

    /// Directory for the output files
    #[arg(short = 'o', long = "outdir", default_value = ".")]
    outdir: PathBuf,

    /// Stop after 20 kept regions
    #[arg(long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    simple_logger::init_with_level(Level::Info)?;

    let args = Args::parse();

    // Validate inputs
    if !args.genes.is_dir() {
        bail!("Gene build directory not found: {}", args.genes.display());
    }
    if args.isoforms <= 0.0 {
        bail!("The isoform limit must be greater than 0.");
    }
    if !args.outdir.is_dir() {
        bail!("Output directory not found: {}", args.outdir.display());
    }

    // Build configuration
    let mut config = Config::new();
    config.max_seqlen = args.seqlen;
    config.min_rnaseq = args.rnaseq;
    config.min_intron = args.ilen;
    config.min_exon = args.elen;
    config.flank = args.flank;
    config.set_isoforms_millions(args.isoforms);
    config.splice_source = args.source.clone();

    let stop: Box<dyn StopPolicy> = if args.debug {
        Box::new(KeptCap(DEBUG_KEPT_CAP))
    } else {
        Box::new(RunToCompletion)
    };

    info!("Scanning gene build directory: {}", args.genes.display());
    let mut source = GeneDirReader::new(&args.genes)?;

    let accepted_path = args.outdir.join(ACCEPTED_FILE);
    let summary_path = args.outdir.join(SUMMARY_FILE);
    info!("Writing accepted regions to: {}", accepted_path.display());

    let accepted_file = File::create(&accepted_path)
        .with_context(|| format!("Failed to create {}", accepted_path.display()))?;
    let mut accepted = AcceptedWriter::new(BufWriter::new(accepted_file))?;
    let mut telemetry = Telemetry::new(std::io::stderr());

    let pipeline = Pipeline::new(&config, LocusCounter, stop);
    let counters = pipeline.run(&mut source, &mut telemetry, &mut accepted, || {
        let file = File::create(&summary_path)
            .with_context(|| format!("Failed to create {}", summary_path.display()))?;
        Ok(BufWriter::new(file))
    })?;

    info!(
        "Kept {} of {} regions ({} rejected)",
        counters.kept,
        counters.total_gene_regions,
        counters.rejected()
    );
    info!("Summary written to: {}", summary_path.display());
    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
