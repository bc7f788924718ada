//! geneselect - Initial gene-region selection library.
//!
//! This library screens a directory of single-gene genomic regions (paired
//! FASTA and GFF3 files) and keeps the ones clean enough to serve as
//! training examples for a splice-site model.
//!
//! # Features
//!
//! - Read paired FASTA/GFF3 region builds (with gzip support)
//! - Build genes, transcripts and introns from the feature table
//! - Apply six ordered, short-circuiting acceptance filters
//! - Count rejections per filter with a live per-region trace
//! - Stream accepted regions to a flushed tab-separated file
//!
//! # Example
//!
//! ```ignore
//! use geneselect::config::Config;
//! use geneselect::isoform::LocusCounter;
//! use geneselect::output::AcceptedWriter;
//! use geneselect::parser::GeneDirReader;
//! use geneselect::pipeline::{Pipeline, RunToCompletion};
//! use geneselect::telemetry::Telemetry;
//! use std::path::Path;
//!
//! let config = Config::default();
//! let mut source = GeneDirReader::new(Path::new("build"))?;
//! let mut telemetry = Telemetry::new(std::io::stderr());
//! let mut accepted = AcceptedWriter::new(std::fs::File::create("initial.genes.txt")?)?;
//!
//! let pipeline = Pipeline::new(&config, LocusCounter, RunToCompletion);
//! let counters = pipeline.run(&mut source, &mut telemetry, &mut accepted, || {
//!     Ok(std::fs::File::create("initial.log.json")?)
//! })?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod isoform;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use error::SelectError;
pub use filter::classify;
pub use isoform::{IsoformCounter, LocusCounter, LocusParams};
pub use parser::{GeneDirReader, RegionSource};
pub use pipeline::{KeptCap, Pipeline, RunToCompletion, StopPolicy};
pub use telemetry::{RunCounters, Telemetry};
pub use types::{AcceptedRecord, Feature, Gene, GeneRegion, GeneStats, Outcome, Transcript};
