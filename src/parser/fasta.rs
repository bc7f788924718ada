//! FASTA reader for single-sequence region builds.

use anyhow::{bail, Context, Result};
use log::warn;
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::open_buffered_reader;

/// A named sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub seq: String,
}

/// Read the first record of a FASTA file (supports .gz).
///
/// Region builds carry exactly one sequence; extra records are ignored
/// with a warning.
pub fn read_fasta(path: &Path) -> Result<FastaRecord> {
    let reader = open_buffered_reader(path)?;
    read_fasta_reader(reader).with_context(|| format!("Invalid FASTA file {}", path.display()))
}

/// Read the first FASTA record from a reader.
pub(crate) fn read_fasta_reader<R: BufRead>(reader: R) -> Result<FastaRecord> {
    let mut name: Option<String> = None;
    let mut seq = String::new();
    let mut extra_records = 0usize;

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read FASTA line")?;
        let line = line.trim_end();

        if let Some(header) = line.strip_prefix('>') {
            if name.is_some() {
                extra_records += 1;
                continue;
            }
            let id = header.split_whitespace().next().unwrap_or_default();
            name = Some(id.to_string());
            continue;
        }

        if name.is_none() {
            if line.is_empty() {
                continue;
            }
            bail!("sequence data before the first header");
        }
        if extra_records == 0 {
            seq.push_str(&line.to_ascii_uppercase());
        }
    }

    let Some(name) = name else {
        bail!("no FASTA record found");
    };
    if extra_records > 0 {
        warn!("{}: ignoring {} extra FASTA record(s)", name, extra_records);
    }

    Ok(FastaRecord { name, seq })
}
