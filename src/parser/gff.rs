//! GFF3 feature-table reader.
//!
//! Reads the nine-column GFF3 format into an ordered list of features.
//! Comment lines are skipped and reading stops at an embedded `##FASTA`
//! section.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::open_buffered_reader;
use crate::types::{Feature, Strand};

/// Read all features of a GFF3 file (supports .gz), in file order.
pub fn read_gff(path: &Path) -> Result<Vec<Feature>> {
    let reader = open_buffered_reader(path)?;
    read_gff_reader(reader).with_context(|| format!("Invalid GFF3 file {}", path.display()))
}

/// Read GFF3 features from a reader.
pub(crate) fn read_gff_reader<R: BufRead>(reader: R) -> Result<Vec<Feature>> {
    let mut features = Vec::new();

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read GFF3 line")?;

        if line.starts_with("##FASTA") {
            break;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            continue;
        }

        let strand = match fields[6].parse::<Strand>() {
            Ok(s) => s,
            Err(_) => continue, // Skip entries without valid strand
        };

        let beg: i64 = fields[3]
            .parse()
            .context("Failed to parse start coordinate")?;
        let end: i64 = fields[4]
            .parse()
            .context("Failed to parse end coordinate")?;
        let score: f64 = match fields[5] {
            "." => 0.0,
            s => s.parse().context("Failed to parse score")?,
        };

        features.push(Feature {
            source: fields[1].to_string(),
            ftype: fields[2].to_string(),
            beg,
            end,
            score,
            strand,
            attributes: parse_attributes(fields[8]),
        });
    }

    Ok(features)
}

/// Parse a GFF3 attribute column: `key=value;key=value`.
fn parse_attributes(column: &str) -> IndexMap<String, String> {
    column
        .split(';')
        .map(str::trim)
        .filter(|kv| !kv.is_empty())
        .filter_map(|kv| {
            let (key, value) = kv.split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
