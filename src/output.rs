//! Output writing for geneselect results.
//!
//! Accepted regions stream to a tab-separated file that is flushed after
//! every record, so an interrupted run leaves a valid partial file. The run
//! summary is written once, as JSON, after the last region.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

use crate::telemetry::RunCounters;
use crate::types::AcceptedRecord;

/// Leading comment line of the accepted-records file.
pub const ACCEPTED_HEADER: &str = "# id\tlength\tintrons\tRNAseq\tisoforms";

/// Default file names inside the output directory.
pub const ACCEPTED_FILE: &str = "initial.genes.txt";
pub const SUMMARY_FILE: &str = "initial.log.json";

/// Format a single accepted-record line (without newline).
pub fn format_accepted_line(record: &AcceptedRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.id, record.length, record.max_introns, record.max_expression, record.isoforms
    )
}

/// Append-only writer for accepted regions.
pub struct AcceptedWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> AcceptedWriter<W> {
    /// Wrap `writer` and emit the header line.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", ACCEPTED_HEADER).context("Failed to write accepted header")?;
        writer.flush().context("Failed to flush accepted header")?;
        Ok(AcceptedWriter { writer, written: 0 })
    }

    /// Append one record and flush.
    pub fn write_accepted(&mut self, record: &AcceptedRecord) -> Result<()> {
        writeln!(self.writer, "{}", format_accepted_line(record))
            .context("Failed to write accepted record")?;
        self.writer.flush().context("Failed to flush accepted records")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write the final counters as a JSON document with four-space indent.
pub fn write_summary<W: Write>(mut writer: W, counters: &RunCounters) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    counters
        .serialize(&mut ser)
        .context("Failed to serialize run summary")?;
    writeln!(writer).context("Failed to write run summary")?;
    writer.flush().context("Failed to flush run summary")?;
    Ok(())
}
