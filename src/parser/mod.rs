//! Region source: readers for paired FASTA/GFF3 region builds.

pub mod builder;
pub mod dir;
pub mod fasta;
pub mod gff;
pub mod util;

use anyhow::Result;

use crate::types::GeneRegion;

pub use builder::build_genes;
pub use dir::GeneDirReader;
pub use fasta::read_fasta;
pub use gff::read_gff;

/// Supplies gene regions one at a time.
pub trait RegionSource {
    /// Read the next region, or `None` when the source is exhausted.
    fn next_region(&mut self) -> Result<Option<GeneRegion>>;
}

impl RegionSource for std::vec::IntoIter<GeneRegion> {
    fn next_region(&mut self) -> Result<Option<GeneRegion>> {
        Ok(self.next())
    }
}
