use thiserror::Error;

/// Failures of the filter chain that are not rejections.
#[derive(Error, Debug)]
pub enum SelectError {
    /// The region passed the isolation filter but no gene could be built
    /// from its feature table.
    #[error("region {region} yields no gene to evaluate")]
    NoGene { region: String },
}
