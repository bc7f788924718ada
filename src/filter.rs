//! The acceptance filter chain.
//!
//! Six checks run in a fixed order and the first failing check decides the
//! outcome. Later checks are not evaluated once one fails:
//!
//! 1. sequence length at most `max_seqlen`
//! 2. at most one `gene` feature in the region
//! 3. at least one transcript with an intron
//! 4. splice evidence of at least `min_rnaseq` on one of the gene's introns
//! 5. no transcript flagged with non-canonical splicing
//! 6. fewer than `max_isoforms` possible isoforms

use ahash::AHashSet;

use crate::config::Config;
use crate::error::SelectError;
use crate::isoform::IsoformCounter;
use crate::types::{Feature, Gene, GeneRegion, GeneStats, IntronSignature, Outcome};

/// Classify one region.
///
/// Returns `Outcome::Kept` with the derived statistics when every filter
/// passes. Fails only when the region passes the isolation filter without
/// any gene having been built from it.
pub fn classify<C: IsoformCounter + ?Sized>(
    region: &GeneRegion,
    config: &Config,
    counter: &C,
) -> Result<Outcome, SelectError> {
    if region.length() > config.max_seqlen {
        return Ok(Outcome::RegionTooLong);
    }

    if region.gene_feature_count() > 1 {
        return Ok(Outcome::MultipleGenes);
    }

    let genes = region.genes();
    let gene = genes.first().ok_or_else(|| SelectError::NoGene {
        region: region.name.clone(),
    })?;

    let max_introns = max_introns(gene);
    if max_introns == 0 {
        return Ok(Outcome::NoIntrons);
    }

    let max_expression = max_expression(&region.features, gene, &config.splice_source);
    if max_expression < config.min_rnaseq {
        return Ok(Outcome::PoorlyExpressed);
    }

    if is_non_canonical(gene) {
        return Ok(Outcome::NonCanonical);
    }

    let isoforms = counter.count(&region.name, &region.sequence, &config.locus_params());
    if isoforms >= config.max_isoforms {
        return Ok(Outcome::TooManyIsoforms);
    }

    Ok(Outcome::Kept(GeneStats {
        max_introns,
        max_expression,
        isoforms,
    }))
}

/// Largest intron count over the gene's transcripts, 0 without transcripts.
pub fn max_introns(gene: &Gene) -> usize {
    gene.transcripts()
        .iter()
        .map(|tx| tx.introns.len())
        .max()
        .unwrap_or(0)
}

/// Unique intron signatures across all transcripts of the gene.
pub fn intron_signatures(gene: &Gene) -> AHashSet<IntronSignature> {
    gene.transcripts()
        .iter()
        .flat_map(|tx| tx.introns.iter().map(|i| i.signature()))
        .collect()
}

/// Highest score among `source` features that coincide with one of the
/// gene's introns, 0 when none match.
pub fn max_expression(features: &[Feature], gene: &Gene, source: &str) -> u64 {
    let introns = intron_signatures(gene);
    let mut max_exp = 0u64;
    for f in features {
        if f.source == source && introns.contains(&f.signature()) && f.score > max_exp as f64 {
            max_exp = f.score as u64;
        }
    }
    max_exp
}

/// True when any transcript carries a splicing issue.
pub fn is_non_canonical(gene: &Gene) -> bool {
    gene.transcripts().iter().any(|tx| tx.has_issues())
}
