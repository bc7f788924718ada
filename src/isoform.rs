//! Isoform counting for a locus.
//!
//! An isoform is one intron chain built from GT donors and AG acceptors
//! inside the flanked gene span, where every intron and every exon meets a
//! minimum length. The unspliced transcript is one isoform. Counts are
//! bounded: enumeration stops as soon as the limit is reached.

/// Parameters handed to an isoform counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocusParams {
    pub min_intron: usize,
    pub min_exon: usize,
    /// Sequence margin on each side that belongs to no exon.
    pub flank: usize,
    /// Hard bound on the count; counters return at most this value.
    pub limit: u64,
    /// Only a bounded count is wanted, not the isoforms themselves.
    pub count_only: bool,
}

/// Counts the possible isoforms of a locus.
pub trait IsoformCounter {
    /// Number of isoforms for the named locus, never more than `params.limit`.
    fn count(&self, name: &str, sequence: &str, params: &LocusParams) -> u64;
}

/// Counter working directly on the region sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocusCounter;

impl IsoformCounter for LocusCounter {
    fn count(&self, _name: &str, sequence: &str, params: &LocusParams) -> u64 {
        count_isoforms(sequence.as_bytes(), params)
    }
}

// GT..AG is the shortest possible intron.
const MIN_SPLICEABLE: usize = 4;

/// Count intron chains over `seq`, saturating at `params.limit`.
///
/// Runs one pass over the gene span. For each donor the number of chains
/// that can reach it is one (first intron) plus every chain ending at an
/// acceptor at least `min_exon` bp upstream; each acceptor closes the
/// chains of every donor at least one intron length away.
pub fn count_isoforms(seq: &[u8], params: &LocusParams) -> u64 {
    let limit = params.limit;
    let flank = params.flank;
    let emin = params.min_exon;
    if seq.len() <= flank.saturating_mul(2) {
        return 0;
    }
    let lo = flank;
    let hi = seq.len() - 1 - flank;
    let span = params.min_intron.max(MIN_SPLICEABLE);
    let cap = |v: u64| v.min(limit);

    let mut total = cap(1);
    if total >= limit {
        return limit;
    }

    let is_donor = |p: usize| {
        p < hi && p - lo >= emin && seq[p].eq_ignore_ascii_case(&b'G') && seq[p + 1].eq_ignore_ascii_case(&b'T')
    };
    let is_acceptor = |p: usize| {
        p > lo && hi - p >= emin && seq[p - 1].eq_ignore_ascii_case(&b'A') && seq[p].eq_ignore_ascii_case(&b'G')
    };

    // (position, chains) in ascending position order
    let mut donor_chains: Vec<(usize, u64)> = Vec::new();
    let mut acceptor_chains: Vec<(usize, u64)> = Vec::new();
    let mut donors_ready = 0u64;
    let mut acceptors_ready = 0u64;
    let (mut di, mut ai) = (0, 0);

    for p in lo..=hi {
        while di < donor_chains.len() && donor_chains[di].0 + span - 1 <= p {
            donors_ready = cap(donors_ready.saturating_add(donor_chains[di].1));
            di += 1;
        }
        while ai < acceptor_chains.len() && acceptor_chains[ai].0 + emin + 1 <= p {
            acceptors_ready = cap(acceptors_ready.saturating_add(acceptor_chains[ai].1));
            ai += 1;
        }

        if is_acceptor(p) && donors_ready > 0 {
            acceptor_chains.push((p, donors_ready));
            total = cap(total.saturating_add(donors_ready));
            if total >= limit {
                return limit;
            }
        }
        if is_donor(p) {
            donor_chains.push((p, cap(acceptors_ready.saturating_add(1))));
        }
    }

    total
}
