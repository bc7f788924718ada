//! Pipeline driver.
//!
//! Pulls regions from a source one at a time, classifies each, records the
//! outcome and writes accepted regions. Strictly sequential: a region is
//! fully handled before the next one is read.

use anyhow::Result;
use log::{debug, info};
use std::io::Write;

use crate::config::Config;
use crate::filter::classify;
use crate::isoform::IsoformCounter;
use crate::output::{write_summary, AcceptedWriter};
use crate::parser::RegionSource;
use crate::telemetry::{RunCounters, Telemetry};
use crate::types::{AcceptedRecord, GeneRegion, Outcome};

/// Decides, before each region is read, whether the run should end early.
pub trait StopPolicy {
    fn should_stop(&self, counters: &RunCounters) -> bool;
}

/// Never stops early.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunToCompletion;

impl StopPolicy for RunToCompletion {
    fn should_stop(&self, _counters: &RunCounters) -> bool {
        false
    }
}

/// Stops once `kept` has reached the cap.
#[derive(Debug, Clone, Copy)]
pub struct KeptCap(pub u64);

impl StopPolicy for KeptCap {
    fn should_stop(&self, counters: &RunCounters) -> bool {
        counters.kept >= self.0
    }
}

impl<P: StopPolicy + ?Sized> StopPolicy for Box<P> {
    fn should_stop(&self, counters: &RunCounters) -> bool {
        (**self).should_stop(counters)
    }
}

/// The configured filter pipeline.
pub struct Pipeline<'a, C, P> {
    config: &'a Config,
    counter: C,
    stop: P,
}

impl<'a, C: IsoformCounter, P: StopPolicy> Pipeline<'a, C, P> {
    pub fn new(config: &'a Config, counter: C, stop: P) -> Self {
        Pipeline {
            config,
            counter,
            stop,
        }
    }

    /// Classify and record a single region.
    pub fn process<T: Write, A: Write>(
        &self,
        region: &GeneRegion,
        telemetry: &mut Telemetry<T>,
        accepted: &mut AcceptedWriter<A>,
    ) -> Result<Outcome> {
        let outcome = classify(region, self.config, &self.counter)?;
        debug!("{}: {}", region.name, outcome);
        telemetry.record(&outcome)?;
        if let Outcome::Kept(stats) = &outcome {
            accepted.write_accepted(&AcceptedRecord::new(region, stats))?;
        }
        Ok(outcome)
    }

    /// Run every region of `source`, then write the summary to the writer
    /// returned by `open_summary`.
    ///
    /// The summary writer is only opened once the last region is recorded.
    /// Any source or classification error aborts the run; records already
    /// written stay on disk but no summary is produced.
    pub fn run<S, T, A, W, F>(
        &self,
        source: &mut S,
        telemetry: &mut Telemetry<T>,
        accepted: &mut AcceptedWriter<A>,
        open_summary: F,
    ) -> Result<RunCounters>
    where
        S: RegionSource + ?Sized,
        T: Write,
        A: Write,
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        loop {
            if self.stop.should_stop(&telemetry.summary()) {
                info!(
                    "Stopping early after {} kept regions",
                    telemetry.summary().kept
                );
                break;
            }
            let Some(region) = source.next_region()? else {
                break;
            };
            self.process(&region, telemetry, accepted)?;
        }

        telemetry.finish()?;
        let counters = telemetry.summary();
        write_summary(open_summary()?, &counters)?;
        Ok(counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_cap() {
        let cap = KeptCap(2);
        let mut counters = RunCounters::new();
        assert!(!cap.should_stop(&counters));
        counters.kept = 1;
        assert!(!cap.should_stop(&counters));
        counters.kept = 2;
        assert!(cap.should_stop(&counters));
    }

    #[test]
    fn test_run_to_completion() {
        let mut counters = RunCounters::new();
        counters.kept = u64::MAX;
        assert!(!RunToCompletion.should_stop(&counters));
    }

    #[test]
    fn test_boxed_policy() {
        let policy: Box<dyn StopPolicy> = Box::new(KeptCap(0));
        assert!(policy.should_stop(&RunCounters::new()));
    }
}
