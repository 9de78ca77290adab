//! Scripted walkthrough of the cache on a capacity-3 instance.
//!
//! Every write is followed by a read of the same key, then the script reads
//! back keys that may or may not have been evicted.

use lru_arena::{CacheMetrics, LruCache, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Capacity used by the walkthrough
pub const DEMO_CAPACITY: usize = 3;

/// One scripted call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Read a key
    Get(&'static str),
    /// Write a key
    Update(&'static str, i32),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Get(key) => write!(f, "get({})", key),
            Step::Update(key, value) => write!(f, "update({}, {})", key, value),
        }
    }
}

/// The scripted calls, in order
pub const SCRIPT: &[Step] = &[
    Step::Get("foo"),
    Step::Update("foo", 69),
    Step::Get("foo"),
    Step::Update("bar", 420),
    Step::Get("bar"),
    Step::Update("baz", 1337),
    Step::Get("baz"),
    Step::Update("ball", 69420),
    Step::Get("ball"),
    Step::Get("foo"),
    Step::Get("bar"),
    Step::Update("foo", 69),
    Step::Get("bar"),
    Step::Get("foo"),
    Step::Get("baz"),
];

/// What a single step produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Result of a read
    Read(Option<i32>),
    /// Entry evicted by a write, if any
    Wrote(Option<(&'static str, i32)>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Read(Some(value)) => write!(f, "Some({})", value),
            Outcome::Read(None) => write!(f, "None"),
            Outcome::Wrote(Some((key, value))) => write!(f, "evicted {} = {}", key, value),
            Outcome::Wrote(None) => write!(f, "-"),
        }
    }
}

/// Everything the walkthrough observed
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Each step with its outcome
    pub steps: Vec<(Step, Outcome)>,
    /// Final contents from most to least recently used
    pub contents: Vec<(&'static str, i32)>,
    /// Cache counters after the last step
    pub metrics: BTreeMap<String, f64>,
}

impl DemoReport {
    /// Values returned by the reads, in order
    pub fn reads(&self) -> Vec<Option<i32>> {
        self.steps
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                Outcome::Read(value) => Some(*value),
                Outcome::Wrote(_) => None,
            })
            .collect()
    }
}

/// Run the script against a fresh cache
pub fn run() -> Result<DemoReport> {
    let mut cache: LruCache<&'static str, i32> = LruCache::try_new(DEMO_CAPACITY)?;

    let steps = SCRIPT
        .iter()
        .map(|&step| {
            let outcome = match step {
                Step::Get(key) => Outcome::Read(cache.get(&key).copied()),
                Step::Update(key, value) => Outcome::Wrote(cache.update(key, value)),
            };
            (step, outcome)
        })
        .collect();

    Ok(DemoReport {
        steps,
        contents: cache.iter().map(|(k, v)| (*k, *v)).collect(),
        metrics: cache.metrics(),
    })
}

/// Print a report the way the CLI shows it
pub fn print_report(report: &DemoReport) {
    println!("LRU walkthrough (capacity {})", DEMO_CAPACITY);
    println!("==============================");
    for (step, outcome) in &report.steps {
        println!("{:<22} {}", step.to_string(), outcome);
    }

    println!("\nFinal contents (most to least recently used):");
    for (key, value) in &report.contents {
        println!("  {} = {}", key, value);
    }

    println!("\nCache metrics:");
    crate::stats::print_metrics(&report.metrics);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_match_lru_order() {
        let report = run().unwrap();
        assert_eq!(
            report.reads(),
            [
                None,
                Some(69),
                Some(420),
                Some(1337),
                Some(69420),
                None,
                Some(420),
                Some(420),
                Some(69),
                None,
            ]
        );
    }

    #[test]
    fn test_writes_report_their_victims() {
        let report = run().unwrap();
        let evictions: Vec<(&str, i32)> = report
            .steps
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                Outcome::Wrote(Some(victim)) => Some(*victim),
                _ => None,
            })
            .collect();
        // bar was read just before foo came back, so baz goes
        assert_eq!(evictions, [("foo", 69), ("baz", 1337)]);
    }

    #[test]
    fn test_final_state() {
        let report = run().unwrap();
        assert_eq!(report.contents, [("foo", 69), ("bar", 420), ("ball", 69420)]);
        assert_eq!(report.metrics.get("evictions"), Some(&2.0));
        assert_eq!(report.metrics.get("cache_misses"), Some(&3.0));
        assert_eq!(report.metrics.get("cache_hits"), Some(&7.0));
    }

    #[test]
    fn test_step_formatting() {
        assert_eq!(Step::Update("foo", 69).to_string(), "update(foo, 69)");
        assert_eq!(Outcome::Read(None).to_string(), "None");
        assert_eq!(Outcome::Wrote(Some(("baz", 1337))).to_string(), "evicted baz = 1337");
    }
}
