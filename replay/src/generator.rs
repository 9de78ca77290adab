// Synthetic trace generator with a hot/cold key split

use crate::error::ReplayError;
use crate::models::Request;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Configuration for trace generation
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Number of requests to write
    pub requests: usize,
    /// Number of distinct keys
    pub unique_keys: usize,
    /// Keys `0..hot_keys` receive `hot_percent` of the traffic
    pub hot_keys: usize,
    /// Percentage of requests that target the hot keys (0-100)
    pub hot_percent: u8,
    /// Seed for the random generator, so a trace can be reproduced
    pub seed: u64,
    /// Output file
    pub output: PathBuf,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            unique_keys: 10_000,
            hot_keys: 2_000,
            hot_percent: 80,
            seed: 42,
            output: PathBuf::from("trace.csv"),
        }
    }
}

impl TraceConfig {
    fn validate(&self) -> Result<(), ReplayError> {
        if self.unique_keys == 0 {
            return Err(ReplayError::InvalidArgument(
                "--keys must be at least 1".to_string(),
            ));
        }
        if self.hot_keys > self.unique_keys {
            return Err(ReplayError::InvalidArgument(format!(
                "--hot-keys ({}) cannot exceed --keys ({})",
                self.hot_keys, self.unique_keys
            )));
        }
        if self.hot_percent > 100 {
            return Err(ReplayError::InvalidArgument(format!(
                "--hot-percent must be between 0 and 100, got {}",
                self.hot_percent
            )));
        }
        Ok(())
    }
}

/// Formats the key with the given index
pub fn key_name(index: usize) -> String {
    format!("key_{:06}", index)
}

/// Writes synthetic traces
#[derive(Debug)]
pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Write the trace to the configured output file, returning the row count
    pub fn generate(&self) -> Result<usize, ReplayError> {
        self.config.validate()?;
        let file = File::create(&self.config.output)?;
        let written = self.write_to(BufWriter::new(file))?;
        println!(
            "Wrote {} requests over {} keys to {}",
            written,
            self.config.unique_keys,
            self.config.output.display()
        );
        Ok(written)
    }

    /// Write the trace to any sink
    pub fn write_to<W: Write>(&self, sink: W) -> Result<usize, ReplayError> {
        self.config.validate()?;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut writer = csv::Writer::from_writer(sink);

        let cold_keys = self.config.unique_keys - self.config.hot_keys;
        let hot_probability = f64::from(self.config.hot_percent) / 100.0;

        for _ in 0..self.config.requests {
            let use_hot = self.config.hot_keys > 0
                && (cold_keys == 0 || rng.gen_bool(hot_probability));
            let index = if use_hot {
                rng.gen_range(0..self.config.hot_keys)
            } else {
                self.config.hot_keys + rng.gen_range(0..cold_keys)
            };
            let value = rng.gen_range(0..1_000_000u64);
            writer.serialize(Request::new(key_name(index), value))?;
        }

        writer.flush()?;
        Ok(self.config.requests)
    }
}
