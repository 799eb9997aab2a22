//! Execution counters for a configured pipeline.
//!
//! `PipelineMetrics` travels through the chain by value alongside the
//! outcome, so each chain value owns the counts that led up to it.

use serde::{Deserialize, Serialize};

/// Aggregated statistics for one pipeline configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    /// Pipes that ran and returned a value.
    pub steps_executed: usize,
    /// Pipes never invoked because the chain had already failed.
    pub steps_skipped: usize,
    /// Same-type pipes that failed and were recovered.
    pub recoveries: usize,
    /// Pipes that failed and turned the chain into a failure.
    pub steps_failed: usize,
    /// Messages that turned the chain or the pipeline into a failure.
    pub failures: Vec<String>,
}

impl PipelineMetrics {
    /// Increment the executed-steps counter.
    pub fn record_step(&mut self) {
        self.steps_executed += 1;
    }

    /// Increment the skipped-steps counter.
    pub fn record_skip(&mut self) {
        self.steps_skipped += 1;
    }

    /// Increment the recoveries counter.
    pub fn record_recovery(&mut self) {
        self.recoveries += 1;
    }

    /// Increment the failed-steps counter.
    pub fn record_failed_step(&mut self) {
        self.steps_failed += 1;
    }

    /// Record a failure message.
    pub fn record_failure(&mut self, error: String) {
        self.failures.push(error);
    }

    /// Check if there were any failures.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Total pipes reached by the chain, whatever happened to them.
    pub fn steps_total(&self) -> usize {
        self.steps_executed + self.steps_skipped + self.recoveries + self.steps_failed
    }
}
