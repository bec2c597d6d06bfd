//! Signal-strength reporting over a CPU trace.
//!
//! The trace is indexed by position: `trace[i]` holds cycle `i + 1`.

use super::TraceSample;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Which cycles contribute to the signal-strength sum.
///
/// The default window samples cycles 20, 60, 100, 140, 180 and 220.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// First sampled cycle.
    pub first: u64,
    /// Distance between sampled cycles.
    pub every: u64,
    /// Last sampled cycle (inclusive).
    pub last: u64,
}

impl SampleWindow {
    pub const fn new(first: u64, every: u64, last: u64) -> Self {
        Self { first, every, last }
    }

    /// The sampled cycle numbers, in order.
    ///
    /// A zero `every` samples only `first`. The iterator is lazy, so a
    /// window reaching far past the trace costs nothing until it is walked.
    pub fn cycles(&self) -> impl Iterator<Item = u64> {
        let Self { first, every, last } = *self;
        let start = (first != 0 && first <= last).then_some(first);
        std::iter::successors(start, move |&cycle| {
            if every == 0 {
                return None;
            }
            cycle.checked_add(every).filter(|&next| next <= last)
        })
    }

    /// The samples at the window's cycles.
    ///
    /// Stops at the first cycle the trace does not reach.
    pub fn samples<'a>(&self, trace: &'a [TraceSample]) -> Result<Vec<&'a TraceSample>, ReportError> {
        self.cycles()
            .map(|cycle| sample_at(trace, cycle))
            .collect()
    }

    /// Sum of signal strengths at the window's cycles.
    pub fn sum(&self, trace: &[TraceSample]) -> Result<i64, ReportError> {
        self.cycles()
            .map(|cycle| sample_at(trace, cycle).map(|s| s.signal_strength))
            .sum()
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(20, 40, 220)
    }
}

/// Sample recorded for a 1-based cycle.
pub fn sample_at(trace: &[TraceSample], cycle: u64) -> Result<&TraceSample, ReportError> {
    cycle
        .checked_sub(1)
        .and_then(|idx| usize::try_from(idx).ok())
        .and_then(|idx| trace.get(idx))
        .ok_or(ReportError::TraceTooShort { cycle, len: trace.len() })
}

/// Sum of signal strengths during cycles 20, 60, 100, 140, 180 and 220.
pub fn signal_strength_sum(trace: &[TraceSample]) -> Result<i64, ReportError> {
    SampleWindow::default().sum(trace)
}

/// Errors that can occur while summarizing a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("trace has no sample for cycle {cycle} (only {len} cycles executed)")]
    TraceTooShort { cycle: u64, len: usize },
}
