//! Execution trace and signal-strength reporting.
//!
//! The CPU records one [`TraceSample`] per executed cycle; the
//! [`report`] functions summarize those samples.

mod sample;
pub mod report;

pub use sample::TraceSample;
pub use report::{signal_strength_sum, ReportError, SampleWindow};
