use serde::{Serialize, Deserialize};
use std::fmt;

/// One per-cycle observation of the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSample {
    /// The 1-based cycle the sample was taken in.
    pub cycle: u64,
    /// X × cycle at the start of that cycle.
    pub signal_strength: i64,
}

impl TraceSample {
    pub const fn new(cycle: u64, signal_strength: i64) -> Self {
        Self { cycle, signal_strength }
    }
}

impl From<(u64, i64)> for TraceSample {
    fn from((cycle, signal_strength): (u64, i64)) -> Self {
        Self::new(cycle, signal_strength)
    }
}

impl fmt::Display for TraceSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle {:>4}: {}", self.cycle, self.signal_strength)
    }
}
