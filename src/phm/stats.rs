use std::fmt;
use std::ops::AddAssign;
use std::time::Duration;

/// Counters maintained by the search, merged across parallel branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    /// Utility-list joins attempted.
    pub candidate_count: usize,
    /// Itemsets that satisfied every constraint.
    pub phui_count: usize,
}

impl AddAssign for SearchCounters {
    fn add_assign(&mut self, other: Self) {
        self.candidate_count += other.candidate_count;
        self.phui_count += other.phui_count;
    }
}

/// Run statistics. Not part of the result itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningStats {
    pub phui_count: usize,
    pub candidate_count: usize,
    pub elapsed: Duration,
    pub peak_memory_bytes: usize,
    pub database_size: usize,
    pub promising_items: usize,
}

impl fmt::Display for MiningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} PHUIs from {} candidates over {} transactions ({} promising items) in {:.2?}, peak utility-list memory {:.2} MB",
            self.phui_count,
            self.candidate_count,
            self.database_size,
            self.promising_items,
            self.elapsed,
            self.peak_memory_bytes as f64 / (1024.0 * 1024.0)
        )
    }
}
