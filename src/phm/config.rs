use super::pruning::PruningStrategies;
use crate::error::{PhmError, Result};

/// Run parameters of a mining run.
#[derive(Debug, Clone, PartialEq)]
pub struct PhmConfig {
    pub min_utility: u64,
    pub min_periodicity: usize,
    pub max_periodicity: usize,
    pub min_average_periodicity: f64,
    pub max_average_periodicity: f64,
    /// Smallest itemset length reported. 0 behaves like 1.
    pub min_length: usize,
    pub max_length: usize,
    pub pruning: PruningStrategies,
    /// Mine top-level branches on the rayon pool.
    pub parallel: bool,
    /// Upper bound, in bytes, on live utility-list storage.
    pub memory_limit: Option<usize>,
}

impl Default for PhmConfig {
    fn default() -> Self {
        Self {
            min_utility: 0,
            min_periodicity: 0,
            max_periodicity: usize::MAX,
            min_average_periodicity: 0.0,
            max_average_periodicity: f64::INFINITY,
            min_length: 1,
            max_length: usize::MAX,
            pruning: PruningStrategies::all(),
            parallel: false,
            memory_limit: None,
        }
    }
}

impl PhmConfig {
    pub fn new(min_utility: u64) -> Self {
        Self {
            min_utility,
            ..Self::default()
        }
    }

    pub fn with_periodicity(mut self, min: usize, max: usize) -> Self {
        self.min_periodicity = min;
        self.max_periodicity = max;
        self
    }

    pub fn with_average_periodicity(mut self, min: f64, max: f64) -> Self {
        self.min_average_periodicity = min;
        self.max_average_periodicity = max;
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_pruning(mut self, pruning: PruningStrategies) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = Some(limit_bytes);
        self
    }

    pub(crate) fn effective_min_length(&self) -> usize {
        self.min_length.max(1)
    }

    /// Rejects parameter combinations that cannot describe a search,
    /// including a non-positive maximum average periodicity.
    pub fn validate(&self) -> Result<()> {
        // Also catches NaN.
        if !(self.max_average_periodicity > 0.0) {
            return Err(PhmError::InvalidConfig(format!(
                "maximum average periodicity must be positive, got {}",
                self.max_average_periodicity
            )));
        }
        if self.min_average_periodicity.is_nan()
            || self.min_average_periodicity > self.max_average_periodicity
        {
            return Err(PhmError::InvalidConfig(format!(
                "average periodicity range [{}, {}] is empty",
                self.min_average_periodicity, self.max_average_periodicity
            )));
        }
        if self.min_periodicity > self.max_periodicity {
            return Err(PhmError::InvalidConfig(format!(
                "periodicity range [{}, {}] is empty",
                self.min_periodicity, self.max_periodicity
            )));
        }
        if self.max_length == 0 || self.effective_min_length() > self.max_length {
            return Err(PhmError::InvalidConfig(format!(
                "length range [{}, {}] is empty",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }

    /// Gamma: the smallest support an itemset can have while its average
    /// periodicity `|D| / (support + 1)` stays within the maximum.
    pub fn support_pruning_threshold(&self, database_size: usize) -> f64 {
        database_size as f64 / self.max_average_periodicity - 1.0
    }
}
