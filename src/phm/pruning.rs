use super::cooccurrence::CooccurrenceTable;
use super::database::Item;
use super::utility_list::UtilityList;

/// Which optional pruning strategies the search applies. Each one is
/// independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruningStrategies {
    /// Abandon a utility-list join as soon as the extension can no longer
    /// reach the utility or support threshold.
    pub la_prune: bool,
    /// Skip extensions whose pair TWU in the EUCS is below the threshold.
    pub eucp: bool,
    /// Skip extensions whose pair support in the ESCS is below gamma.
    pub escp: bool,
}

impl PruningStrategies {
    pub const fn all() -> Self {
        Self {
            la_prune: true,
            eucp: true,
            escp: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            la_prune: false,
            eucp: false,
            escp: false,
        }
    }
}

impl Default for PruningStrategies {
    fn default() -> Self {
        Self::all()
    }
}

/// A pair that never co-occurs has no entry and is always pruned.
pub fn eucp_prunes(eucs: &CooccurrenceTable, x: Item, y: Item, min_utility: u64) -> bool {
    eucs.get(x, y).map_or(true, |twu| twu < min_utility)
}

pub fn escp_prunes(escs: &CooccurrenceTable, x: Item, y: Item, support_threshold: f64) -> bool {
    escs.get(x, y)
        .map_or(true, |support| (support as f64) < support_threshold)
}

/// No extension of `list` can reach `min_utility` once its utility plus
/// remaining utility falls short of it.
pub fn remaining_utility_prunes(list: &UtilityList, min_utility: u64) -> bool {
    list.utility_upper_bound() < min_utility
}
