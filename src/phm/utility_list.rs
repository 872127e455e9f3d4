use super::cooccurrence::CooccurrenceStructures;
use super::database::{Database, Item};
use super::scanner::{average_periodicity, ItemInfo, UNSET_PERIODICITY};
use std::collections::HashMap;

/// One supporting transaction of an itemset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub tid: usize,
    /// Utility of the itemset in this transaction.
    pub iutils: u64,
    /// Utility of the items after the itemset in processing order.
    pub rutils: u64,
}

/// Utility-list of an itemset, identified by its last item. Elements are
/// sorted by transaction id.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityList {
    pub item: Item,
    pub elements: Vec<Element>,
    pub sum_iutils: u64,
    pub sum_rutils: u64,
    pub largest_periodicity: usize,
    pub smallest_periodicity: usize,
}

impl UtilityList {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            elements: Vec::new(),
            sum_iutils: 0,
            sum_rutils: 0,
            largest_periodicity: 0,
            smallest_periodicity: UNSET_PERIODICITY,
        }
    }

    /// Single-item list carrying the periodicities found by the scan.
    pub fn from_item_info(item: Item, info: &ItemInfo) -> Self {
        Self {
            elements: Vec::with_capacity(info.support),
            largest_periodicity: info.largest_periodicity,
            smallest_periodicity: info.smallest_periodicity,
            ..Self::new(item)
        }
    }

    pub fn push(&mut self, element: Element) {
        self.sum_iutils += element.iutils;
        self.sum_rutils += element.rutils;
        self.elements.push(element);
    }

    pub fn support(&self) -> usize {
        self.elements.len()
    }

    pub fn utility(&self) -> u64 {
        self.sum_iutils
    }

    /// Bound on the utility of this itemset and all of its extensions.
    pub fn utility_upper_bound(&self) -> u64 {
        self.sum_iutils + self.sum_rutils
    }

    pub fn average_periodicity(&self, database_size: usize) -> f64 {
        average_periodicity(database_size, self.support())
    }

    pub fn find(&self, tid: usize) -> Option<&Element> {
        self.elements
            .binary_search_by_key(&tid, |element| element.tid)
            .ok()
            .map(|idx| &self.elements[idx])
    }

    pub fn heap_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.elements.capacity() * std::mem::size_of::<Element>()
    }
}

/// Thresholds consulted while joining two utility-lists.
#[derive(Debug, Clone, Copy)]
pub struct JoinBounds {
    pub min_utility: u64,
    pub max_periodicity: usize,
    pub support_threshold: f64,
    pub database_size: usize,
    pub la_prune: bool,
}

/// Builds the list of `prefix ∪ {x, y}` from the lists of `prefix ∪ {x}` and
/// `prefix ∪ {y}`. `prefix` is `None` at the first level.
///
/// Returns `None` when the joined itemset never occurs, has a gap longer than
/// `max_periodicity`, has support below gamma, or (with look-ahead pruning)
/// provably cannot reach the utility or support threshold.
pub fn construct(
    prefix: Option<&UtilityList>,
    px: &UtilityList,
    py: &UtilityList,
    bounds: &JoinBounds,
) -> Option<UtilityList> {
    let mut pxy = UtilityList::new(py.item);
    let mut upper_bound = px.utility_upper_bound();
    let mut remaining_support = px.support();
    let mut last_tid = 0;

    for ex in &px.elements {
        let Some(ey) = py.find(ex.tid) else {
            if bounds.la_prune {
                upper_bound -= ex.iutils + ex.rutils;
                if upper_bound < bounds.min_utility {
                    return None;
                }
                remaining_support -= 1;
                if (remaining_support as f64) < bounds.support_threshold {
                    return None;
                }
            }
            continue;
        };

        let iutils = match prefix {
            None => ex.iutils + ey.iutils,
            Some(prefix) => {
                // px and py both extend prefix, so the row is always there.
                let Some(e) = prefix.find(ex.tid) else {
                    continue;
                };
                ex.iutils + ey.iutils - e.iutils
            }
        };

        let periodicity = ex.tid - last_tid;
        if periodicity > bounds.max_periodicity {
            return None;
        }
        pxy.largest_periodicity = pxy.largest_periodicity.max(periodicity);
        if last_tid != 0 {
            pxy.smallest_periodicity = pxy.smallest_periodicity.min(periodicity);
        }
        last_tid = ex.tid;

        pxy.push(Element {
            tid: ex.tid,
            iutils,
            rutils: ey.rutils,
        });
    }

    if pxy.elements.is_empty() {
        return None;
    }

    let periodicity = bounds.database_size - last_tid;
    if periodicity > bounds.max_periodicity {
        return None;
    }
    pxy.largest_periodicity = pxy.largest_periodicity.max(periodicity);

    if (pxy.support() as f64) < bounds.support_threshold {
        return None;
    }
    Some(pxy)
}

/// Second database pass: builds the utility-list of every promising item and
/// fills the co-occurrence structures. `promising` must be in processing
/// order; the returned lists follow the same order.
pub fn build_item_lists(
    database: &Database,
    promising: &[(Item, ItemInfo)],
    structures: &mut CooccurrenceStructures,
) -> Vec<UtilityList> {
    let rank: HashMap<Item, usize> = promising
        .iter()
        .enumerate()
        .map(|(rank, &(item, _))| (item, rank))
        .collect();
    let mut lists: Vec<UtilityList> = promising
        .iter()
        .map(|(item, info)| UtilityList::from_item_info(*item, info))
        .collect();

    let mut revised: Vec<(usize, u64)> = Vec::new();
    let mut revised_items: Vec<Item> = Vec::new();

    for (idx, transaction) in database.iter().enumerate() {
        let tid = idx + 1;

        revised.clear();
        revised.extend(
            transaction
                .items()
                .iter()
                .filter_map(|&(item, utility)| rank.get(&item).map(|&r| (r, utility))),
        );
        if revised.is_empty() {
            continue;
        }
        revised.sort_unstable_by_key(|&(r, _)| r);

        let revised_utility: u64 = revised.iter().map(|&(_, utility)| utility).sum();
        let mut remaining = revised_utility;
        for &(r, utility) in &revised {
            remaining -= utility;
            lists[r].push(Element {
                tid,
                iutils: utility,
                rutils: remaining,
            });
        }

        revised_items.clear();
        revised_items.extend(revised.iter().map(|&(r, _)| promising[r].0));
        structures.record(&revised_items, revised_utility);
    }

    lists
}
