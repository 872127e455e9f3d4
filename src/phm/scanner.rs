use super::config::PhmConfig;
use super::database::{Database, Item, Transaction};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Smallest periodicity of an item or itemset seen only once.
pub const UNSET_PERIODICITY: usize = usize::MAX;

/// Per-item statistics gathered by the database scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInfo {
    pub twu: u64,
    pub support: usize,
    /// Includes the gaps to the start and the end of the database.
    pub largest_periodicity: usize,
    /// Only gaps between two occurrences count.
    pub smallest_periodicity: usize,
    pub last_seen_transaction: usize,
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            twu: 0,
            support: 0,
            largest_periodicity: 0,
            smallest_periodicity: UNSET_PERIODICITY,
            last_seen_transaction: 0,
        }
    }
}

impl ItemInfo {
    fn observe(&mut self, tid: usize, transaction_utility: u64) {
        self.twu += transaction_utility;
        self.support += 1;

        let periodicity = tid - self.last_seen_transaction;
        self.largest_periodicity = self.largest_periodicity.max(periodicity);
        if self.support != 1 {
            self.smallest_periodicity = self.smallest_periodicity.min(periodicity);
        }
        self.last_seen_transaction = tid;
    }

    /// Folds in the gap between the last occurrence and the end of the
    /// database. It never counts towards the smallest periodicity.
    fn close_window(&mut self, database_size: usize) {
        let periodicity = database_size - self.last_seen_transaction;
        self.largest_periodicity = self.largest_periodicity.max(periodicity);
    }

    pub fn average_periodicity(&self, database_size: usize) -> f64 {
        average_periodicity(database_size, self.support)
    }
}

pub fn average_periodicity(database_size: usize, support: usize) -> f64 {
    database_size as f64 / (support as f64 + 1.0)
}

/// Single pass over the database. Transactions are numbered from 1 in the
/// order they are observed.
#[derive(Debug, Default)]
pub struct DatabaseScanner {
    items: HashMap<Item, ItemInfo>,
    database_size: usize,
}

impl DatabaseScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, transaction: &Transaction) {
        self.database_size += 1;
        let tid = self.database_size;
        for &(item, _) in transaction.items() {
            self.items
                .entry(item)
                .or_default()
                .observe(tid, transaction.transaction_utility());
        }
    }

    pub fn finish(mut self) -> ItemTable {
        for info in self.items.values_mut() {
            info.close_window(self.database_size);
        }
        ItemTable {
            items: self.items,
            database_size: self.database_size,
        }
    }
}

pub fn scan(database: &Database) -> ItemTable {
    let mut scanner = DatabaseScanner::new();
    for transaction in database.iter() {
        scanner.observe(transaction);
    }
    scanner.finish()
}

/// Item statistics table, read-only once the scan is finished.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    items: HashMap<Item, ItemInfo>,
    database_size: usize,
}

impl ItemTable {
    pub fn get(&self, item: Item) -> Option<&ItemInfo> {
        self.items.get(&item)
    }

    pub fn twu(&self, item: Item) -> u64 {
        self.items.get(&item).map_or(0, |info| info.twu)
    }

    pub fn database_size(&self) -> usize {
        self.database_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, &ItemInfo)> {
        self.items.iter().map(|(&item, info)| (item, info))
    }

    /// Processing order: ascending TWU, ties broken by item id.
    pub fn compare_items(&self, a: Item, b: Item) -> Ordering {
        self.twu(a).cmp(&self.twu(b)).then(a.cmp(&b))
    }

    /// Items that can appear in some periodic high-utility itemset, sorted in
    /// processing order.
    pub fn promising_items(&self, config: &PhmConfig, support_threshold: f64) -> Vec<(Item, ItemInfo)> {
        let mut promising: Vec<(Item, ItemInfo)> = self
            .items
            .iter()
            .filter(|(_, info)| {
                info.twu >= config.min_utility
                    && info.support as f64 >= support_threshold
                    && info.largest_periodicity <= config.max_periodicity
            })
            .map(|(&item, &info)| (item, info))
            .collect();

        promising.sort_unstable_by(|a, b| a.1.twu.cmp(&b.1.twu).then(a.0.cmp(&b.0)));
        promising
    }
}
