use super::database::Item;
use super::pruning::PruningStrategies;
use std::collections::HashMap;

/// Symmetric pair table: `get(a, b) == get(b, a)`.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceTable {
    pairs: HashMap<(Item, Item), u64>,
}

impl CooccurrenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: Item, b: Item) -> (Item, Item) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn add(&mut self, a: Item, b: Item, value: u64) {
        *self.pairs.entry(Self::key(a, b)).or_insert(0) += value;
    }

    pub fn get(&self, a: Item, b: Item) -> Option<u64> {
        self.pairs.get(&Self::key(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// EUCS (pair TWU over revised transactions) and ESCS (pair support). Each
/// is only built when its pruning strategy is enabled.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceStructures {
    pub eucs: Option<CooccurrenceTable>,
    pub escs: Option<CooccurrenceTable>,
}

impl CooccurrenceStructures {
    pub fn new(pruning: PruningStrategies) -> Self {
        Self {
            eucs: pruning.eucp.then(CooccurrenceTable::new),
            escs: pruning.escp.then(CooccurrenceTable::new),
        }
    }

    /// Records every pair of a revised transaction.
    pub fn record(&mut self, items: &[Item], transaction_utility: u64) {
        if self.eucs.is_none() && self.escs.is_none() {
            return;
        }
        for (i, &first) in items.iter().enumerate() {
            for &second in &items[i + 1..] {
                if let Some(eucs) = self.eucs.as_mut() {
                    eucs.add(first, second, transaction_utility);
                }
                if let Some(escs) = self.escs.as_mut() {
                    escs.add(first, second, 1);
                }
            }
        }
    }
}
