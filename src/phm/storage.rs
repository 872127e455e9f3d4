use super::database::Item;
use super::output::{Phui, PhuiSink};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Measures {
    utility: u64,
    support: usize,
    smallest_periodicity: usize,
    largest_periodicity: usize,
    average_periodicity: f64,
}

/// In-memory sink. Items of all itemsets live in one flat buffer addressed by
/// `(start, len)` offsets.
#[derive(Debug, Clone, Default)]
pub struct PhuiCollection {
    items: Vec<Item>,
    offsets: Vec<(usize, usize)>,
    measures: Vec<Measures>,
}

impl PhuiCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, phui: &Phui<'_>) {
        let start = self.items.len();
        self.items.extend_from_slice(phui.items);
        self.offsets.push((start, phui.items.len()));
        self.measures.push(Measures {
            utility: phui.utility,
            support: phui.support,
            smallest_periodicity: phui.smallest_periodicity,
            largest_periodicity: phui.largest_periodicity,
            average_periodicity: phui.average_periodicity,
        });
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[Item] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn get(&self, idx: usize) -> Option<Phui<'_>> {
        let measures = self.measures.get(idx)?;
        Some(Phui {
            items: self.get_itemset(idx),
            utility: measures.utility,
            support: measures.support,
            smallest_periodicity: measures.smallest_periodicity,
            largest_periodicity: measures.largest_periodicity,
            average_periodicity: measures.average_periodicity,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Phui<'_>> {
        (0..self.len()).filter_map(move |idx| self.get(idx))
    }

    /// Looks an itemset up regardless of item order.
    pub fn find(&self, itemset: &[Item]) -> Option<Phui<'_>> {
        let mut wanted = itemset.to_vec();
        wanted.sort_unstable();
        self.iter().find(|phui| {
            let mut items = phui.items.to_vec();
            items.sort_unstable();
            items == wanted
        })
    }

    pub fn contains(&self, itemset: &[Item]) -> bool {
        self.find(itemset).is_some()
    }

    pub fn utility_of(&self, itemset: &[Item]) -> Option<u64> {
        self.find(itemset).map(|phui| phui.utility)
    }

    /// `(sorted items, utility)` pairs in a canonical order, for comparing
    /// the results of two runs.
    pub fn to_sorted_vec(&self) -> Vec<(Vec<Item>, u64)> {
        let mut result: Vec<(Vec<Item>, u64)> = self
            .iter()
            .map(|phui| {
                let mut items = phui.items.to_vec();
                items.sort_unstable();
                (items, phui.utility)
            })
            .collect();
        result.sort_unstable();
        result
    }
}

impl PhuiSink for PhuiCollection {
    fn accept(&mut self, phui: &Phui<'_>) -> Result<()> {
        self.push(phui);
        Ok(())
    }
}
