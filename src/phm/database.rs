use crate::error::{PhmError, Result};
use log::debug;
use ndarray::ArrayView2;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Item identifier.
pub type Item = u32;

/// One transaction: the items it contains with their utilities, plus the
/// transaction utility used for TWU accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    items: Vec<(Item, u64)>,
    transaction_utility: u64,
}

impl Transaction {
    /// Builds a transaction whose utility is the sum of its item utilities.
    pub fn new(items: Vec<(Item, u64)>) -> Self {
        let items = merge_duplicates(items);
        let transaction_utility = items.iter().map(|&(_, utility)| utility).sum();
        Self {
            items,
            transaction_utility,
        }
    }

    /// Builds a transaction with an explicit transaction utility, as read
    /// from a database file.
    pub fn with_transaction_utility(items: Vec<(Item, u64)>, transaction_utility: u64) -> Self {
        Self {
            items: merge_duplicates(items),
            transaction_utility,
        }
    }

    pub fn items(&self) -> &[(Item, u64)] {
        &self.items
    }

    pub fn transaction_utility(&self) -> u64 {
        self.transaction_utility
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn merge_duplicates(items: Vec<(Item, u64)>) -> Vec<(Item, u64)> {
    let mut positions: HashMap<Item, usize> = HashMap::with_capacity(items.len());
    let mut merged: Vec<(Item, u64)> = Vec::with_capacity(items.len());

    for (item, utility) in items {
        match positions.get(&item) {
            Some(&idx) => merged[idx].1 += utility,
            None => {
                positions.insert(item, merged.len());
                merged.push((item, utility));
            }
        }
    }
    merged
}

/// Blank lines and lines starting with `#`, `%` or `@` carry no transaction.
pub fn is_metadata(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(&['#', '%', '@'][..])
}

/// Parses one line of the `items:TU:utilities` format.
///
/// Returns `Ok(None)` for metadata lines. `line_number` is only used for
/// error reporting.
pub fn parse_transaction(line: &str, line_number: usize) -> Result<Option<Transaction>> {
    if is_metadata(line) {
        return Ok(None);
    }

    let mut fields = line.trim_end().split(':');
    let (items, transaction_utility, utilities) = match (fields.next(), fields.next(), fields.next()) {
        (Some(items), Some(tu), Some(utilities)) => (items, tu, utilities),
        _ => {
            return Err(PhmError::parse(
                line_number,
                "expected `items:transaction utility:item utilities`",
            ))
        }
    };
    if fields.next().is_some() {
        return Err(PhmError::parse(line_number, "too many `:` separated fields"));
    }

    let items = items
        .split_whitespace()
        .map(|token| {
            token
                .parse::<Item>()
                .map_err(|_| PhmError::parse(line_number, format!("invalid item `{token}`")))
        })
        .collect::<Result<Vec<_>>>()?;
    if items.is_empty() {
        return Err(PhmError::parse(line_number, "empty item list"));
    }

    let transaction_utility = transaction_utility.trim().parse::<u64>().map_err(|_| {
        PhmError::parse(
            line_number,
            format!("invalid transaction utility `{}`", transaction_utility.trim()),
        )
    })?;

    let utilities = utilities
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| PhmError::parse(line_number, format!("invalid utility `{token}`")))
        })
        .collect::<Result<Vec<_>>>()?;
    if utilities.len() != items.len() {
        return Err(PhmError::parse(
            line_number,
            format!("{} items but {} utilities", items.len(), utilities.len()),
        ));
    }

    Ok(Some(Transaction::with_transaction_utility(
        items.into_iter().zip(utilities).collect(),
        transaction_utility,
    )))
}

/// The complete transactional database, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    transactions: Vec<Transaction>,
}

impl Database {
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Reads every transaction; the first malformed record aborts the read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut transactions = Vec::new();
        let mut skipped = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_transaction(&line, idx + 1)? {
                Some(transaction) => transactions.push(transaction),
                None => skipped += 1,
            }
        }
        debug!("read {} transactions, skipped {} metadata lines", transactions.len(), skipped);
        Ok(Self { transactions })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Dense input: one row per transaction, one column per item id, the cell
    /// holding the item's utility (0 = absent). Empty rows still count as
    /// transactions.
    pub fn from_utility_matrix(matrix: ArrayView2<u64>) -> Self {
        let transactions = matrix
            .outer_iter()
            .map(|row| {
                Transaction::new(
                    row.iter()
                        .enumerate()
                        .filter(|&(_, &utility)| utility != 0)
                        .map(|(item, &utility)| (item as Item, utility))
                        .collect(),
                )
            })
            .collect();
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl FromIterator<Transaction> for Database {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}
