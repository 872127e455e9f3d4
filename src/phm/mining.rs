use super::config::PhmConfig;
use super::cooccurrence::CooccurrenceStructures;
use super::database::{Database, Item};
use super::memory::{estimate_utility_list_size, MemoryTracker};
use super::output::{Phui, PhuiSink, WriterSink};
use super::pruning::{escp_prunes, eucp_prunes, remaining_utility_prunes};
use super::scanner::scan;
use super::stats::{MiningStats, SearchCounters};
use super::storage::PhuiCollection;
use super::utility_list::{build_item_lists, construct, JoinBounds, UtilityList};
use crate::error::Result;
use log::{debug, info, trace};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Periodic high-utility itemset miner. Holds no state between runs, so one
/// miner can serve any number of databases.
#[derive(Debug, Clone, Default)]
pub struct PhmMiner {
    config: PhmConfig,
}

impl PhmMiner {
    pub fn new(config: PhmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhmConfig {
        &self.config
    }

    /// Mines `database`, handing every periodic high-utility itemset to `sink`
    /// as it is found.
    pub fn mine<S: PhuiSink>(&self, database: &Database, mut sink: S) -> Result<MiningStats> {
        self.config.validate()?;
        let start = Instant::now();
        info!(
            "mining {} transactions, min utility {}",
            database.len(),
            self.config.min_utility
        );

        let table = scan(database);
        let database_size = table.database_size();
        let support_threshold = self.config.support_pruning_threshold(database_size);
        let promising = table.promising_items(&self.config, support_threshold);
        debug!(
            "scan done: {} items, {} promising, gamma {:.3}",
            table.len(),
            promising.len(),
            support_threshold
        );

        let memory = MemoryTracker::new(self.config.memory_limit);
        let mut structures = CooccurrenceStructures::new(self.config.pruning);
        let item_lists = build_item_lists(database, &promising, &mut structures);
        let _item_lists_guard = memory.reserve(estimate_utility_list_size(&item_lists))?;

        let search = Search {
            config: &self.config,
            structures: &structures,
            bounds: JoinBounds {
                min_utility: self.config.min_utility,
                max_periodicity: self.config.max_periodicity,
                support_threshold,
                database_size,
                la_prune: self.config.pruning.la_prune,
            },
            database_size,
            memory: &memory,
        };

        let counters = if self.config.parallel {
            search.run_parallel(&item_lists, &mut sink)?
        } else {
            search.run(&item_lists, &mut sink)?
        };
        sink.finish()?;

        let stats = MiningStats {
            phui_count: counters.phui_count,
            candidate_count: counters.candidate_count,
            elapsed: start.elapsed(),
            peak_memory_bytes: memory.peak_usage(),
            database_size,
            promising_items: promising.len(),
        };
        info!("{stats}");
        Ok(stats)
    }

    pub fn mine_to_collection(&self, database: &Database) -> Result<(PhuiCollection, MiningStats)> {
        let mut collection = PhuiCollection::new();
        let stats = self.mine(database, &mut collection)?;
        Ok((collection, stats))
    }

    /// Reads the whole input before creating the output file.
    pub fn mine_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<MiningStats> {
        let database = Database::open(input)?;
        let sink = WriterSink::create(output)?;
        self.mine(&database, sink)
    }
}

struct Search<'a> {
    config: &'a PhmConfig,
    structures: &'a CooccurrenceStructures,
    bounds: JoinBounds,
    database_size: usize,
    memory: &'a MemoryTracker,
}

impl Search<'_> {
    fn prefix_buffer(&self, item_count: usize) -> Vec<Item> {
        Vec::with_capacity(self.config.max_length.min(item_count))
    }

    fn run<S: PhuiSink>(&self, item_lists: &[UtilityList], sink: &mut S) -> Result<SearchCounters> {
        let mut counters = SearchCounters::default();
        let mut prefix = self.prefix_buffer(item_lists.len());
        self.explore(&mut prefix, None, item_lists, sink, &mut counters)?;
        Ok(counters)
    }

    /// Each top-level branch mines into its own buffer; buffers are replayed
    /// into `sink` in branch order, so the output matches `run`.
    fn run_parallel<S: PhuiSink>(&self, item_lists: &[UtilityList], sink: &mut S) -> Result<SearchCounters> {
        let branches: Vec<Result<(PhuiCollection, SearchCounters)>> = (0..item_lists.len())
            .into_par_iter()
            .map(|idx| -> Result<(PhuiCollection, SearchCounters)> {
                let mut collection = PhuiCollection::new();
                let mut counters = SearchCounters::default();
                let mut prefix = self.prefix_buffer(item_lists.len());
                self.explore_branch(&mut prefix, None, item_lists, idx, &mut collection, &mut counters)?;
                Ok((collection, counters))
            })
            .collect();

        let mut counters = SearchCounters::default();
        for branch in branches {
            let (collection, branch_counters) = branch?;
            for phui in collection.iter() {
                sink.accept(&phui)?;
            }
            counters += branch_counters;
        }
        Ok(counters)
    }

    fn explore<S: PhuiSink>(
        &self,
        prefix: &mut Vec<Item>,
        parent: Option<&UtilityList>,
        lists: &[UtilityList],
        sink: &mut S,
        counters: &mut SearchCounters,
    ) -> Result<()> {
        for idx in 0..lists.len() {
            self.explore_branch(prefix, parent, lists, idx, sink, counters)?;
        }
        Ok(())
    }

    /// Handles `prefix ∪ {lists[idx].item}`: reports it if it qualifies, then
    /// joins it with every later sibling and recurses into the survivors.
    /// `prefix` is restored before returning.
    fn explore_branch<S: PhuiSink>(
        &self,
        prefix: &mut Vec<Item>,
        parent: Option<&UtilityList>,
        lists: &[UtilityList],
        idx: usize,
        sink: &mut S,
        counters: &mut SearchCounters,
    ) -> Result<()> {
        let x = &lists[idx];
        let length = prefix.len() + 1;

        prefix.push(x.item);
        let result = self.emit_if_qualified(prefix, x, sink, counters);
        if result.is_err() || length >= self.config.max_length {
            prefix.pop();
            return result;
        }
        if remaining_utility_prunes(x, self.config.min_utility) {
            trace!("prefix {:?} pruned by remaining utility", prefix);
            prefix.pop();
            return Ok(());
        }

        let mut extensions = Vec::new();
        for y in &lists[idx + 1..] {
            if let Some(eucs) = &self.structures.eucs {
                if eucp_prunes(eucs, x.item, y.item, self.config.min_utility) {
                    continue;
                }
            }
            if let Some(escs) = &self.structures.escs {
                if escp_prunes(escs, x.item, y.item, self.bounds.support_threshold) {
                    continue;
                }
            }
            counters.candidate_count += 1;
            if let Some(xy) = construct(parent, x, y, &self.bounds) {
                extensions.push(xy);
            }
        }

        let result = if extensions.is_empty() {
            Ok(())
        } else {
            match self.memory.reserve(estimate_utility_list_size(&extensions)) {
                Ok(_guard) => self.explore(prefix, Some(x), &extensions, sink, counters),
                Err(err) => Err(err),
            }
        };
        prefix.pop();
        result
    }

    fn emit_if_qualified<S: PhuiSink>(
        &self,
        itemset: &[Item],
        list: &UtilityList,
        sink: &mut S,
        counters: &mut SearchCounters,
    ) -> Result<()> {
        if itemset.len() < self.config.effective_min_length() || list.utility() < self.config.min_utility {
            return Ok(());
        }
        let average_periodicity = list.average_periodicity(self.database_size);
        if list.largest_periodicity > self.config.max_periodicity
            || list.smallest_periodicity < self.config.min_periodicity
            || average_periodicity < self.config.min_average_periodicity
            || average_periodicity > self.config.max_average_periodicity
        {
            return Ok(());
        }

        counters.phui_count += 1;
        sink.accept(&Phui {
            items: itemset,
            utility: list.utility(),
            support: list.support(),
            smallest_periodicity: list.smallest_periodicity,
            largest_periodicity: list.largest_periodicity,
            average_periodicity,
        })
    }
}
