pub mod config;
pub mod cooccurrence;
pub mod database;
pub mod memory;
pub mod mining;
pub mod output;
pub mod pruning;
pub mod scanner;
pub mod stats;
pub mod storage;
pub mod utility_list;


pub use config::PhmConfig;
pub use cooccurrence::{CooccurrenceStructures, CooccurrenceTable};
pub use database::{Database, Item, Transaction};
pub use mining::PhmMiner;
pub use output::{Phui, PhuiSink, WriterSink};
pub use pruning::PruningStrategies;
pub use scanner::{scan, DatabaseScanner, ItemInfo, ItemTable, UNSET_PERIODICITY};
pub use stats::MiningStats;
pub use storage::PhuiCollection;
pub use utility_list::{Element, UtilityList};
