//! Periodic high-utility itemset mining.
//!
//! Finds itemsets whose total utility reaches a threshold and whose
//! occurrences are regular: the gaps between consecutive supporting
//! transactions are bounded, and so is their average. Itemset length can be
//! bounded as well.
//!
//! ```no_run
//! use phui_miner::{PhmConfig, PhmMiner};
//!
//! let config = PhmConfig::new(20)
//!     .with_periodicity(1, 5)
//!     .with_average_periodicity(1.0, 5.0)
//!     .with_length(1, 3);
//! let stats = PhmMiner::new(config).mine_file("db.txt", "phuis.txt")?;
//! println!("{stats}");
//! # Ok::<(), phui_miner::PhmError>(())
//! ```

pub mod error;
pub mod phm;

#[cfg(feature = "python")]
mod python;

pub use error::{PhmError, Result};
pub use phm::{
    Database, Item, MiningStats, PhmConfig, PhmMiner, Phui, PhuiCollection, PhuiSink,
    PruningStrategies, Transaction, WriterSink,
};
