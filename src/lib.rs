// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod aggregate;
pub mod data;
pub mod loader;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod tsv;

#[cfg(feature = "cli")]
pub mod cli;

pub use aggregate::{aggregate, DrugSummary, Score};
pub use data::{DatasetPartition, Origin, Partition, RawRecord, UnifiedDataset};
pub use scrape::{scrape, ScrapeOutcome};
pub use specs::drug_page::ScrapedDrugInfo;
pub use store::{load, merge};
