//! SERP Collector: organic search results → filtered, domain-deduplicated
//! site list.
//!
//! This crate is the application shell around [`serp_pipeline`]: it loads
//! the TOML configuration, resolves the data directory and the search
//! API key, reads the keyword list, and dispatches to one of the two
//! pipeline entry points:
//!
//! - **collect** queries the search API for each keyword, persists a
//!   filtered batch per keyword, then aggregates
//! - **process** rebuilds the final outputs from the stored batches
//!   without network access
//!
//! Both write `final_results.json`, `domains_for_intercept.csv` and
//! `stats.json` to `<data_dir>/results/`.

pub mod config;
pub mod credentials;
pub mod error;
pub mod keywords;
pub mod paths;
pub mod runner;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use runner::{Mode, run};
