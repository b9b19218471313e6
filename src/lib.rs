//! Government service analytics: load complaint, employee, sentiment and
//! department tables, then compute KPIs, rankings, complaint patterns,
//! sentiment summaries and templated insights over filtered subsets.
//!
//! Typical flow: [`store::DataStore::load`], [`filter::filter`], then the
//! functions in [`metrics`] and [`insights::generate_insights`].

pub mod config;
pub mod error;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod store;
pub mod types;
pub mod util;
