//! Aggregation of DNA sequence CSVs into dashboard tables.
//!
//! The core is [`aggregate::aggregate`]: one pass over six-column rows
//! (`sequence, disease, param1, param2, param3, location`) producing the
//! weighted disease distribution, per-location risk averages, parameter
//! averages and per-sequence summaries. [`mock`] holds the hardcoded tables
//! the dashboard shows next to them.

pub mod aggregate;
pub mod bio;
pub mod cli;
pub mod config;
pub mod io;
pub mod mock;
pub mod report;
pub mod utils;
