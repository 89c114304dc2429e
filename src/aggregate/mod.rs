//! CSV aggregation.
//!
//! Turns the raw six-column sequence CSV into the tables the dashboard
//! charts read. The public entry point, [`aggregate`], never fails: any
//! error collapses to [`ProcessedResult::empty`]. Callers that need to tell
//! "no data" apart from "failed" use [`aggregate_with_status`].

pub mod fold;
pub mod result;
pub mod row;

pub use fold::{analyze_row, AnalyzedRow, PARAMETER_NAMES};
pub use result::ProcessedResult;

use log::{debug, error, info};
use thiserror::Error;

use crate::config::AggregatorConfig;
use crate::io::InputSource;
use crate::utils::{parallel_process, ParallelConfig, ParallelError};
use fold::Accumulators;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: {field} is not a number: '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Parallel error: {0}")]
    Parallel(#[from] ParallelError),
}

/// How an aggregation ended. The published result looks the same for
/// `NoData` and `Failed`; this is the only place the two differ.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateStatus {
    Complete { rows: usize, skipped_rows: usize },
    NoData { skipped_rows: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub result: ProcessedResult,
    pub status: AggregateStatus,
}

/// Fail-soft aggregation: errors are logged and become the empty result.
pub fn aggregate(raw: &str, config: &AggregatorConfig) -> ProcessedResult {
    aggregate_with_status(raw, config).result
}

/// The fallible core. Zero valid rows is not an error and yields the
/// empty result.
pub fn try_aggregate(
    raw: &str,
    config: &AggregatorConfig,
) -> Result<ProcessedResult, AggregateError> {
    run(raw, config).map(|(result, _)| result)
}

pub fn aggregate_with_status(raw: &str, config: &AggregatorConfig) -> Aggregation {
    match run(raw, config) {
        Ok((result, skipped_rows)) if result.metrics.total_samples == 0 => {
            info!("No valid rows found ({} skipped)", skipped_rows);
            Aggregation {
                result,
                status: AggregateStatus::NoData { skipped_rows },
            }
        }
        Ok((result, skipped_rows)) => {
            let rows = result.metrics.total_samples;
            info!("Aggregated {} rows ({} skipped)", rows, skipped_rows);
            Aggregation {
                result,
                status: AggregateStatus::Complete { rows, skipped_rows },
            }
        }
        Err(e) => {
            error!("Error processing CSV data: {}", e);
            Aggregation {
                result: ProcessedResult::empty(),
                status: AggregateStatus::Failed {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Reads the source, then aggregates. A read failure is reported like any
/// other failure: empty result, `Failed` status.
pub fn aggregate_source(source: &InputSource, config: &AggregatorConfig) -> Aggregation {
    match source.read_to_string() {
        Ok(raw) => aggregate_with_status(&raw, config),
        Err(e) => {
            error!("Failed to read {}: {:#}", source, e);
            Aggregation {
                result: ProcessedResult::empty(),
                status: AggregateStatus::Failed {
                    reason: format!("{:#}", e),
                },
            }
        }
    }
}

fn run(raw: &str, config: &AggregatorConfig) -> Result<(ProcessedResult, usize), AggregateError> {
    let parsed = row::parse_rows(raw, config.strict_numbers)?;
    if parsed.rows.is_empty() {
        return Ok((ProcessedResult::empty(), parsed.skipped));
    }

    let reference = config.reference_window.as_str();
    let analyzed: Vec<AnalyzedRow> = if config.threads > 1 {
        let parallel = ParallelConfig {
            threads: config.threads,
            chunk_size: config.chunk_size,
        };
        parallel_process(
            &parsed.rows,
            |row| Ok::<_, AggregateError>(analyze_row(row, reference)),
            &parallel,
        )?
    } else {
        parsed
            .rows
            .iter()
            .map(|row| analyze_row(row, reference))
            .collect()
    };
    debug!("Analyzed {} rows", analyzed.len());

    let result = analyzed
        .into_iter()
        .fold(Accumulators::default(), Accumulators::absorb)
        .finish(config);

    Ok((result, parsed.skipped))
}
