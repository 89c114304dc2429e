//! Input/Output operations module.
//!
//! Reads the raw CSV text (file, gzip file or stdin) and writes aggregation
//! results as JSON or as flat CSV tables.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::aggregate::ProcessedResult;
use crate::mock::MockRow;

/// Where the raw CSV text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `-` means stdin, anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Reads the whole source. Paths ending in `.gz` are decompressed.
    pub fn read_to_string(&self) -> Result<String> {
        let mut text = String::new();
        match self {
            InputSource::Stdin => {
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
            }
            InputSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                if is_gzipped(path) {
                    GzDecoder::new(file)
                        .read_to_string(&mut text)
                        .with_context(|| format!("Failed to decompress {}", path.display()))?;
                } else {
                    io::BufReader::new(file)
                        .read_to_string(&mut text)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                }
            }
        }
        info!("Read {} bytes from {}", text.len(), self);
        Ok(text)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => f.write_str("<stdin>"),
        }
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens `path` for writing, or stdout when no path is given.
pub fn output_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Writes any serializable value as JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the per-sequence table. Mutation offsets are `;`-separated.
pub fn write_sequences_csv<W: Write>(result: &ProcessedResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["id", "sequence", "gc_content", "mutation_count", "mutations", "risk_score"])?;

    for seq in &result.sequences {
        writer.write_record([
            seq.id.clone(),
            seq.sequence.clone(),
            seq.gc_content.to_string(),
            seq.mutations.len().to_string(),
            seq.mutations.iter().join(";"),
            seq.risk_score.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_table<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every chart table of `result` as its own CSV file in `dir`.
///
/// Returns the written paths in a fixed order.
pub fn write_tables(result: &ProcessedResult, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let sequences = dir.join("sequences.csv");
    let file = File::create(&sequences)
        .with_context(|| format!("Failed to create {}", sequences.display()))?;
    write_sequences_csv(result, BufWriter::new(file))?;

    let diseases = dir.join("disease_distribution.csv");
    write_table(&result.disease_distribution, &diseases)?;

    let locations = dir.join("location_risk.csv");
    write_table(&result.location_risk, &locations)?;

    let parameters = dir.join("parameter_averages.csv");
    write_table(&result.parameter_averages, &parameters)?;

    let models = dir.join("model_accuracy.csv");
    write_table(&result.model_accuracy, &models)?;

    let series = dir.join("time_series.csv");
    write_table(&result.time_series_data, &series)?;

    let paths = vec![sequences, diseases, locations, parameters, models, series];
    info!("Wrote {} tables to {}", paths.len(), dir.display());
    Ok(paths)
}

/// Writes mock rows with the header the aggregator expects.
pub fn write_mock_dataset<W: Write>(rows: &[MockRow], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record([
        "DNA_Sequence",
        "Disease",
        "Param1",
        "Param2",
        "Param3",
        "Location",
    ])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, aggregate_source, AggregateStatus};
    use crate::config::AggregatorConfig;
    use crate::mock::mock_rows;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
DNA_Sequence,Disease,Param1,Param2,Param3,Location
ATCGATCG,Cancer,1,2,3,Delhi
GCGC,Flu,1,2,3,Mumbai
";

    #[test]
    fn test_from_arg() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("data.csv"),
            InputSource::File(PathBuf::from("data.csv"))
        );
    }

    #[test]
    fn test_read_plain_and_gzip() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("data.csv");
        fs::write(&plain, SAMPLE).unwrap();

        let gz = dir.path().join("data.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(InputSource::File(plain).read_to_string().unwrap(), SAMPLE);
        assert_eq!(InputSource::File(gz.clone()).read_to_string().unwrap(), SAMPLE);

        let aggregation = aggregate_source(&InputSource::File(gz), &AggregatorConfig::default());
        assert_eq!(
            aggregation.status,
            AggregateStatus::Complete {
                rows: 2,
                skipped_rows: 0
            }
        );
    }

    #[test]
    fn test_write_sequences_csv() {
        let result = aggregate(SAMPLE, &AggregatorConfig::default());
        let mut buffer = Vec::new();
        write_sequences_csv(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,sequence,gc_content,mutation_count,mutations,risk_score")
        );
        assert_eq!(lines.next(), Some("SEQ1,ATCGATCG,0.5,3,2;3;4,39.75"));
        assert_eq!(lines.next(), Some("SEQ2,GCGC,1,1,1,50.5"));
    }

    #[test]
    fn test_write_tables_reports_unwritable_dir() {
        let result = aggregate(SAMPLE, &AggregatorConfig::default());
        let dir = tempdir().unwrap();
        // A directory already sits where the sequences table should go.
        let blocked = dir.path().join("out");
        fs::create_dir_all(blocked.join("sequences.csv")).unwrap();
        let err = write_tables(&result, &blocked).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to create"), "{}", message);
        assert!(message.contains("sequences.csv"), "{}", message);
    }

    #[test]
    fn test_write_tables() {
        let result = aggregate(SAMPLE, &AggregatorConfig::default());
        let dir = tempdir().unwrap();
        let paths = write_tables(&result, dir.path()).unwrap();
        assert_eq!(paths.len(), 6);

        let diseases = fs::read_to_string(dir.path().join("disease_distribution.csv")).unwrap();
        assert_eq!(diseases, "disease,count\nCancer,2.5\nFlu,1.0\n");

        let models = fs::read_to_string(dir.path().join("model_accuracy.csv")).unwrap();
        assert_eq!(models, "model,accuracy\nSVM,92.0\nRandom Forest,89.0\n");
    }

    #[test]
    fn test_json_round_trip_keys() {
        let result = aggregate(SAMPLE, &AggregatorConfig::default());
        let mut buffer = Vec::new();
        write_json(&result, &mut buffer, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["metrics"]["totalSamples"], 2);
        assert_eq!(value["locationRisk"][1]["region"], "Mumbai");
        assert_eq!(value["sequences"][0]["mutations"][0], "2");
    }

    #[test]
    fn test_mock_dataset_feeds_aggregator() {
        let rows = mock_rows(&mut StdRng::seed_from_u64(11), 25, 40);
        let mut buffer = Vec::new();
        write_mock_dataset(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("DNA_Sequence,Disease,Param1,Param2,Param3,Location\n"));

        let result = aggregate(&text, &AggregatorConfig::default());
        assert_eq!(result.metrics.total_samples, 25);
        assert_eq!(result.sequences[24].id, "SEQ25");
    }
}
