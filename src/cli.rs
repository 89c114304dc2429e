use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;

use crate::aggregate::{aggregate_source, Aggregation};
use crate::config::AggregatorConfig;
use crate::io::{self, InputSource};
use crate::mock;
use crate::report::generate_report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Csv,
}

/// Options shared by every command that aggregates a CSV.
#[derive(clap::Args, Debug)]
pub struct AggregateArgs {
    /// Input CSV (`-` for stdin, `.gz` files are decompressed)
    #[arg(short, long)]
    pub input: String,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads for per-row statistics
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Fail on non-numeric parameters instead of propagating NaN
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a sequence CSV into dashboard tables
    Aggregate {
        #[command(flatten)]
        args: AggregateArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Aggregate and write every table as a separate CSV file
    Tables {
        #[command(flatten)]
        args: AggregateArgs,

        /// Directory receiving the CSV files
        #[arg(short, long, default_value = "tables")]
        output_dir: PathBuf,
    },

    /// List the mock model catalog
    Models {
        /// Show a single model by id (e.g. `svm`, `hybrid`)
        #[arg(long)]
        id: Option<String>,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate a random mock dataset in the aggregator's input format
    MockDataset {
        #[arg(short, long, default_value_t = 100)]
        samples: usize,

        /// Nucleotides per sequence
        #[arg(short, long, default_value_t = 100)]
        length: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Emit the mock tables shown on the visualization pages as JSON
    Dashboard {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl AggregateArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> Result<AggregatorConfig> {
        let mut config = match &self.config {
            Some(path) => AggregatorConfig::from_file(path)?,
            None => AggregatorConfig::default(),
        };
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.strict {
            config.strict_numbers = true;
        }
        config.validate()?;
        Ok(config)
    }

    fn run(&self) -> Result<Aggregation> {
        let config = self.resolve_config()?;
        info!("Aggregator config: {:?}", config);
        let source = InputSource::from_arg(&self.input);
        Ok(aggregate_source(&source, &config))
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Main entry point for CLI
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Aggregate {
            args,
            output,
            format,
            pretty,
        } => {
            let aggregation = args.run()?;
            let mut writer = io::output_writer(output.as_deref())?;
            match format {
                OutputFormat::Json => io::write_json(&aggregation.result, &mut writer, pretty)?,
                OutputFormat::Csv => io::write_sequences_csv(&aggregation.result, &mut writer)?,
                OutputFormat::Text => {
                    write!(writer, "{}", generate_report(&aggregation))?;
                    writer.flush()?;
                }
            }
            info!("Aggregation status: {:?}", aggregation.status);
        }

        Commands::Tables { args, output_dir } => {
            let aggregation = args.run()?;
            let paths = io::write_tables(&aggregation.result, &output_dir)?;
            for path in paths {
                println!("{}", path.display());
            }
        }

        Commands::Models { id, json } => {
            let catalog = match id {
                Some(id) => vec![mock::lookup_model(&id)
                    .with_context(|| format!("Unknown model id '{}'", id))?],
                None => mock::model_catalog(),
            };
            if json {
                io::write_json(&catalog, std::io::stdout().lock(), true)?;
            } else {
                println!(
                    "{:<14} {:<38} {:>9} {:>10} {:>7}",
                    "ID", "MODEL", "ACCURACY", "PRECISION", "RECALL"
                );
                for entry in catalog {
                    println!(
                        "{:<14} {:<38} {:>9.2} {:>10.2} {:>7.2}",
                        entry.id,
                        entry.name,
                        entry.scores.accuracy,
                        entry.scores.precision,
                        entry.scores.recall
                    );
                }
            }
        }

        Commands::MockDataset {
            samples,
            length,
            seed,
            output,
        } => {
            let rows = mock::mock_rows(&mut seeded_rng(seed), samples, length);
            let writer = io::output_writer(output.as_deref())?;
            io::write_mock_dataset(&rows, writer).context("Failed to write mock dataset")?;
            info!("Generated {} mock rows of length {}", samples, length);
        }

        Commands::Dashboard { seed, output } => {
            let dashboard = mock::dashboard(&mut seeded_rng(seed));
            let writer = io::output_writer(output.as_deref())?;
            io::write_json(&dashboard, writer, true)?;
        }
    }

    Ok(())
}
