use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use ate_tdr::spec::SpecTable;
use ate_tdr::tdr::{self, RecordSet, TableLayout};
use ate_tdr::{logging, model, render};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "ate-tdr")]
#[command(about = "ATE test data record failure reporter", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Inputs shared by every command.
#[derive(Args)]
struct Inputs {
    /// Test data CSV exported by the test software.
    #[arg(long, env = "TDR_CSV")]
    csv: PathBuf,

    /// Test specification (spec.json).
    #[arg(long, env = "TDR_SPEC")]
    spec: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Args)]
struct LayoutArgs {
    #[arg(long, default_value = tdr::layout::TIMESTAMP_COLUMN)]
    timestamp_column: String,

    #[arg(long, default_value = tdr::layout::SERIAL_COLUMN)]
    serial_column: String,

    #[arg(long, default_value = tdr::layout::RESULT_COLUMN)]
    result_column: String,

    /// chrono format of the timestamp column.
    #[arg(long, default_value = tdr::layout::TIMESTAMP_FORMAT)]
    timestamp_format: String,
}

impl From<LayoutArgs> for TableLayout {
    fn from(args: LayoutArgs) -> Self {
        TableLayout {
            timestamp_column: args.timestamp_column,
            serial_column: args.serial_column,
            result_column: args.result_column,
            timestamp_format: args.timestamp_format,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the failure report of the latest record.
    Report {
        #[command(flatten)]
        inputs: Inputs,

        /// Report every record instead of only the latest.
        #[arg(long)]
        all: bool,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Summarize every record: status and failed tests.
    Records {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(long)]
        json: bool,
    },

    /// Poll the file and print the failure report of each new latest record.
    Watch {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many polls (runs forever if unset).
        #[arg(long)]
        max_polls: Option<u64>,
    },
}

fn open(inputs: Inputs) -> Result<RecordSet<SpecTable>> {
    // 1) Parse + validate spec.json.
    let spec = SpecTable::load(&inputs.spec)?;

    // 2) Load the test data table.
    let set = RecordSet::load_with_layout(&inputs.csv, spec, inputs.layout.into())?;
    tracing::debug!(records = set.len(), csv = %set.path().display(), "opened test data");
    Ok(set)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Report { inputs, all, out } => {
            let mut set = open(inputs)?;

            let report = if all {
                let mut report = String::new();
                for record in set.records() {
                    report.push_str(&record.build_failure_report(set.spec())?);
                }
                report
            } else {
                let record = set.latest_record()?;
                record.build_failure_report(set.spec())?
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, &report)
                        .with_context(|| format!("write report {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", report),
            }
        }

        Commands::Records { inputs, json } => {
            let set = open(inputs)?;
            let data = model::build_summary(&set.records(), set.spec())?;
            if json {
                println!("{}", render::render_summary_json(&data)?);
            } else {
                print!("{}", render::render_summary_text(&data));
            }
        }

        Commands::Watch {
            inputs,
            interval_ms,
            max_polls,
        } => {
            let mut set = open(inputs)?;
            tdr::watch::run(
                &mut set,
                Duration::from_millis(interval_ms),
                max_polls,
                |report| print!("{}", report),
            )?;
        }
    }

    Ok(())
}
