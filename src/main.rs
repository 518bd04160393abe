use mutation_report::error::Result;
use mutation_report::factory::{JsonReportFactory, MUTATIONS_FILE};
use mutation_report::input;
use mutation_report::listener::MutationResultListener;
use mutation_report::output;
use mutation_report::strategy::{DirectoryResultOutputStrategy, ReportDirNaming, ResultOutputStrategy};
use mutation_report::summary::RunSummary;

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mutation-report",
    version,
    about = "Stream mutation-testing results into a JSON report"
)]
struct Cli {
    /// JSON Lines file of result batches, one per line ("-" or omitted reads stdin)
    input: Option<PathBuf>,
    /// Directory the report is written to
    #[arg(long, env = "MUTATION_REPORT_DIR", default_value = "target/mutation-reports")]
    report_dir: Utf8PathBuf,
    /// Emit full killing/succeeding test lists instead of a single killing test
    #[arg(long, env = "MUTATION_REPORT_FULL_MATRIX")]
    full_matrix: bool,
    /// Write into a timestamped sub-directory of the report dir
    #[arg(long)]
    timestamped: bool,
    /// Exit code only, no output
    #[arg(short, long)]
    quiet: bool,
    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    process::exit(cmd_report(cli));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "mutation_report=debug,warn"
    } else {
        "mutation_report=warn,error"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn cmd_report(cli: Cli) -> i32 {
    let reader: Box<dyn BufRead> = match cli.input.as_deref() {
        None => Box::new(std::io::stdin().lock()),
        Some(p) if p.as_os_str() == "-" => Box::new(std::io::stdin().lock()),
        Some(p) => match std::fs::File::open(p) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                output::print_error(&format!("Failed to open {}: {}", p.display(), e));
                return 2;
            }
        },
    };

    let naming = if cli.timestamped {
        ReportDirNaming::Dated
    } else {
        ReportDirNaming::Undated
    };
    let strategy = DirectoryResultOutputStrategy::new(cli.report_dir, naming);
    let report_path = strategy.path_for(MUTATIONS_FILE);

    match write_report(reader, &strategy, cli.full_matrix) {
        Ok(summary) => {
            info!(
                batches = summary.batches,
                mutations = summary.total,
                path = %report_path,
                "report written"
            );
            if !cli.quiet {
                output::print_run_summary(&summary, &report_path);
            }
            0
        }
        Err(e) => {
            output::print_error(&e.to_string());
            if e.is_write_failure() { 3 } else { 2 }
        }
    }
}

fn write_report(
    reader: impl BufRead,
    strategy: &dyn ResultOutputStrategy,
    full_matrix: bool,
) -> Result<RunSummary> {
    let mut listener = JsonReportFactory.create_listener(strategy, full_matrix)?;
    let mut summary = RunSummary::default();

    listener.run_start()?;
    for batch in input::read_batches(reader) {
        let batch = batch?;
        listener.handle_mutation_result(&batch)?;
        summary.record_batch(&batch.mutations);
    }
    listener.run_end()?;

    Ok(summary)
}
