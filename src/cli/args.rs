use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aq-processor")]
#[command(about = "Filter and aggregate air quality measurements for charts and maps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Input CSV file [default: from settings]")]
    pub input: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

/// Filter selections shared by the data commands. Anything left unset falls
/// back to the session defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "First day to include (YYYY-MM-DD)")]
    pub start: Option<NaiveDate>,

    #[arg(long, help = "Last day to include (YYYY-MM-DD)")]
    pub end: Option<NaiveDate>,

    #[arg(short, long, value_delimiter = ',', help = "Comma-separated locations")]
    pub locations: Vec<String>,

    #[arg(long, conflicts_with = "locations", help = "Do not filter by location")]
    pub all_locations: bool,

    #[arg(short, long, help = "Parameter to analyse [default: pm25 or first available]")]
    pub parameter: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show an overview of the dataset
    Summary,

    /// Print the statistics summary for the selected parameter
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Build the full dashboard report as JSON
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Second parameter for correlation analysis")]
        compare_with: Option<String>,

        #[arg(long, default_value = "timestamp", help = "Trend bucketing: timestamp, day or month")]
        bucket: String,

        #[arg(
            short,
            long,
            help = "Output JSON file path [default: output/aq-report-{parameter}-{YYMMDD}.json]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, conflicts_with = "output_file", help = "Write the report to stdout")]
        stdout: bool,
    },

    /// Classify a value into a severity level
    Classify {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        parameter: String,
    },

    /// List the known parameters and their thresholds
    Parameters,
}
