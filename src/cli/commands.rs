use crate::classifier::{classify, ParameterCategory, PARAMETER_CATALOG};
use crate::cli::args::{Cli, Commands, FilterArgs};
use crate::error::{ProcessingError, Result};
use crate::models::MeasurementTable;
use crate::processors::{build_report, DashboardQuery, TimeBucket};
use crate::readers::MeasurementReader;
use crate::settings::Settings;
use crate::utils::generate_default_report_filename;
use crate::utils::progress::ProgressReporter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    let data_path = cli.input.clone().unwrap_or_else(|| settings.data_path.clone());

    match cli.command {
        Commands::Summary => {
            let table = load_table(&settings, &data_path, false)?;

            println!("Dataset: {}", data_path.display());
            println!("Records: {}", table.len());
            match table.date_bounds() {
                Some((first, last)) => println!("Date Range: {} to {}", first, last),
                None => println!("Date Range: no data"),
            }
            let locations = table.unique_locations();
            println!("Locations ({}): {}", locations.len(), locations.join(", "));
            let parameters = table.unique_parameters();
            println!("Parameters ({}): {}", parameters.len(), parameters.join(", "));
        }

        Commands::Stats { filters } => {
            let table = load_table(&settings, &data_path, false)?;
            let Some(query) = resolve_query(&table, &settings, &filters, None)? else {
                println!("No data available in {}", data_path.display());
                return Ok(());
            };

            let report = build_report(&table, &query)?;
            println!("Parameter: {} ({})", query.parameter, report.description);
            println!("Date Range: {} to {}", query.start, query.end);

            match (&report.stats, &report.severity) {
                (Some(stats), Some(severity)) => {
                    println!("\n{}", stats.summary());
                    println!("Average Level: {} ({})", severity.level, severity.color);
                }
                _ => println!("No data available for the selected filters."),
            }
        }

        Commands::Report {
            filters,
            compare_with,
            bucket,
            output_file,
            stdout,
        } => {
            let bucket = TimeBucket::parse(&bucket).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!("Unknown time bucket: '{}'", bucket))
            })?;

            let table = load_table(&settings, &data_path, stdout)?;
            let Some(mut query) = resolve_query(&table, &settings, &filters, compare_with)? else {
                eprintln!("No data available in {}", data_path.display());
                return Ok(());
            };
            query.bucket = bucket;

            let report = build_report(&table, &query)?;
            if report.is_empty() {
                eprintln!("No data available for the selected filters.");
            }
            let json = serde_json::to_string_pretty(&report)?;

            if stdout {
                println!("{}", json);
            } else {
                let output_file = output_file
                    .unwrap_or_else(|| generate_default_report_filename(&query.parameter));

                // Create output directory if it doesn't exist
                if let Some(parent) = output_file.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output_file, json)?;
                println!("Report written to {}", output_file.display());
            }
        }

        Commands::Classify { value, parameter } => {
            let classification = classify(value, &parameter);
            println!(
                "{} {}: {} ({})",
                parameter, value, classification.level, classification.color
            );
        }

        Commands::Parameters => {
            for spec in PARAMETER_CATALOG.iter() {
                let thresholds = spec
                    .thresholds
                    .iter()
                    .map(|(name, limit)| format!("{}<={}", name, limit))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:<18} {:<22} {:<10} {:<12} {}",
                    spec.id,
                    spec.title,
                    spec.unit,
                    format!("{:?}", ParameterCategory::of(spec.id)),
                    thresholds
                );
            }
        }
    }

    Ok(())
}

/// Each invocation loads once, so the CLI reads the source directly rather
/// than through a `LoadCache`.
fn load_table(settings: &Settings, path: &Path, silent: bool) -> Result<MeasurementTable> {
    let progress = ProgressReporter::new_spinner("Loading measurements...", silent);

    let reader = MeasurementReader::with_delimiter(settings.delimiter_byte()?);

    match reader.load(path) {
        Ok(table) => {
            progress.finish_with_message(&format!("Loaded {} records", table.len()));
            Ok(table)
        }
        Err(e) => {
            progress.abandon();
            Err(e.into())
        }
    }
}

/// Session defaults overridden by whatever the user supplied
fn resolve_query(
    table: &MeasurementTable,
    settings: &Settings,
    filters: &FilterArgs,
    compare_with: Option<String>,
) -> Result<Option<DashboardQuery>> {
    let Some(mut query) = DashboardQuery::defaults_for(
        table,
        &settings.default_parameter,
        settings.default_location_count,
    ) else {
        return Ok(None);
    };

    if let Some(start) = filters.start {
        query.start = start;
    }
    if let Some(end) = filters.end {
        query.end = end;
    }
    if query.start > query.end {
        return Err(ProcessingError::InvalidRange {
            start: crate::utils::start_of_day(query.start),
            end: crate::utils::start_of_day(query.end),
        });
    }

    if filters.all_locations {
        query.locations.clear();
    } else if !filters.locations.is_empty() {
        query.locations = filters.locations.clone();
    }

    if let Some(parameter) = &filters.parameter {
        query.parameter = parameter.clone();
        if query.compare_with.as_deref() == Some(parameter.as_str()) {
            query.compare_with = table
                .unique_parameters()
                .into_iter()
                .find(|p| p != parameter);
        }
    }
    if compare_with.is_some() {
        query.compare_with = compare_with;
    }

    info!(?query, "Resolved dashboard query");
    Ok(Some(query))
}
