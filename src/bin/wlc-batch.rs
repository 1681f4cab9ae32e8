use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use well_log_cleaner::data::selection::CurveSelection;
use well_log_cleaner::data::summary::summarize;
use well_log_cleaner::data::{export, loader};
use well_log_cleaner::settings::ProcessingSettings;

#[derive(Parser)]
#[command(
    name = "wlc-batch",
    version,
    about = "Clean the curves of a well log file with a saved filter pipeline",
    long_about = "Load a LAS or CSV well log, run every selected curve through the \
                  filter pipeline and write the result as LAS or CSV (chosen by the \
                  output extension). Without --settings the saved viewer settings are used."
)]
struct Cli {
    /// Input well log (.las, .csv, .txt)
    #[arg(long, short)]
    input: PathBuf,

    /// Output file (.las, .csv, .txt)
    #[arg(long, short)]
    output: PathBuf,

    /// Pipeline settings JSON (defaults to the viewer's saved settings)
    #[arg(long, short)]
    settings: Option<PathBuf>,

    /// Curves to process; others are copied unchanged (default: all)
    #[arg(long, num_args = 1..)]
    curves: Option<Vec<String>>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let settings = match &cli.settings {
        Some(path) => ProcessingSettings::load_from(path)?,
        None => ProcessingSettings::load_or_default(),
    };
    let pipeline = settings
        .to_pipeline()
        .with_context(|| format!("invalid settings '{}'", settings.name))?;

    let log = loader::load_file(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let selection: Option<CurveSelection> = cli.curves.map(|names| names.into_iter().collect());
    if let Some(selection) = &selection {
        let unknown: Vec<&str> = selection
            .iter()
            .filter(|name| log.curve_index(name).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            bail!("Unknown curves: {}", unknown.join(", "));
        }
    }

    let processed = log.process(&pipeline, selection.as_ref())?;
    export::save_file(&processed, &cli.output)?;

    println!(
        "{} → {} ({} filters enabled)",
        cli.input.display(),
        cli.output.display(),
        pipeline.enabled().count()
    );
    for summary in summarize(&log, &processed) {
        if selection.as_ref().is_some_and(|s| !s.contains(&summary.name)) {
            continue;
        }
        let reduction = summary
            .noise_reduction()
            .map(|pct| format!("{pct:.1}%"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:<10} std {:>10.4} → {:>10.4}  noise reduction {reduction}",
            summary.name, summary.before.std_dev, summary.after.std_dev
        );
    }
    Ok(())
}
