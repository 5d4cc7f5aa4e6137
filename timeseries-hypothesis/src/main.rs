use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use timeseries_hypothesis::{
    compare, read_measurements, select_labels, Cli, Config, JsonReporter, OutputFormat, Reporter,
    RunOptions, TerminalReporter,
};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(error) = run(cli) {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Load config and apply CLI overrides
    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_to_config(&mut config);
    config.validate().context("Invalid configuration")?;
    log::debug!("Configuration: {:?}", config);

    // 1. Read measurements
    log::info!("Reading {}", cli.input.display());
    let records = read_measurements(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    log::info!("Read {} measurements", records.len());

    // 2. Resolve labels
    let labels = select_labels(
        &records,
        cli.baseline.as_deref(),
        cli.experiment.as_deref(),
    )?;
    log::info!(
        "Comparing baseline {:?} against experiment {:?}",
        labels.baseline,
        labels.experiment
    );

    // 3. Analyze
    let options = RunOptions::new(labels, &config, std::io::stdout().is_terminal());
    let comparison = compare(&records, &options);

    // 4. Report
    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Text => Box::new(TerminalReporter::with_colors(options.color_enabled)),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };
    reporter
        .report(&comparison.analysis, &comparison.report_options)
        .context("Failed to write report")?;

    Ok(())
}
