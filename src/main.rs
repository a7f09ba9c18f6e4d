mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use perfusion_sanitize::config::{CutoffSpec, PipelineConfig, RolePaths};
use perfusion_sanitize::plot::{CsvOverlay, NoPlot, PlotSink};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    log::debug!("pipeline config: {config:?}");

    let mut plot: Box<dyn PlotSink> = match &config.plot {
        Some(path) => Box::new(CsvOverlay::new(path)),
        None => Box::new(NoPlot),
    };
    let report = perfusion_sanitize::run(&config, plot.as_mut())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Config file (or defaults), then command-line overrides on top.
fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(text) = &cli.cfreq {
        config.cutoff = CutoffSpec::from_text(text);
    }
    if let Some(dir) = &cli.raw_dir {
        config.inputs = RolePaths::raw_in(dir);
    }
    if let Some(dir) = &cli.output_dir {
        config.outputs = RolePaths::sanitized_in(dir);
    }
    if let Some(path) = &cli.plot {
        config.plot = Some(path.clone());
    }
    Ok(config)
}
