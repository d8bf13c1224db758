use devfunds::aggregate::bundled_aggregates;
use devfunds::args::{Args, OutputFormat};
use devfunds::{render, Config, Session};

use anyhow::Result;
use clap::Parser;
use std::io::stdout;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level());

    match run(Config::from(&args)).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when the feed could not be loaded.
async fn run(config: Config) -> Result<bool> {
    debug!("{config:?}");
    let mut session = Session::new(bundled_aggregates()?);
    session.load(&config.source).await;
    session.set_filters(config.filters);

    if let Some(message) = session.error_message() {
        eprintln!("{message}");
        return Ok(false);
    }

    let out = stdout().lock();
    match config.format {
        OutputFormat::Table => render::write_table(&session, out)?,
        OutputFormat::Csv => render::write_csv(&session, out)?,
        OutputFormat::Summary => render::write_summary(&session, out)?,
    }
    Ok(true)
}

fn init_logger(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
