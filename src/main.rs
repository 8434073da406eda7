// src/main.rs

use anyhow::Result;
use clap::Parser;
use repohash::cli::Cli;
use repohash::config::ConfigBuilder;
use repohash::errors::Error;
#[cfg(feature = "progress")]
use repohash::progress::IndicatifProgress;
use repohash::progress::ProgressReporter;
use repohash::run;
use repohash::signal::setup_signal_handler;
use std::sync::Arc;
use tracing_subscriber::filter::Directive;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "repohash=debug".parse::<Directive>()?
                } else {
                    "repohash=info".parse::<Directive>()?
                },
            ),
        )
        .init();

    log::info!("Starting repohash v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Setup ---
    let cli = Cli::parse();

    // Decide whether to show a progress bar. Show it if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = ConfigBuilder::from_cli(cli).build()?;
    log::debug!("Configuration built successfully: {:?}", config);

    let token = setup_signal_handler()?;

    // Download units interleave on a single thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(&config, &token, progress_reporter));

    // --- Error Handling ---
    if let Err(e) = result {
        match e {
            Error::Interrupted => {
                eprintln!("\nOperation cancelled.");
                std::process::exit(130);
            }
            _ => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
