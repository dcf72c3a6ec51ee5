use clap::Parser;
use puzzlecom::cli::{Args, Settings};
use puzzlecom::config::ConfigLoader;
use puzzlecom::error::AppResult;
use puzzlecom::port::SyncSerialPort;
use puzzlecom::transfer;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(response) => {
            // Blank line first, then the device's answer; logging goes to
            // stderr so stdout carries only this.
            println!("\n{response}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> AppResult<String> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };

    init_tracing(args.verbose, &loader.config.logging.filter);

    if let Some(path) = &loader.config_path {
        debug!(path = %path.display(), "configuration loaded");
    }

    let settings = Settings::resolve(args, &loader.config);
    info!(
        port = %settings.port,
        baud_rate = settings.baud_rate,
        puzzle_file = %settings.puzzle_file.display(),
        "starting transfer"
    );

    // Port first, puzzle file second; run_from_file reads the file before
    // writing anything, so a missing file never leaves the device mid-frame.
    let mut port = SyncSerialPort::open(&settings.port, settings.baud_rate, settings.poll_timeout)?;

    transfer::run_from_file(&mut port, &settings.puzzle_file)
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags select the level, falling
/// back to the configured filter. Output goes to stderr.
fn init_tracing(verbose: u8, config_filter: &str) {
    let fallback = match verbose {
        0 => config_filter,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
