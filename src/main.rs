//! Libris - Library Management System
//!
//! Interactive menu and one-shot commands over a JSON data file.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use libris::{
    cli::{self, Args, Command},
    config::{AppConfig, LoggingConfig},
    Library, Storage,
};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(path) = args.data_file.clone() {
        config.storage.path = path;
    }

    // Held until exit so buffered file logs are flushed
    let _guard = init_tracing(&config.logging, args.verbose)?;

    tracing::info!("Starting Libris v{}", env!("CARGO_PKG_VERSION"));

    let mut library = Library::open(Storage::from_config(&config.storage))?;

    let command = args.command.unwrap_or(Command::Menu);
    let failure = cli::execute(command, &mut library, io::stdin().lock(), io::stdout().lock())?;

    Ok(match failure {
        Some(err) => ExitCode::from(err.code() as u8),
        None => ExitCode::SUCCESS,
    })
}

/// Install the global subscriber. Logs go to stderr unless a file is
/// configured, so they never interleave with menu output on stdout.
fn init_tracing(logging: &LoggingConfig, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris={}", level).into());

    let (writer, guard) = match &logging.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(io::stderr), None),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(logging.file.is_none());

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    Ok(guard)
}
