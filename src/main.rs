use anyhow::{Context, Result};
use clap::Parser;
use folio::config::HostSettings;
use folio::{ConfigStore, FileGateway, IpcServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Host process for the Folio file browser
///
/// Serves configuration and folder operations to the UI process as
/// newline-delimited JSON-RPC over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding config.json
    ///
    /// Falls back to the host settings file, then to the platform config
    /// directory.
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // stdout carries the protocol, so logs never go there
    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Settings errors are reported once logging is up.
    let (settings, settings_error) = match HostSettings::discover() {
        Ok(settings) => (settings, None),
        Err(e) => (HostSettings::default(), Some(e)),
    };

    let log_level = args
        .log_level
        .or(settings.log_level)
        .unwrap_or_else(|| "info".to_string());
    setup_logging(&log_level, args.log_file.or(settings.log_file))?;

    if let Some(e) = settings_error {
        warn!("Ignoring host settings: {:#}", e);
    }

    info!("Starting Folio host v{}", env!("CARGO_PKG_VERSION"));

    let config_dir = args
        .config_dir
        .or(settings.config_dir)
        .or_else(FileGateway::default_dir)
        .context("Could not determine a configuration directory; pass --config-dir")?;

    let gateway = FileGateway::new(&config_dir);
    info!("Configuration file: {}", gateway.path().display());

    let store = Arc::new(ConfigStore::new(Arc::new(gateway)));
    let server = IpcServer::new(Arc::clone(&store));

    server.run().await?;

    info!("Folio host shut down");
    Ok(())
}
