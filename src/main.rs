//! `correlation-log`: write correlated log lines from shell scripts.
//!
//! ```text
//! correlation-log --correlation-id abc-123 error "payment declined"
//! tail -f worker.out | correlation-log -i job-7 verbose -
//! ```
//!
//! Settings come from an optional TOML file; flags override it.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use correlation_log::config::{load_config, validation::validate_config, Config, ConfigError};
use correlation_log::logger::{CorrelationId, CorrelationLogger, LineFormat, StreamLogger};
use correlation_log::{LogResult, Severity};

#[derive(Parser)]
#[command(name = "correlation-log")]
#[command(about = "Write log lines tagged with a request correlation ID", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum severity to write (verbose, info, warn, error, fatal, any).
    #[arg(short, long)]
    level: Option<String>,

    /// `stdout`, `stderr` or a file path.
    #[arg(short, long)]
    destination: Option<String>,

    /// Line format (text or json).
    #[arg(short, long, value_parser = parse_format)]
    format: Option<LineFormat>,

    /// Correlation ID for every line written.
    #[arg(short = 'i', long)]
    correlation_id: Option<String>,

    /// Severity of the record.
    #[arg(value_parser = parse_severity)]
    severity: Severity,

    /// Message words. Omit or pass `-` to log each stdin line.
    message: Vec<String>,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    Severity::parse(value).ok_or_else(|| format!("unknown severity '{value}'"))
}

fn parse_format(value: &str) -> Result<LineFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "text" => Ok(LineFormat::Text),
        "json" => Ok(LineFormat::Json),
        _ => Err(format!("unknown format '{value}' (expected text or json)")),
    }
}

fn emit(logger: &CorrelationLogger, severity: Severity, message: &str) -> LogResult<bool> {
    match severity {
        Severity::Verbose => logger.verbose(message),
        Severity::Info => logger.info(message),
        Severity::Warn => logger.warn(message),
        Severity::Error => logger.error(message),
        Severity::Fatal => logger.fatal(message),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "correlation_log=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(level) = cli.level {
        config.logging.level = level;
    }
    if let Some(destination) = cli.destination {
        config.logging.destination = destination;
    }
    if let Some(format) = cli.format {
        config.logging.format = format;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    let correlation_id = match cli.correlation_id {
        Some(id) => CorrelationId::new(id),
        None if config.correlation.generate_if_absent => CorrelationId::generate(),
        None => CorrelationId::none(),
    };

    tracing::debug!(
        correlation_id = %correlation_id,
        level = %config.logging.level,
        destination = %config.logging.destination,
        "Logger configured"
    );

    let writer = StreamLogger::from_config(&config.logging)?;
    let logger = CorrelationLogger::with_writer(Arc::new(writer), correlation_id);

    if cli.message.is_empty() || cli.message == ["-"] {
        for line in io::stdin().lock().lines() {
            emit(&logger, cli.severity, &line?)?;
        }
    } else {
        emit(&logger, cli.severity, &cli.message.join(" "))?;
    }

    logger.writer().close()?;
    Ok(())
}
