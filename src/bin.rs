//! Binary entry point for `homework-bot`.
//!
//! This module provides the command-line interface for homework-bot with options
//! for configuration file paths, logging verbosity, and span export. It initializes
//! logging once, loads configuration, and starts the polling loop.

use clap::Parser;
use homework_bot::base::types::Void;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Homework-bot: forwards homework review status changes to Telegram.
///
/// Configuration comes from environment variables (`PRACTICUM_TOKEN`,
/// `TELEGRAM_TOKEN`, `TELEGRAM_CHAT_ID`, ...), a `.env` file, or a TOML file.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory. Environment variables take precedence.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Run a single polling cycle and exit.
    #[arg(long)]
    once: bool,
    /// Export spans to an OTLP collector over HTTP.
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the homework-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Pick up a local `.env`, if any, before reading the environment.
    dotenvy::dotenv().ok();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // Prepare the otlp layer, if requested.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("homework-bot");
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    let config = homework_bot::load_config(args.config.as_deref()).await?;

    homework_bot::start(config, args.once).await
}
