use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_api::config::RelayConfig;
use relay_api::handlers::{self, InboundAppState};
use relay_api::helpers::message_formatter::format_summary;
use relay_api::RelayPipeline;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Relay a single raw email read from a file, or `-` for stdin
    Relay {
        input: String,
        /// Print the formatted message instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_path) = log_file_path else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let log_path = Path::new(log_path);
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("relay-api.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_writer(std::io::stdout),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_file_path.as_deref());

    let (config, config_path) =
        RelayConfig::load(args.config.as_deref()).context("Failed to load config")?;
    tracing::info!("Loaded config from {}", config_path.display());

    let pipeline = Arc::new(RelayPipeline::from_config(&config).context("Invalid label config")?);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, pipeline).await,
        Command::Relay { input, dry_run } => relay_once(&pipeline, &input, dry_run).await,
    }
}

async fn serve(config: &RelayConfig, pipeline: Arc<RelayPipeline>) -> Result<()> {
    let server_config = config.server();
    let state = InboundAppState {
        pipeline,
        token: config.inbound_token(),
    };

    if state.token.is_none() {
        tracing::warn!("No inbound token configured; /api/inbound accepts any caller");
    }

    tracing::info!(
        "Server will listen on {}:{}",
        server_config.host,
        server_config.port
    );

    let max_body_bytes = server_config.max_body_bytes;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            server_config.host, server_config.port
        )
    })?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await.context("Server error")
}

async fn relay_once(pipeline: &RelayPipeline, input: &str, dry_run: bool) -> Result<()> {
    let raw = if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read email from stdin")?;
        buf
    } else {
        std::fs::read(input).with_context(|| format!("Failed to read email from {input}"))?
    };

    let summary = pipeline.prepare(&raw)?;

    if dry_run {
        println!("{}", format_summary(&summary));
        return Ok(());
    }

    pipeline
        .deliver(&summary)
        .await
        .context("Failed to deliver summary")?;
    tracing::info!("Summary delivered to Telegram");

    Ok(())
}
