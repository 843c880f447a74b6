use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use reportguard::api::{create_router, AppState};
use reportguard::cli;
use reportguard::config::{Config, LogFormat, MAX_REVIEW_PASSES};
use reportguard::ReviewService;

#[derive(Parser)]
#[command(name = "reportguard")]
#[command(about = "Contradiction checks and automated amendments for valuation reports")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Check a report JSON file; exits with status 1 when contradictions are found
    Check {
        file: PathBuf,
        /// Print the check result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Review a report JSON file and write the amended report
    Amend {
        file: PathBuf,
        /// Write the amended report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Check/amend rounds (defaults to REVIEW_MAX_PASSES)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_REVIEW_PASSES as i64))]
        max_passes: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());
    let config = Config::from_env();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file, json } => {
            let service = ReviewService::new(config.review);
            let found = cli::check_file(&service, &file, json, &mut io::stdout().lock())?;
            Ok(if found {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Amend {
            file,
            output,
            max_passes,
        } => {
            let service = ReviewService::new(config.review);
            cli::amend_file(
                &service,
                &file,
                output.as_deref(),
                max_passes,
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(format: LogFormat) {
    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reportguard=info,tower_http=debug".into()),
        )
        .with(fmt_layer)
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config));

    tracing::info!("Reportguard starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
