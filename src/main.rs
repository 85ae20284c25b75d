//! Payment validator HTTP façade entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use payment_validator_api::api::{create_router, AppState};
use payment_validator_api::config::Config;
use payment_validator_api::metrics;
use payment_validator_api::processor::{CommandProcessor, MockProcessor, PathProcessor};
use payment_validator_api::utils::shutdown_signal;
use payment_validator_api::ServiceError;

/// Payment validator HTTP façade.
#[derive(Parser, Debug)]
#[command(name = "validator-api")]
#[command(about = "HTTP facade for the payment validator processing routine")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Serve a mock processing result (no external command).
    #[arg(long)]
    dry_run: bool,

    /// HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// Serve a mock processing result (no external command).
        #[arg(long)]
        dry_run: bool,

        /// HTTP listen port.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("payment_validator_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Run { dry_run, port }) => cmd_run(dry_run, port).await,
        None => cmd_run(args.dry_run, args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("VALIDATOR API - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Base Folder: {}", config.base_folder.display());
    println!(
        "  Processor Command: {}",
        config.processor_command.as_deref().unwrap_or("(none)")
    );
    if let Some(args) = &config.processor_args {
        println!("  Processor Args: {}", args);
    }
    println!("  Dry Run: {}", config.dry_run);
    println!("  Port: {}", config.port);

    if !config.base_folder.is_dir() {
        println!(
            "  WARNING: base folder {} does not exist yet",
            config.base_folder.display()
        );
    }

    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_run(dry_run: bool, port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::Config(e)
    })?;

    // Override with CLI args if provided; the flag only ever enables dry-run,
    // the env/config default stands when it is absent.
    if dry_run {
        config.dry_run = true;
    }
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Base folder: {}", config.base_folder.display());
    info!(
        "Mode: {}",
        if config.dry_run { "DRY RUN (mock processor)" } else { "LIVE" }
    );

    // Wire the processing collaborator
    let processor: Arc<dyn PathProcessor> = if config.dry_run {
        Arc::new(MockProcessor::new())
    } else {
        let command = CommandProcessor::from_config(&config).map_err(ServiceError::from)?;
        info!("Processor command: {}", command.program());
        Arc::new(command)
    };

    // Create app state and router
    let app_state = AppState::new(processor, config.base_folder.clone());
    let router = create_router(app_state);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::Io)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
