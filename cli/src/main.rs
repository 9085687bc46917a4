//! Hotel reservation service: CLI
//!
//! ```sh
//! # Run with default config (~/.config/hotel-reservation/config.toml)
//! hotel-service
//!
//! # Custom config path and port
//! hotel-service serve --config /etc/hotel-reservation/config.toml --port 8080
//!
//! # Validate config without starting
//! hotel-service serve --check
//!
//! # Drop everything and insert development fixtures
//! hotel-service seed
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use hotel_reservation::config::AppConfig;
use hotel_reservation::fixtures::Fixtures;
use hotel_reservation::infrastructure::database::reset_database;
use hotel_reservation::infrastructure::{connect_cache, init_database};
use hotel_reservation::server::{init_tracing, ServerHandle, ServerOptions, Services};

#[derive(Parser, Debug)]
#[command(
    name = "hotel-service",
    version,
    about = "Hotel reservation REST API",
    long_about = "REST API for browsing hotels and booking rooms.\n\n\
                  Default config: ~/.config/hotel-reservation/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve(ServeArgs),
    /// Re-create the schema and insert fixture data.
    Seed,
}

#[derive(clap::Args, Debug, Default)]
struct ServeArgs {
    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(hotel_reservation::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration: {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, config_path, args).await,
        Command::Seed => seed(config).await,
    }
}

async fn serve(
    mut config: AppConfig,
    config_path: PathBuf,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = args.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if args.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Listen      : {}", config.listen_address());
        println!("   Database    : {}", config.database.url);
        println!(
            "   Cache       : {}",
            config.cache.redis_url.as_deref().unwrap_or("in-memory")
        );
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !args.no_migrate,
        create_default_admin: !args.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

async fn seed(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(&config.database_config()).await?;
    info!("Dropping and re-creating the schema...");
    reset_database(&db).await?;

    let cache = connect_cache(config.cache.redis_url.as_deref()).await;
    let services = Services::new(&config, db.clone(), cache);
    let fixtures = Fixtures::new(Arc::clone(&services.repos), Arc::clone(&services.identity));

    let report = match fixtures.seed().await {
        Ok(report) => report,
        Err(e) => {
            error!("Seeding failed: {}", e);
            return Err(e.into());
        }
    };

    println!("{} -> {}", report.customer.email, report.customer_token);
    println!("{} -> {}", report.admin.email, report.admin_token);
    println!("booking -> {}", report.booking.id);
    println!("hotels  -> {}", report.random_hotels + 1);

    db.close().await?;
    Ok(())
}
