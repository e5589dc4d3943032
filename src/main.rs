use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use swipe_match::config::{LoggingSettings, Settings, StoreBackend};
use swipe_match::routes::{self, swipes::AppState};
use swipe_match::{
    MatchService, MemoryStore, RedisStore, SimulationConfig, SwipeError, SwipeSimulator,
    SwipeStore,
};

/// Atomic swipe-and-match service and simulator
#[derive(Debug, Parser)]
#[command(name = "swipe-match", version, about)]
struct Cli {
    /// Configuration file, defaults to config/default.toml + config/local.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Redis server address, e.g. localhost:6379 or redis://host:port
    #[arg(long, global = true)]
    redis: Option<String>,

    /// Use the in-process store instead of Redis
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run concurrent random swipes and print a match summary (default)
    Simulate {
        /// Number of users to simulate
        #[arg(long)]
        users: Option<usize>,
        /// Number of total swipes
        #[arg(long)]
        swipes: Option<usize>,
        /// Seed for reproducible swipes
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the swipe API over HTTP
    Serve,
}

fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.compact().init(),
    }
}

/// Accept bare `host:port` addresses as well as full Redis URLs
fn redis_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}", address)
    }
}

async fn build_store(settings: &Settings) -> Result<Arc<dyn SwipeStore>, SwipeError> {
    match settings.store.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&settings.store.redis_url).await?;
            info!("Using Redis store at {}", settings.store.redis_url);
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("Using in-process memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn fatal(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if let Some(address) = &cli.redis {
        settings.store.redis_url = redis_url(address);
        settings.store.backend = StoreBackend::Redis;
    }
    if cli.memory {
        settings.store.backend = StoreBackend::Memory;
    }

    init_logging(&settings.logging);
    info!("Configuration loaded successfully");

    let store = build_store(&settings)
        .await
        .map_err(|e| fatal("Failed to initialize store", e))?;
    let service = MatchService::new(store);

    service
        .setup(settings.store.flush_on_start)
        .await
        .map_err(|e| fatal("Failed to prepare store", e))?;

    match cli.command.unwrap_or(Command::Simulate { users: None, swipes: None, seed: None }) {
        Command::Simulate { users, swipes, seed } => {
            let mut config = SimulationConfig::from(&settings.simulation);
            if let Some(users) = users {
                config.num_users = users;
            }
            if let Some(swipes) = swipes {
                config.num_swipes = swipes;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            let simulator = SwipeSimulator::new(service, config)
                .map_err(|e| fatal("Invalid simulation parameters", e))?;
            let report = simulator
                .run()
                .await
                .map_err(|e| fatal("Simulation failed", e))?;

            report.log_summary();
            info!("Simulation completed in {}ms", report.elapsed_ms);
            Ok(())
        }
        Command::Serve => {
            let app_state = AppState { service };
            let host = settings.server.host.clone();
            let port = settings.server.port;
            let workers = settings.server.workers.unwrap_or(4);

            info!("Starting HTTP server on {}:{}", host, port);

            HttpServer::new(move || {
                App::new()
                    .app_data(web::Data::new(app_state.clone()))
                    .wrap(Cors::permissive())
                    .wrap(middleware::Logger::default())
                    .configure(routes::configure_routes)
            })
            .workers(workers)
            .bind((host, port))?
            .run()
            .await
        }
    }
}
