use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buchkatalog::config::Config;
use buchkatalog::state::AppState;
use buchkatalog::{build_router, db, import, web};

#[derive(Parser)]
#[command(name = "buchkatalog", version, about = "E-book and audiobook catalog service")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Import books from a JSON export and exit
    #[arg(long)]
    import: Option<PathBuf>,

    /// With --import: remove existing books first
    #[arg(long, requires = "import")]
    replace: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Error loading config: {e}");
        std::process::exit(1);
    });

    // Setup tracing/logging
    let filter =
        EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Initialize database
    let pool = db::create_pool(&config.database).await.unwrap_or_else(|e| {
        tracing::error!("Failed to initialize database: {e}");
        std::process::exit(1);
    });
    tracing::info!("Database initialized: {}", config.database.url);

    // One-shot import mode
    if let Some(ref path) = cli.import {
        tracing::info!("Importing books from {}", path.display());
        match import::import_file(&pool, path, cli.replace).await {
            Ok(stats) => {
                tracing::info!(
                    "Import finished: imported={}, skipped={}",
                    stats.imported,
                    stats.skipped
                );
            }
            Err(e) => {
                tracing::error!("Import failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // Load translations
    let translations = web::i18n::load_translations(std::path::Path::new("locales"))
        .unwrap_or_else(|e| {
            tracing::error!("Failed to load translations: {e}");
            std::process::exit(1);
        });
    tracing::info!(
        "Translations loaded: {:?}",
        translations.keys().collect::<Vec<_>>()
    );

    // Server mode
    let host: IpAddr = config.server.host.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid host '{}', falling back to 0.0.0.0",
            config.server.host
        );
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    });
    let addr = SocketAddr::new(host, config.server.port);

    tracing::info!("buchkatalog v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Taxonomy: separators={:?}, {} blacklisted tags",
        config.taxonomy.separators,
        config.taxonomy.blacklist.len()
    );
    tracing::info!("Listening on {addr}");

    let state = AppState::new(config, pool, translations);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {addr}: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
