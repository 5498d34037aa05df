use clap::Parser;

use movies_api::config::AppConfig;
use movies_api::db;
use movies_api::routes::{build_router, AppState};

#[derive(Parser)]
#[command(name = "movies-api", about = "JSON CRUD service for movies and their directors")]
struct Cli {
    /// Path to config file
    #[arg(long, env = "MOVIES_CONFIG", default_value = "movies.toml")]
    config: String,

    /// Address to listen on, overriding `listen_addr` from the config file
    #[arg(long, env = "MOVIES_LISTEN_ADDR")]
    listen_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movies_api=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    tracing::info!("Loaded config from {}", cli.config);

    let pool = db::init_pool(&config).await.map_err(|e| {
        tracing::error!("Could not connect to the database: {e}");
        e
    })?;
    tracing::info!("Successfully connected to database");

    let state = AppState {
        pool,
        query_timeout: config.query_timeout(),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
