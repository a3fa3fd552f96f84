use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{Level, info};

use server::config::{AppConfig, CorsConfig};
use server::database;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    info!("Database connected and schema synced");

    let cors = build_cors(&config.server.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = server::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}
