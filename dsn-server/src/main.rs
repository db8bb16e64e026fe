use dsn_backend::module::dsn::{DsnPipeline, HttpFeedSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

mod cache;
mod config;
mod logging;
mod routes;

use cache::SnapshotCache;
use config::ServerConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_directory, "dsn-server", &config.log_level)?;

    tracing::info!("DSN server starting...");
    tracing::info!("Loaded configuration: {:?}", config);

    if !Path::new(&config.images_directory).is_dir() {
        tracing::warn!(
            "Images directory does not exist, /images will return 404: {}",
            config.images_directory
        );
    }

    let source = Arc::new(HttpFeedSource::new()?);
    let pipeline = DsnPipeline::new(source, config.feeds.clone(), Some(config.base_url()));
    let state = Arc::new(AppState {
        pipeline,
        cache: SnapshotCache::new(Duration::from_secs(config.cache_ttl_secs)),
    });

    let app = routes::build_router(state, &config.images_directory, config.enable_cors);

    let addr = config.server_address();
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Snapshot URL: {}/api/dsn", config.base_url());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
