use smokewatch_backend::{startup::build_router, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = Config::from_env()?;

    let state = Arc::new(AppState::new(config));

    // Uploads land here; create it before accepting requests
    state.store.ensure_dir().await?;
    tracing::info!(
        "Storing uploads in {:?} ({} byte chunks)",
        state.store.dir(),
        state.store.chunk_size()
    );

    let addr = state.config.bind_addr();
    let app = build_router(state);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
