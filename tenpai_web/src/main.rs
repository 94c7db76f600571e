use std::sync::Arc;
use tenpai_web::{config::Config, create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState { rules: config.rules });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(deal_count = config.rules.deal_count, "listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
