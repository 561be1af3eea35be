//! Service entry point: env config, store bootstrap, router, serve.

use aas_repository::{
    common_routes, connect, docs_routes, ensure_database_dir, ensure_shell_table, shell_routes,
    AppConfig, AppState,
};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("aas_repository=debug".parse()?),
        )
        .init();

    let cfg = AppConfig::from_env();
    ensure_database_dir(&cfg.database_url)?;
    let pool = connect(&cfg.database_url).await?;
    ensure_shell_table(&pool).await?;
    tracing::info!(database_url = %cfg.database_url, "store ready");

    let state = AppState { pool };
    let app = Router::new()
        .merge(docs_routes())
        .merge(common_routes(state.clone()))
        .merge(shell_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
