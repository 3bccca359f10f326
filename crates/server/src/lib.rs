pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

pub use auth::{Claims, JwtKeys};
pub use config::Config;
pub use db::create_pool;
pub use router::create_router;
pub use state::AppState;

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let addr = config.addr;
    let state = AppState::new(pool, config)?;
    let app = create_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
