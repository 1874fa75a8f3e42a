use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod routes;
mod schema;
mod state;
mod views;

mod crypto {
    pub mod password;
    pub mod session_token;
}

mod models {
    pub mod note;
    pub mod page;
    pub mod session;
    pub mod user;
}

mod repositories {
    #[cfg(test)]
    pub mod memory;
    pub mod note;
    pub mod session;
    pub mod user;
}

mod services {
    pub mod auth;
    pub mod notes;
    pub mod page;
    pub mod streak;
}

mod handlers {
    pub mod auth;
    pub mod notes;
    pub mod pages;
    #[cfg(test)]
    mod tests;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod forms;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let db = db::create_pool(&config.database_url)?;

    // A failed migration leaves the server running; queries will surface as 500s.
    match schema::migrate(&db).await {
        Ok(()) => tracing::info!("✅ Connected to the database and migrated schema"),
        Err(e) => tracing::error!("❌ Schema migration failed: {}", e),
    }

    let state = AppState::new(&config, db).await?;
    tracing::info!("✅ AppState initialized");

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
