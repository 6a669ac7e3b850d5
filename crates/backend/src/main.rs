pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::path::PathBuf;

use tokio::net::TcpListener;

use crate::handlers::AppState;
use crate::shared::config;
use crate::shared::data::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    let db_path: PathBuf = config::get_database_path(&config);
    let conn = db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let app = routes::configure_routes(AppState { db: conn });

    let addr = config::bind_address(&config);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::error!(
                "Port {} is already in use. Stop the other backend instance and retry.",
                config.server.port
            );
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
