use std::future::Future;

use axum::Router;
use common::env::ensure_data_dir;
use configs::AppConfig;
use service::file::user_store::UserStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config from file + env and validate it.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Open the user store named by `cfg` and build the router around it.
///
/// Fails when the backing file exists but cannot be parsed.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let users_path = &cfg.storage.users_path;
    ensure_data_dir(users_path).await?;
    let store = UserStore::initialize(users_path.clone()).await?;
    info!(path = %users_path.display(), users = store.len().await, "user store ready");

    let state = AppState::new(store);
    Ok(routes::build_router(state, build_cors()))
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: build the app from `cfg` and run the HTTP server until `shutdown`.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {addr}: {e}"))?;
    let local = listener.local_addr()?;
    info!(%local, "API up at http://localhost:{}", local.port());

    serve(listener, app, shutdown).await
}

