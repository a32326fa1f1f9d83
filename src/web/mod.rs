pub mod components;
pub mod handlers;
pub mod render;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::entity_page::EntityPageLoader;
use crate::core::{EntityRepository, PageRenderer};
use crate::utils::error::Result;

pub use render::HtmlPageRenderer;

#[derive(Clone)]
pub struct AppState {
    pub(crate) loader: Arc<EntityPageLoader<Arc<dyn EntityRepository>>>,
    pub(crate) renderer: Arc<dyn PageRenderer>,
}

impl AppState {
    pub fn new(repository: Arc<dyn EntityRepository>, renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            loader: Arc::new(EntityPageLoader::new(repository)),
            renderer,
        }
    }
}

/// Both entity paths route to the same handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/:entity_id", get(handlers::entity_page))
        .route("/entities/:entity_id", get(handlers::entity_page))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
