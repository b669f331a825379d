//! REST API server for Callsight.
//!
//! Provides HTTP endpoints for:
//! - Transcript ingest and recording lookup
//! - Running the analysis pipeline
//! - Fetching stored analyses
//! - Process template listing

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;

use crate::analysis::AnalysisOrchestrator;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub db_path: PathBuf,
}

pub struct ApiServer {
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(port: u16, orchestrator: Arc<AnalysisOrchestrator>, db_path: PathBuf) -> Self {
        Self {
            port,
            state: AppState {
                orchestrator,
                db_path,
            },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(status))
            .route("/version", get(version))
            .merge(routes::recordings::router(self.state.clone()))
            .merge(routes::templates::router(self.state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                          - Service info");
        info!("  GET  /version                   - Version info");
        info!("  POST /recordings                - Ingest a transcript");
        info!("  GET  /recordings                - List recordings");
        info!("  GET  /recordings/:id            - Get a recording");
        info!("  POST /recordings/:id/analyze    - Analyze a recording");
        info!("  GET  /recordings/:id/analysis   - Get the stored analysis");
        info!("  GET  /templates                 - List process templates");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "callsight",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "callsight"
    }))
}
