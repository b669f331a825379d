//! Recording and analysis API endpoints.
//!
//! Provides HTTP endpoints for:
//! - Ingesting a transcript (POST /recordings)
//! - Listing recordings (GET /recordings)
//! - Getting a recording (GET /recordings/:id)
//! - Running the analysis pipeline (POST /recordings/:id/analyze)
//! - Fetching the stored analysis (GET /recordings/:id/analysis)

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::super::error::{ApiError, ApiResult};
use super::super::AppState;
use crate::db::{
    self,
    analyses::AnalysisRepository,
    recordings::RecordingRepository,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordingRequest {
    #[serde(default = "default_org")]
    pub organization_id: i64,
    pub title: Option<String>,
    pub transcript: String,
    pub duration_seconds: Option<i64>,
}

fn default_org() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/recordings", post(create_recording).get(list_recordings))
        .route("/recordings/:id", get(get_recording))
        .route("/recordings/:id/analyze", post(analyze_recording))
        .route("/recordings/:id/analysis", get(get_analysis))
        .with_state(state)
}

async fn create_recording(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordingRequest>,
) -> ApiResult<Json<Value>> {
    if request.transcript.is_empty() {
        return Err(ApiError::bad_request("transcript must not be empty"));
    }

    let conn = db::open_at(&state.db_path)?;
    let id = RecordingRepository::insert(
        &conn,
        request.organization_id,
        request.title.as_deref(),
        Some(&request.transcript),
        request.duration_seconds,
    )?;

    info!("Recording {} ingested via API", id);

    Ok(Json(json!({ "id": id })))
}

async fn list_recordings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let conn = db::open_at(&state.db_path)?;
    let recordings = RecordingRepository::list(&conn, query.limit)?;

    // Keep the listing light: transcripts can be large.
    let items: Vec<Value> = recordings
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "organizationId": r.organization_id,
                "title": r.title,
                "status": r.status,
                "durationSeconds": r.duration_seconds,
                "createdAt": r.created_at,
            })
        })
        .collect();

    Ok(Json(json!({ "recordings": items })))
}

async fn get_recording(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let conn = db::open_at(&state.db_path)?;
    let recording = RecordingRepository::get(&conn, id)?
        .ok_or_else(|| ApiError::not_found(format!("Recording {id} not found")))?;

    Ok(Json(serde_json::to_value(&recording).map_err(|e| {
        ApiError::internal(format!("Failed to serialize recording: {e}"))
    })?))
}

async fn analyze_recording(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    info!("Analysis requested for recording {} via API", id);

    let report = state.orchestrator.analyze(id).await?;

    Ok(Json(json!({
        "recordingId": id,
        "analysis": report,
    })))
}

async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let conn = db::open_at(&state.db_path)?;
    let record = AnalysisRepository::get_for_recording(&conn, id)?
        .ok_or_else(|| ApiError::not_found(format!("No analysis for recording {id}")))?;

    Ok(Json(json!({
        "recordingId": record.recording_id,
        "analysis": record.report,
        "createdAt": record.created_at,
        "updatedAt": record.updated_at,
    })))
}
