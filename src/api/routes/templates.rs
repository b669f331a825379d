//! Process template API endpoints.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::super::error::ApiResult;
use super::super::AppState;
use crate::db::{self, templates::TemplateRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesQuery {
    #[serde(default = "default_org")]
    pub organization_id: i64,
}

fn default_org() -> i64 {
    1
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/templates", get(list_templates))
        .with_state(state)
}

async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> ApiResult<Json<Value>> {
    let conn = db::open_at(&state.db_path)?;
    let templates = TemplateRepository::list_for_org(&conn, query.organization_id)?;

    Ok(Json(json!({ "templates": templates })))
}
