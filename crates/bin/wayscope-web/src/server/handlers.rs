use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use wayscope_input::index::BuildStart;
use wayscope_input::session::{DatasetSession, ScenarioSummary};

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Deserialize)]
pub struct LoadRequest {
    pub path: String,
}

#[derive(Deserialize)]
pub struct LoadScenarioRequest {
    pub path: String,
    pub scenario_index: usize,
}

/// Serializes `payload` and stamps the success envelope onto it.
fn envelope<T: Serialize>(payload: &T) -> Result<Json<Value>, ApiError> {
    let mut value =
        serde_json::to_value(payload).map_err(|e| ApiError::Internal(e.to_string()))?;
    if let Some(object) = value.as_object_mut() {
        object.insert("success".to_owned(), Value::Bool(true));
    }
    Ok(Json(value))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.index.snapshot();
    let current_file = state
        .current_session()
        .map(|session| session.path().to_string_lossy().into_owned());
    Json(json!({
        "success": true,
        "status": "ok",
        "current_file": current_file,
        "dataset_root": state.catalog.root().to_string_lossy(),
        "index_status": snapshot.status,
        "index_count": snapshot.count,
    }))
}

pub async fn datasets(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let folders = state.catalog.folders()?;
    Ok(Json(json!({
        "success": true,
        "datasets": folders,
        "root_path": state.catalog.root().to_string_lossy(),
    })))
}

pub async fn dataset_files(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = state.catalog.files(&folder, query.offset)?;
    envelope(&page)
}

pub async fn load_file(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<Value>, ApiError> {
    let path = PathBuf::from(&request.path);
    if !path.is_file() {
        return Err(ApiError::BadRequest(format!(
            "invalid record file path: {}",
            request.path
        )));
    }
    let session = load_session(&state, path).await?;
    state.replace_session(session.clone());
    let scenarios: Vec<ScenarioSummary> = session.summaries().collect();
    Ok(Json(json!({
        "success": true,
        "path": request.path,
        "scenarios": scenarios,
    })))
}

pub async fn scenario(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, ApiError> {
    let session = state.current_session().ok_or(ApiError::NoSessionLoaded)?;
    let data = session.get(index)?;
    Ok(Json(json!({"success": true, "data": data})))
}

/// Fast jump from index search results: switches the session only when the
/// requested file differs from the active one.
pub async fn load_scenario(
    State(state): State<AppState>,
    Json(request): Json<LoadScenarioRequest>,
) -> Result<Json<Value>, ApiError> {
    let path = PathBuf::from(&request.path);
    let session = match state.session_for(&path) {
        Some(session) => session,
        None => {
            if !path.is_file() {
                return Err(ApiError::BadRequest(format!(
                    "invalid record file path: {}",
                    request.path
                )));
            }
            let session = load_session(&state, path).await?;
            state.replace_session(session.clone());
            session
        }
    };
    let data = session.get(request.scenario_index)?;
    Ok(Json(json!({
        "success": true,
        "data": data,
        "path": request.path,
        "scenario_index": request.scenario_index,
    })))
}

pub async fn build_index(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.index.try_begin() {
        BuildStart::InProgress => Err(ApiError::Conflict(
            "scenario index build is already in progress".to_owned(),
        )),
        BuildStart::AlreadyBuilt(count) => Ok(Json(json!({
            "success": true,
            "message": "Scenario index is already built.",
            "count": count,
        }))),
        BuildStart::Started => {
            info!("Starting scenario index build.");
            let index = state.index.clone();
            let catalog = state.catalog.clone();
            let _ = tokio::task::spawn_blocking(move || index.run_build(&catalog));
            Ok(Json(json!({
                "success": true,
                "message": "Scenario index build started.",
            })))
        }
    }
}

pub async fn index_status(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.index.snapshot();
    Json(json!({
        "success": true,
        "status": snapshot.status,
        "count": snapshot.count,
    }))
}

pub async fn search_files(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = state.catalog.search(&query.q, query.offset)?;
    envelope(&page)
}

pub async fn search_scenarios(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = state.index.search(&query.q, query.offset)?;
    envelope(&page)
}

/// Minimal page shown when no static UI directory is configured.
pub async fn landing() -> Html<&'static str> {
    Html(
        "<html><body><h1>wayscope</h1><ul>\
         <li>GET /api/health</li>\
         <li>GET /api/datasets</li>\
         <li>GET /api/datasets/:folder/files?offset=</li>\
         <li>POST /api/load</li>\
         <li>GET /api/scenario/:index</li>\
         <li>POST /api/load-scenario</li>\
         <li>POST /api/build-index</li>\
         <li>GET /api/index-status</li>\
         <li>GET /api/search?q=&offset=</li>\
         <li>GET /api/search-scenarios?q=&offset=</li>\
         </ul></body></html>",
    )
}

async fn load_session(state: &AppState, path: PathBuf) -> Result<Arc<DatasetSession>, ApiError> {
    let cap = state.scenario_cap;
    info!("Loading record file {}.", path.display());
    let session = tokio::task::spawn_blocking(move || DatasetSession::load(&path, cap))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Arc::new(session))
}
