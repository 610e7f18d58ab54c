use crate::core::{Item, SortingRobot};
use crate::utils::error::{ErrorCode, Result, SortingError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadItemsRequest {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectItemResponse {
    pub item: Item,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubbyRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveItemRequest {
    pub cubby: CubbyRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCubbyRequest {
    pub id: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl ErrorBody {
    /// Carries the typed payload next to the display message so clients can
    /// rebuild the exact error.
    pub fn from_error(err: &SortingError) -> Self {
        let mut body = ErrorBody {
            code: err.code(),
            message: err.to_string(),
            field: None,
            reason: None,
            id: None,
            capacity: None,
        };
        match err {
            SortingError::InvalidArgument { field, reason } => {
                body.field = Some(field.clone());
                body.reason = Some(reason.clone());
            }
            SortingError::CubbyFull { id, capacity } => {
                body.id = Some(id.clone());
                body.capacity = Some(*capacity);
            }
            SortingError::CubbyExists { id } => body.id = Some(id.clone()),
            _ => {}
        }
        body
    }
}

#[derive(Clone)]
struct AppState {
    robot: Arc<dyn SortingRobot>,
}

type ApiResult<T> = std::result::Result<T, (StatusCode, Json<ErrorBody>)>;

pub fn router(robot: Arc<dyn SortingRobot>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/load", post(load_items))
        .route("/select", post(select_item))
        .route("/move", post(move_item))
        .route("/cubbies", post(create_cubby))
        .route("/state", get(snapshot))
        .with_state(AppState { robot })
}

/// Serves the robot on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, robot: Arc<dyn SortingRobot>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Sorting robot listening on http://{}", addr);
    }
    axum::serve(listener, router(robot)).await?;
    Ok(())
}

pub async fn run_server(listen: SocketAddr, robot: Arc<dyn SortingRobot>) -> Result<()> {
    let listener = TcpListener::bind(listen).await?;
    serve(listener, robot).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn load_items(
    State(state): State<AppState>,
    Json(payload): Json<LoadItemsRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .robot
        .load_items(payload.items)
        .await
        .map_err(map_sorting_error)?;
    Ok(Json(serde_json::json!({})))
}

async fn select_item(State(state): State<AppState>) -> ApiResult<Json<SelectItemResponse>> {
    let item = state
        .robot
        .select_item()
        .await
        .map_err(map_sorting_error)?;
    Ok(Json(SelectItemResponse { item }))
}

async fn move_item(
    State(state): State<AppState>,
    Json(payload): Json<MoveItemRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .robot
        .move_item(&payload.cubby.id)
        .await
        .map_err(map_sorting_error)?;
    Ok(Json(serde_json::json!({})))
}

async fn create_cubby(
    State(state): State<AppState>,
    Json(payload): Json<CreateCubbyRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .robot
        .create_cubby(&payload.id, payload.capacity)
        .await
        .map_err(map_sorting_error)?;
    Ok(Json(serde_json::json!({})))
}

async fn snapshot(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let snapshot = state.robot.snapshot().await.map_err(map_sorting_error)?;
    Ok(Json(snapshot))
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        c if c.is_state_conflict() => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn map_sorting_error(err: SortingError) -> (StatusCode, Json<ErrorBody>) {
    (status_for(err.code()), Json(ErrorBody::from_error(&err)))
}
