use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use std::sync::Arc;

use crate::assets::AssetStore;
use crate::portrait::PortraitBuilder;
use crate::renderer::encode_png;
use crate::request::QueryParams;
use crate::{Character, PortraitError, PortraitRequest, RequestError};

const PNG_CONTENT_TYPE: &str = "image/png";

#[derive(Clone)]
pub struct AppState {
    pub assets: Arc<AssetStore>,
}

impl AppState {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create", any(create_portrait))
        .route("/characters", get(characters))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn characters() -> impl IntoResponse {
    Json(Character::all())
}

pub async fn create_portrait(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed);
    }
    let Query(pairs) = query.map_err(|e| AppError::MalformedQuery(e.body_text()))?;
    let (request, character) = PortraitRequest::from_query(&QueryParams::from(pairs))?;

    tracing::info!(
        char = %request.character,
        gear_level = request.gear_level,
        relic_level = request.relic_level,
        zetas = request.zetas,
        omicrons = request.omicrons,
        level = request.level,
        "building portrait"
    );

    let assets = Arc::clone(&state.assets);
    let png = tokio::task::spawn_blocking(move || render(&assets, &request, character))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(([(header::CONTENT_TYPE, PNG_CONTENT_TYPE)], png).into_response())
}

fn render(
    assets: &AssetStore,
    request: &PortraitRequest,
    character: &Character,
) -> Result<Vec<u8>, AppError> {
    let image = PortraitBuilder::new(assets)
        .build(request, character)
        .map_err(AppError::Build)?;
    encode_png(&image).map_err(AppError::Encode)
}

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    MalformedQuery(String),
    BadRequest(RequestError),
    Build(PortraitError),
    Encode(PortraitError),
    Internal(String),
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        tracing::warn!(error = %err, "rejected portrait request");
        AppError::BadRequest(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Only GET method is allowed".to_string(),
            ),
            AppError::MalformedQuery(msg) => {
                tracing::warn!(error = %msg, "malformed query string");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Build(err) => {
                tracing::error!(error = %err, "portrait build failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create portrait: {err}"),
                )
            }
            AppError::Encode(err) => {
                tracing::error!(error = %err, "portrait encode failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to encode image: {err}"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create portrait: {msg}"),
                )
            }
        };

        // Plain-text bodies end with a newline.
        (status, format!("{message}\n")).into_response()
    }
}
