// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP API
//!
//! axum router exposing the wardrobe, outfit and weather services.
//!
//! # Architecture
//!
//! - **Layer:** Presentation Layer
//! - **Purpose:** Translate HTTP requests into service calls and errors into status codes
//!
//! Error bodies are always `{"error": "<message>"}`.

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::outfit_service::{
    GenerateOutfitsRequest, OutfitError, OutfitService, SaveOutfitRequest,
};
use crate::application::wardrobe_service::{WardrobeError, WardrobeService};
use crate::application::weather_service::WeatherService;
use crate::domain::attributes::ManualOverrides;
use crate::domain::outfit::{OutfitId, ResolvedItem, SavedOutfit};
use crate::domain::vision::ImageUpload;
use crate::domain::wardrobe::{ClothingItem, ItemId, ItemUpdate};
use crate::domain::weather::WeatherContext;

/// Room left in the request body limit for multipart boundaries, part
/// headers and the small text fields sent next to the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared handler state
pub struct AppState {
    pub wardrobe: Arc<dyn WardrobeService>,
    pub outfits: Arc<dyn OutfitService>,
    pub weather: WeatherService,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// Build the HTTP router
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.uploads_dir);
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/wardrobe", get(list_items_handler))
        .route("/api/wardrobe/upload", post(upload_item_handler))
        .route(
            "/api/wardrobe/{id}",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .route("/api/outfits/generate", post(generate_outfits_handler))
        .route("/api/outfits/save", post(save_outfit_handler))
        .route("/api/outfits/saved", get(list_outfits_handler))
        .route("/api/outfits/saved/{id}", delete(delete_outfit_handler))
        .route("/api/outfits/saved/{id}/items", get(outfit_items_handler))
        .route("/api/weather/{city}", get(weather_handler))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<WardrobeError> for ApiError {
    fn from(e: WardrobeError) -> Self {
        match e {
            WardrobeError::EmptyImage
            | WardrobeError::UnsupportedImage(_)
            | WardrobeError::InvalidOverride(_) => ApiError::BadRequest(e.to_string()),
            WardrobeError::NotFound(_) => ApiError::NotFound("Item not found".to_string()),
            WardrobeError::Storage(_) | WardrobeError::Repository(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<OutfitError> for ApiError {
    fn from(e: OutfitError) -> Self {
        match e {
            OutfitError::EmptyWardrobe => ApiError::BadRequest(e.to_string()),
            OutfitError::NotFound(_) => ApiError::NotFound("Outfit not found".to_string()),
            OutfitError::Repository(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

type ApiResult<T> = Result<T, ApiError>;

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "VibeCraft API running" }))
}

async fn list_items_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ClothingItem>>> {
    Ok(Json(state.wardrobe.list().await?))
}

async fn get_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClothingItem>> {
    Ok(Json(state.wardrobe.get(&ItemId(id)).await?))
}

async fn upload_item_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ClothingItem>)> {
    let mut image = None;
    let mut category = None;
    let mut subcategory = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if bytes.len() > state.max_upload_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "Image exceeds the {} byte upload limit",
                        state.max_upload_bytes
                    )));
                }
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
            "category" => category = Some(field.text().await?),
            "subcategory" => subcategory = Some(field.text().await?),
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("No image file uploaded".to_string()))?;
    let overrides = ManualOverrides::parse(category.as_deref(), subcategory.as_deref())
        .map_err(WardrobeError::from)?;

    let item = state.wardrobe.ingest(image, overrides).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ItemUpdate>, JsonRejection>,
) -> ApiResult<Json<ClothingItem>> {
    let Json(update) = payload?;
    Ok(Json(state.wardrobe.update(&ItemId(id), update).await?))
}

async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.wardrobe.delete(&ItemId(id)).await?;
    Ok(Json(json!({ "message": "Item deleted" })))
}

async fn generate_outfits_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateOutfitsRequest>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(request) = payload?;
    let outfits = state.outfits.generate(request).await?;
    Ok(Json(json!({ "outfits": outfits })))
}

async fn list_outfits_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SavedOutfit>>> {
    Ok(Json(state.outfits.list().await?))
}

async fn save_outfit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveOutfitRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SavedOutfit>)> {
    let Json(request) = payload?;
    let outfit = state.outfits.save(request).await?;
    Ok((StatusCode::CREATED, Json(outfit)))
}

async fn delete_outfit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.outfits.delete(&OutfitId(id)).await?;
    Ok(Json(json!({ "message": "Outfit deleted" })))
}

async fn outfit_items_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ResolvedItem>>> {
    Ok(Json(state.outfits.resolve_items(&OutfitId(id)).await?))
}

async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Json<WeatherContext> {
    Json(state.weather.report(&city).await)
}
