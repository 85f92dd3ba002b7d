// src/api/routes.rs
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{ImageUpload, Memo, MemoDraft, MemoPatch};
use crate::infrastructure::media;

use super::error::ApiError;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/memos", get(list_memos).post(create_memo))
        .route(
            "/api/memos/{id}",
            get(get_memo).put(update_memo).delete(delete_memo),
        )
        .route("/api/memos/{id}/toggle-alarm", post(toggle_alarm))
        .route("/api/upload-image", post(upload_image))
        .route("/api/upload-base64-image", post(upload_base64_image))
        .route("/api/images/{filename}", get(get_image))
        // Base64 payloads inflate by 4/3, so the body limit must sit above
        // the stored-image cap for captures right at the maximum size.
        .layer(DefaultBodyLimit::max(2 * crate::constants::MAX_IMAGE_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "time-notes-api" }))
}

async fn list_memos(State(state): State<AppState>) -> Result<Json<Vec<Memo>>, ApiError> {
    let memos = state.memos.lock().await.list()?;
    Ok(Json(memos))
}

async fn create_memo(
    State(state): State<AppState>,
    Json(draft): Json<MemoDraft>,
) -> Result<Json<Memo>, ApiError> {
    let memo = state.memos.lock().await.create(draft)?;
    debug!(memo_id = %memo.id, "Created memo");
    Ok(Json(memo))
}

async fn get_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Memo>, ApiError> {
    let memo = state.memos.lock().await.get(&id)?;
    Ok(Json(memo))
}

async fn update_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MemoPatch>,
) -> Result<Json<Memo>, ApiError> {
    let memo = state.memos.lock().await.update(&id, patch)?;
    Ok(Json(memo))
}

async fn delete_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // Look the memo up first so its image can be cleaned up afterwards.
    let image = {
        let mut memos = state.memos.lock().await;
        let memo = memos.get(&id)?;
        memos.delete(&id)?;
        memo.image
    };
    if let Some(filename) = image {
        if !state.media.delete(&filename) {
            warn!(%filename, "Image file for deleted memo was already gone");
        }
    }
    Ok(Json(json!({ "message": "Memo deleted successfully" })))
}

async fn toggle_alarm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Memo>, ApiError> {
    let memo = state.memos.lock().await.toggle_alarm(&id)?;
    debug!(memo_id = %memo.id, enabled = memo.alarm.enabled, "Toggled alarm");
    Ok(Json(memo))
}

async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageUpload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Upload is missing a filename".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
        let stored = state.media.save_upload(&filename, &bytes)?;
        return Ok(Json(ImageUpload {
            url: format!("/api/images/{stored}"),
            filename: stored,
        }));
    }
    Err(ApiError::BadRequest("No file field in upload".to_string()))
}

async fn upload_base64_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageUpload>, ApiError> {
    let mut image_data: Option<String> = None;
    let mut filename = "image.jpg".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
        match name.as_deref() {
            Some("image_data") => image_data = Some(value),
            Some("filename") => filename = value,
            _ => {}
        }
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image_data field".to_string()))?;
    let stored = state.media.save_base64(&image_data, &filename)?;
    Ok(Json(ImageUpload {
        url: format!("/api/images/{stored}"),
        filename: stored,
    }))
}

async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let path = state
        .media
        .path_of(&filename)
        .ok_or_else(|| ApiError::NotFound("Image not found".to_string()))?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read image: {e}")))?;
    Ok((
        [(header::CONTENT_TYPE, media::content_type_of(&filename))],
        bytes,
    ))
}
