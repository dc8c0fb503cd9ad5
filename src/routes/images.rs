use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{Field, MultipartError},
    },
    routing::post,
};

use crate::{
    dto::images::{ImageActionRequest, ImageUploadForm, ImageUploadResponse},
    error::{AppError, AppResult},
    images::{ImageSet, ImageUpload, MAX_IMAGE_BYTES},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::image_service,
    state::AppState,
};

/// Transport cap for one upload request. Individual files are checked
/// against `MAX_IMAGE_BYTES` while they stream in.
pub const UPLOAD_BODY_LIMIT: usize = 20 * MAX_IMAGE_BYTES;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_images))
        .route("/remove", post(remove_image))
        .route("/primary", post(set_primary))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[utoipa::path(
    post,
    path = "/api/images/upload",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload images; failed files are listed in the report", body = ApiResponse<ImageUploadResponse>),
        (status = 400, description = "Malformed multipart body"),
    ),
    security(("bearer_auth" = [])),
    tag = "Images"
)]
pub async fn upload_images(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<ImageUploadResponse>>> {
    let mut code = String::new();
    let mut images = ImageSet::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(bad_multipart)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "code" => {
                code = field
                    .text()
                    .await
                    .map_err(bad_multipart)?;
            }
            "state" => {
                let raw = field
                    .text()
                    .await
                    .map_err(bad_multipart)?;
                images = serde_json::from_str(&raw)
                    .map_err(|e| AppError::BadRequest(format!("invalid image state: {e}")))?;
            }
            "files" | "files[]" | "file" => files.push(read_file(field).await?),
            other => tracing::debug!(field = other, "ignoring multipart field"),
        }
    }

    let resp = image_service::upload_images(&state, &user, &code, images, files).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/images/remove",
    request_body = ImageActionRequest,
    responses(
        (status = 200, description = "Image removed from the staged set", body = ApiResponse<ImageSet>),
    ),
    security(("bearer_auth" = [])),
    tag = "Images"
)]
pub async fn remove_image(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ImageActionRequest>,
) -> AppResult<Json<ApiResponse<ImageSet>>> {
    let resp = image_service::remove_image(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/images/primary",
    request_body = ImageActionRequest,
    responses(
        (status = 200, description = "Primary image reassigned", body = ApiResponse<ImageSet>),
        (status = 400, description = "Image is not part of the set"),
    ),
    security(("bearer_auth" = [])),
    tag = "Images"
)]
pub async fn set_primary(
    user: AuthUser,
    Json(payload): Json<ImageActionRequest>,
) -> AppResult<Json<ApiResponse<ImageSet>>> {
    let resp = image_service::set_primary(&user, payload)?;
    Ok(Json(resp))
}

/// Buffer one file field. Once it grows past `MAX_IMAGE_BYTES` the body is
/// discarded and only its size is kept, so it is still reported per file.
async fn read_file(mut field: Field<'_>) -> AppResult<ImageUpload> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut bytes = Vec::new();
    let mut size = 0usize;
    while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
        size += chunk.len();
        if size <= MAX_IMAGE_BYTES {
            bytes.extend_from_slice(&chunk);
        } else if !bytes.is_empty() {
            bytes = Vec::new();
        }
    }

    if size > MAX_IMAGE_BYTES {
        tracing::debug!(file = %file_name, size, "oversized upload discarded");
        return Ok(ImageUpload::oversized(file_name, content_type, size));
    }
    Ok(ImageUpload::new(file_name, content_type, bytes))
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
