use crate::{
    dto::images::{ImageActionRequest, ImageUploadResponse},
    error::{AppError, AppResult},
    images::{ImageSet, ImageUpload},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn upload_images(
    state: &AppState,
    user: &AuthUser,
    code: &str,
    images: ImageSet,
    files: Vec<ImageUpload>,
) -> AppResult<ApiResponse<ImageUploadResponse>> {
    ensure_admin(user)?;
    let mut images = images.validated()?;
    if files.is_empty() {
        return Err(AppError::BadRequest("no files to upload".into()));
    }

    let report = images.upload(state.storage.as_ref(), code, files).await;
    let message = format!("{} image(s) uploaded successfully", report.success_count());

    Ok(ApiResponse::success(
        message,
        ImageUploadResponse {
            state: images,
            report,
        },
        Some(Meta::empty()),
    ))
}

pub async fn remove_image(
    state: &AppState,
    user: &AuthUser,
    payload: ImageActionRequest,
) -> AppResult<ApiResponse<ImageSet>> {
    ensure_admin(user)?;
    let ImageActionRequest { state: staged, url } = payload;
    let mut images = staged.validated()?;
    images.remove(state.storage.as_ref(), &url).await;
    Ok(ApiResponse::success("Image removed", images, Some(Meta::empty())))
}

pub fn set_primary(user: &AuthUser, payload: ImageActionRequest) -> AppResult<ApiResponse<ImageSet>> {
    ensure_admin(user)?;
    let ImageActionRequest { state: staged, url } = payload;
    let mut images = staged.validated()?;
    images.set_primary(&url)?;
    Ok(ApiResponse::success("Primary image set", images, Some(Meta::empty())))
}
