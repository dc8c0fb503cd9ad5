use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Failed to fetch {0}")]
    FetchFailed(String),

    #[error("{0}")]
    SaveFailed(String),

    #[error("{0}")]
    DeleteFailed(String),

    #[error("Delete must be confirmed")]
    ConfirmationRequired,

    #[error("Invalid parent category: {0}")]
    InvalidParentReference(String),

    #[error("Invalid product category: {0}")]
    InvalidCategoryReference(String),

    #[error("{field} must be a whole number of zero or more")]
    InvalidQuantity { field: &'static str },

    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str },

    #[error("{0} is not a hex color code")]
    InvalidColor(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} is not an image")]
    NotAnImage(String),

    #[error("{file} is larger than 5MB")]
    FileTooLarge { file: String, size: usize },

    #[error("Failed to upload {file}: {reason}")]
    UploadFailed { file: String, reason: String },

    #[error("Image is not part of this product: {0}")]
    ImageNotInSet(String),

    #[error("Please fill in all fields")]
    MissingCredentials,

    #[error("{0}")]
    AuthFailed(String),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn fetch_failed(what: &'static str) -> impl FnOnce(sea_orm::DbErr) -> AppError {
        move |err| {
            tracing::error!(error = %err, what, "fetch failed");
            AppError::FetchFailed(what.to_string())
        }
    }

    pub fn save_failed(err: sea_orm::DbErr) -> AppError {
        AppError::SaveFailed(err.to_string())
    }

    pub fn delete_failed(err: sea_orm::DbErr) -> AppError {
        AppError::DeleteFailed(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized
            | AppError::MissingCredentials
            | AppError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotAnImage(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::SaveFailed(_) | AppError::DeleteFailed(_) => StatusCode::CONFLICT,
            AppError::FetchFailed(_)
            | AppError::UploadFailed { .. }
            | AppError::OrmError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_)
            | AppError::ConfirmationRequired
            | AppError::InvalidParentReference(_)
            | AppError::InvalidCategoryReference(_)
            | AppError::InvalidQuantity { .. }
            | AppError::InvalidNumber { .. }
            | AppError::InvalidColor(_)
            | AppError::MissingField(_)
            | AppError::ImageNotInSet(_) => StatusCode::BAD_REQUEST,
        };

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
