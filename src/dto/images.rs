use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::images::{ImageSet, UploadReport};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageActionRequest {
    #[serde(flatten)]
    pub state: ImageSet,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    #[serde(flatten)]
    pub state: ImageSet,
    pub report: UploadReport,
}

/// Multipart body of an upload: a `code` text part, an optional `state`
/// JSON part holding the current image set, and one or more `files` parts.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    pub code: String,
    #[schema(value_type = Option<ImageSet>)]
    pub state: Option<String>,
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}
