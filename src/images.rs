//! Staged image set of a product edit session.
//!
//! The set is held by the client while the product dialog is open and only
//! reaches the database when the product itself is saved. Uploads and
//! deletions act on the object store immediately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Product,
    storage::ObjectStore,
};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageSet {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub primary_image_url: Option<String>,
}

/// A file received from the browser, by drop or by file picker.
///
/// `size` is the number of bytes the client sent. For an oversized file the
/// body is not kept and `bytes` is empty.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size: bytes.len(),
            bytes,
        }
    }

    pub fn oversized(file_name: impl Into<String>, content_type: impl Into<String>, size: usize) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
            bytes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn success_count(&self) -> usize {
        self.uploaded.len()
    }
}

impl ImageSet {
    pub fn new(images: Vec<String>, primary_image_url: Option<String>) -> Self {
        let primary_image_url = if images.is_empty() {
            None
        } else {
            primary_image_url
        };
        Self {
            images,
            primary_image_url,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self::new(product.images.clone(), product.primary_image_url.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Normalize a set received from a client. An empty set loses its
    /// primary; a primary that is not one of the images is rejected.
    pub fn validated(self) -> AppResult<Self> {
        let set = Self::new(self.images, self.primary_image_url);
        if let Some(primary) = &set.primary_image_url {
            if !set.images.contains(primary) {
                return Err(AppError::ImageNotInSet(primary.clone()));
            }
        }
        Ok(set)
    }

    /// Validate and store each file in turn, appending the URIs that made it.
    ///
    /// A rejected or failed file does not stop the rest of the batch.
    pub async fn upload(
        &mut self,
        store: &dyn ObjectStore,
        product_code: &str,
        files: Vec<ImageUpload>,
    ) -> UploadReport {
        let mut report = UploadReport::default();

        for file in files {
            let file_name = file.file_name.clone();
            match store_one(store, product_code, file).await {
                Ok(url) => report.uploaded.push(url),
                Err(err) => {
                    tracing::warn!(file = %file_name, error = %err, "image upload rejected");
                    report.failures.push(UploadFailure {
                        file_name,
                        error: err.to_string(),
                    });
                }
            }
        }

        if self.primary_image_url.is_none() {
            self.primary_image_url = report.uploaded.first().cloned();
        }
        self.images.extend(report.uploaded.iter().cloned());

        tracing::info!(
            uploaded = report.success_count(),
            failed = report.failures.len(),
            "image upload finished"
        );
        report
    }

    /// Drop `url` from the set. The stored object is removed on a best-effort
    /// basis; the set changes even when that removal fails.
    pub async fn remove(&mut self, store: &dyn ObjectStore, url: &str) {
        match key_from_url(url) {
            Some(key) => {
                if let Err(err) = store.remove(&[key.to_string()]).await {
                    tracing::warn!(url, error = %err, "failed to remove stored image");
                }
            }
            None => tracing::warn!(url, "image url has no storage key"),
        }

        self.images.retain(|u| u != url);

        if self.primary_image_url.as_deref() == Some(url) {
            self.primary_image_url = self.images.first().cloned();
        }
    }

    pub fn set_primary(&mut self, url: &str) -> AppResult<()> {
        if !self.images.iter().any(|u| u == url) {
            return Err(AppError::ImageNotInSet(url.to_string()));
        }
        self.primary_image_url = Some(url.to_string());
        Ok(())
    }
}

pub fn check_upload(file: &ImageUpload) -> AppResult<()> {
    if !file.content_type.starts_with("image/") {
        return Err(AppError::NotAnImage(file.file_name.clone()));
    }
    if file.size > MAX_IMAGE_BYTES {
        return Err(AppError::FileTooLarge {
            file: file.file_name.clone(),
            size: file.size,
        });
    }
    Ok(())
}

async fn store_one(store: &dyn ObjectStore, product_code: &str, file: ImageUpload) -> AppResult<String> {
    check_upload(&file)?;
    let key = storage_key(product_code, &file.file_name, Utc::now());
    store
        .put(&key, file.bytes, &file.content_type)
        .await
        .map_err(|err| AppError::UploadFailed {
            file: file.file_name.clone(),
            reason: err.to_string(),
        })?;
    Ok(store.public_url(&key))
}

/// `<code>-<unix millis>-<random>.<ext>`, keeping the original extension.
pub fn storage_key(product_code: &str, file_name: &str, now: DateTime<Utc>) -> String {
    let code: String = product_code
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect();
    let code = if code.is_empty() { "product".to_string() } else { code };

    let suffix = Uuid::new_v4().simple().to_string();
    let mut key = format!("{}-{}-{}", code, now.timestamp_millis(), &suffix[..8]);

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = extension {
        key.push('.');
        key.push_str(&ext.to_ascii_lowercase());
    }
    key
}

/// The storage key is the last path segment of the public URL.
pub fn key_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}
