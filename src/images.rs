//! S3-backed image management.
//!
//! Admin CMS assets (instructor photos, banners, gallery shots) live in an
//! S3 bucket fronted by the backend's image endpoints. Object keys contain
//! Korean path segments, and files uploaded from macOS are stored under
//! NFD-decomposed names; keys and folders sent to `list`/`delete` (and
//! every public URL built here) are therefore normalized to NFD first.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::client::ApiClient;
use crate::error::Result;

/// Normalize a string to NFD (decomposed form).
pub fn to_nfd(s: &str) -> String {
    s.nfd().collect()
}

/// Build the public S3 URL for an image path.
///
/// Absolute `http(s)` paths pass through untouched. Everything else is
/// NFD-normalized and percent-encoded, keeping `/` as a path separator.
pub fn s3_image_url(s3_base_url: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }
    let encoded = urlencoding::encode(&to_nfd(path)).replace("%2F", "/");
    format!("{}/{}", s3_base_url.trim_end_matches('/'), encoded)
}

/// Result of an image upload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUploadResult {
    /// S3 object key (folder-prefixed).
    pub key: String,
    /// Public URL of the uploaded object.
    pub url: String,
}

/// Entry in an image folder listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListItem {
    /// S3 object key.
    pub key: String,
    /// Public URL.
    pub url: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last-modified timestamp (as the backend reports it).
    pub last_modified: String,
}

/// Image endpoint wrappers.
pub struct ImageApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Access the image endpoints.
    pub fn images(&self) -> ImageApi<'_> {
        ImageApi { client: self }
    }
}

impl ImageApi<'_> {
    /// `POST /images/upload` — upload a single image into a folder.
    ///
    /// The folder is forwarded as given; S3-side normalization happens on
    /// the backend.
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        folder: &str,
    ) -> Result<ImageUploadResult> {
        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("folder", folder.to_string());
        let envelope = self
            .client
            .post_multipart::<ImageUploadResult>("images/upload", form)
            .await?;
        tracing::info!(key = %envelope.data.key, "image uploaded");
        Ok(envelope.data)
    }

    /// `POST /images/upload-multiple` — upload several images at once.
    pub async fn upload_multiple(
        &self,
        files: Vec<(String, Vec<u8>)>,
        folder: &str,
    ) -> Result<Vec<ImageUploadResult>> {
        let mut form = Form::new();
        for (file_name, bytes) in files {
            form = form.part("images", Part::bytes(bytes).file_name(file_name));
        }
        form = form.text("folder", folder.to_string());
        let envelope = self
            .client
            .post_multipart::<Vec<ImageUploadResult>>("images/upload-multiple", form)
            .await?;
        Ok(envelope.data)
    }

    /// `GET /images/list?folder&maxKeys` — list a folder's objects.
    pub async fn list(&self, folder: &str, max_keys: u32) -> Result<Vec<ImageListItem>> {
        let query = [
            ("folder", to_nfd(folder)),
            ("maxKeys", max_keys.to_string()),
        ];
        let envelope = self
            .client
            .get_json_query::<Vec<ImageListItem>, _>("images/list", &query)
            .await?;
        Ok(envelope.data)
    }

    /// `DELETE /images?key=` — delete an object by key.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let query = [("key", to_nfd(key))];
        self.client.delete_empty_query("images", &query).await
    }
}
