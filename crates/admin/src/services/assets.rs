//! Image upload to the external asset host.
//!
//! The host accepts a multipart POST with the file bytes and an
//! upload-preset token and answers with the hosted URL. Uploads happen
//! before the catalog document is written; a failed upload aborts the save.

use std::sync::Arc;

use reqwest::multipart;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::AssetHostConfig;

/// Errors from asset uploads.
#[derive(Debug, Error)]
pub enum AssetError {
    /// HTTP transport failure.
    #[error("asset upload failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Asset host rejected the upload.
    #[error("asset host error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("failed to parse asset response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the asset host.
#[derive(Clone)]
pub struct AssetClient {
    inner: Arc<AssetClientInner>,
}

struct AssetClientInner {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    /// Hosted URL of the uploaded image.
    url: String,
}

impl AssetClient {
    /// Create a new asset host client.
    #[must_use]
    pub fn new(config: &AssetHostConfig) -> Self {
        Self {
            inner: Arc::new(AssetClientInner {
                client: reqwest::Client::new(),
                upload_url: config.upload_url.clone(),
                upload_preset: config.upload_preset.expose_secret().to_string(),
            }),
        }
    }

    /// Upload image bytes and return the hosted URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the host rejects the
    /// upload, or the response carries no URL.
    #[instrument(skip(self, bytes), fields(file_name, size = bytes.len()))]
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("upload_preset", self.inner.upload_preset.clone())
            .part("file", part);

        let response = self
            .inner
            .client
            .post(&self.inner.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message: String = text.chars().take(200).collect();
            error!(status = status.as_u16(), %message, "asset upload rejected");
            return Err(AssetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = serde_json::from_str(&text)?;
        info!(url = %uploaded.url, "image uploaded");
        Ok(uploaded.url)
    }
}
