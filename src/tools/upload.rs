use super::{parse_args, Tool};
use crate::client::TradingClient;
use crate::error::ClientError;
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;
use url::Url;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Largest remote image the tool will download.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn too_large() -> ClientError {
    ClientError::InvalidInput(format!(
        "image is larger than the {} byte limit",
        MAX_IMAGE_BYTES
    ))
}

#[derive(Deserialize)]
pub struct UploadImageRequest {
    pub file_path: Option<String>,
    pub image_url: Option<String>,
    pub filename: Option<String>,
}

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(String),
    Remote(Url),
}

impl UploadImageRequest {
    pub fn validate(&self) -> Result<ImageSource, ClientError> {
        match (self.file_path.as_deref(), self.image_url.as_deref()) {
            (Some(path), None) if !path.trim().is_empty() => Ok(ImageSource::File(path.to_string())),
            (None, Some(url)) => Url::parse(url)
                .map(ImageSource::Remote)
                .map_err(|e| ClientError::InvalidInput(format!("invalid image_url: {}", e))),
            _ => Err(ClientError::InvalidInput(
                "exactly one of file_path or image_url is required".into(),
            )),
        }
    }
}

/// Guess a content type from a file name's extension.
pub fn mime_from_name(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}

fn name_from_path(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("image")
        .to_string()
}

async fn read_source(source: &ImageSource) -> Result<(Vec<u8>, String, String)> {
    match source {
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path))?;
            let name = name_from_path(path);
            let mime = mime_from_name(&name).to_string();
            Ok((bytes, name, mime))
        }
        ImageSource::Remote(url) => {
            debug!("Downloading image from {}", url);
            let mut response = reqwest::get(url.clone())
                .await
                .map_err(|e| ClientError::RemoteEndpoint(format!("image download failed: {}", e)))?;
            if !response.status().is_success() {
                return Err(ClientError::RemoteEndpoint(format!(
                    "image download returned {}",
                    response.status()
                ))
                .into());
            }
            if let Some(len) = response.content_length() {
                if len > MAX_IMAGE_BYTES as u64 {
                    return Err(too_large().into());
                }
            }
            let name = name_from_path(url.path());
            let mime = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
                .unwrap_or_else(|| mime_from_name(&name).to_string());

            // Content-Length may be absent or wrong; enforce the limit while reading.
            let mut bytes = Vec::new();
            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| ClientError::RemoteEndpoint(format!("image download failed: {}", e)))?
            {
                if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                    return Err(too_large().into());
                }
                bytes.extend_from_slice(&chunk);
            }
            Ok((bytes, name, mime))
        }
    }
}

pub struct UploadImageTool;

#[async_trait::async_trait]
impl Tool for UploadImageTool {
    fn name(&self) -> &'static str {
        "upload-image"
    }

    fn description(&self) -> &'static str {
        "Upload an image from a local file or a URL and return its hosted URL, for use as a token image"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of a local image file"
                },
                "image_url": {
                    "type": "string",
                    "description": "URL of an image to download and re-upload"
                },
                "filename": {
                    "type": "string",
                    "description": "Optional file name to store the image under"
                }
            }
        })
    }

    async fn call(&self, client: &TradingClient, args: Value) -> Result<Value> {
        let request = parse_args::<UploadImageRequest>(args)?;
        let source = request.validate()?;
        let (bytes, detected_name, mime) = read_source(&source).await?;
        let filename = request
            .filename
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(detected_name);
        let size = bytes.len();

        let url = client
            .upload_image(bytes, &filename, &mime)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Image upload failed: the upload endpoint did not return a URL"))?;

        Ok(json!({
            "url": url,
            "filename": filename,
            "content_type": mime,
            "size": size
        }))
    }
}
