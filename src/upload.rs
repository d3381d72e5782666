use crate::error::ClientError;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

#[derive(Deserialize)]
struct MetadataResponse {
    hash: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

/// Client for the launchpad's metadata and asset endpoints.
#[derive(Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UploadClient {
    pub fn new(mut base_url: Url) -> Self {
        // `Url::join` drops the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::RemoteEndpoint(format!("bad endpoint {}: {}", path, e)))
    }

    /// `POST /token/metadata`, returning the content hash assigned to `metadata`.
    pub async fn upload_metadata(&self, metadata: &str) -> Result<String, ClientError> {
        let url = self.endpoint("token/metadata")?;
        debug!("Posting token metadata to {}", url);

        let response = self
            .http
            .post(url)
            .json(&json!({ "metadata": metadata }))
            .send()
            .await
            .map_err(|e| ClientError::RemoteEndpoint(format!("metadata request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RemoteEndpoint(format!(
                "metadata endpoint returned {}",
                status
            )));
        }

        let body: MetadataResponse = response
            .json()
            .await
            .map_err(|_| ClientError::RemoteEndpoint("malformed metadata response".into()))?;

        body.hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ClientError::RemoteEndpoint("metadata response has no hash".into()))
    }

    /// `POST /upload?filename=<name>` with `bytes` as the body, returning the asset URL.
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<String, ClientError> {
        let mut url = self.endpoint("upload")?;
        url.query_pairs_mut().append_pair("filename", filename);
        debug!("Uploading {} ({} bytes, {})", filename, bytes.len(), mime_type);

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ClientError::RemoteEndpoint(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RemoteEndpoint(format!(
                "upload endpoint returned {}",
                status
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|_| ClientError::RemoteEndpoint("malformed upload response".into()))?;

        body.url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ClientError::RemoteEndpoint("upload response has no url".into()))
    }
}
