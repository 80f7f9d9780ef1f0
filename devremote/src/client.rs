//! HTTP client for the DevRemote firmware endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::error::Result;
use crate::sanitize::sanitize;

/// Multipart field the DevRemote reads the uploaded file from.
const UPLOAD_FIELD: &str = "file1";

/// Uploads firmware images to a DevRemote and switches it to them.
#[derive(Debug, Clone)]
pub struct DevRemoteClient {
    /// Base URL without trailing slash.
    base_url: String,

    /// HTTP client, shared by every request.
    client: reqwest::Client,
}

impl DevRemoteClient {
    /// Create a client for the DevRemote at `base_url`.
    ///
    /// With `verbose` set, connection-level traffic is logged through
    /// `tracing` at TRACE level.
    pub fn new(base_url: impl Into<String>, verbose: bool) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .connection_verbose(verbose)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload the file at `path` under its sanitized name.
    ///
    /// Returns `Ok(None)` without touching the network when the file does not
    /// exist. A completed request counts as success whatever its status.
    pub async fn upload(&self, path: &Path) -> Result<Option<String>> {
        if !tokio::fs::try_exists(path).await? {
            warn!("File '{}' cant be uploaded", path.display());
            return Ok(None);
        }

        let name = path
            .file_name()
            .map(|n| sanitize(&n.to_string_lossy()))
            .unwrap_or_default();
        let contents = tokio::fs::read(path).await?;
        let part = Part::bytes(contents)
            .file_name(name.clone())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = format!("{}/uploadhex?f=", self.base_url);
        info!("Uploading file {} as {name} to url {url}", path.display());

        let response = self.client.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            warn!("Upload of {name} answered with status {}", response.status());
        }

        Ok(Some(name))
    }

    /// Make the device load `name`, then ask it to refresh its UI.
    pub async fn enable_and_refresh(&self, name: &str) -> Result<()> {
        info!("enabling file {name}");

        let enable_url = format!("{}/enable?file=/{name}", self.base_url);
        let response = self.client.get(&enable_url).send().await?;
        if !response.status().is_success() {
            warn!("Enable of {name} answered with status {}", response.status());
        }

        let refresh_url = format!("{}/trigrefresh", self.base_url);
        let response = self.client.get(&refresh_url).send().await?;
        if !response.status().is_success() {
            warn!("Refresh answered with status {}", response.status());
        }

        Ok(())
    }

    /// Upload `path` and enable it. The enable step is skipped when the file
    /// had vanished before the upload.
    pub async fn deploy(&self, path: &Path) -> Result<Option<String>> {
        let Some(name) = self.upload(path).await? else {
            return Ok(None);
        };

        self.enable_and_refresh(&name).await?;
        Ok(Some(name))
    }
}
