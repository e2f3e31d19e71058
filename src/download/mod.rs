//! The hand-off to whatever actually moves the bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Result;

pub mod wget;

pub use wget::Wget;

/// Where the API token travels on the download request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// `token=` query parameter on the download URL.
    #[default]
    Query,
    /// `Authorization: Bearer` header; the URL carries no secret.
    Header,
}

/// One file transfer for the external tool to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub output_dir: Option<PathBuf>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), headers: Vec::new(), output_dir: None }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// URL safe to log: the `token` query value is masked.
    pub fn redacted_url(&self) -> String {
        let Some((base, query)) = self.url.split_once('?') else { return self.url.clone() };
        let query = query
            .split('&')
            .map(|pair| if pair.starts_with("token=") { "token=***" } else { pair })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", base, query)
    }
}

#[async_trait]
pub trait DownloadTool: Send + Sync {
    /// Performs the transfer, saving under the server-suggested filename.
    async fn fetch(&self, request: &DownloadRequest) -> Result<()>;

    fn name(&self) -> &'static str;
}
