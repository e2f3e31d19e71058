use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

use super::{DownloadRequest, DownloadTool};
use crate::{FetchError, Result};

/// Runs the external `wget` binary. Its progress output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct Wget {
    binary_path: PathBuf,
}

impl Wget {
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Looks `wget` up on `PATH`.
    pub fn from_path() -> Option<Self> {
        which::which("wget").ok().map(Self::new)
    }

    /// `PATH` lookup, or the bare name so spawning reports the failure.
    pub fn discover() -> Self {
        Self::from_path().unwrap_or_else(|| Self::new(PathBuf::from("wget")))
    }

    fn args(request: &DownloadRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![request.url.clone().into(), "--content-disposition".into()];
        if let Some(dir) = &request.output_dir {
            let mut arg = OsString::from("--directory-prefix=");
            arg.push(dir);
            args.push(arg);
        }
        for (name, value) in &request.headers {
            args.push(format!("--header={}: {}", name, value).into());
        }
        args
    }
}

#[async_trait]
impl DownloadTool for Wget {
    async fn fetch(&self, request: &DownloadRequest) -> Result<()> {
        debug!(binary = %self.binary_path.display(), url = %request.redacted_url(), "spawning download tool");
        let status = Command::new(&self.binary_path)
            .args(Self::args(request))
            .status()
            .await
            .map_err(|e| FetchError::DownloadFailed(format!("failed to execute {}: {}", self.binary_path.display(), e)))?;

        if !status.success() {
            return Err(FetchError::DownloadFailed(format!("wget exited with {}", status)));
        }
        info!("download finished");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "wget"
    }
}
