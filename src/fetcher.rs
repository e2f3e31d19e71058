use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::CivitaiClient;
use crate::download::{CredentialMode, DownloadTool};
use crate::model::{ModelId, Token, TOKEN_ENV};
use crate::Result;

/// Validate, probe, download. Each step must succeed before the next runs.
pub struct Fetcher<D: DownloadTool> {
    pub client: CivitaiClient,
    pub tool: D,
    pub token_env: String,
    pub credential_mode: CredentialMode,
    pub output_dir: Option<PathBuf>,
    pub show_progress: bool,
}

impl<D: DownloadTool> Fetcher<D> {
    pub fn new(client: CivitaiClient, tool: D) -> Self {
        Self {
            client,
            tool,
            token_env: TOKEN_ENV.to_string(),
            credential_mode: CredentialMode::default(),
            output_dir: None,
            show_progress: false,
        }
    }

    pub async fn run(&self, model: &str, token: Option<&str>) -> Result<()> {
        let id = ModelId::parse(model)?;
        let token = Token::resolve(token, &self.token_env)?;

        let spinner = self.spinner(&id);
        let probed = self.client.probe(&id).await;
        spinner.finish_and_clear();
        match probed? {
            Some(mv) => {
                let files = mv.file_names().join(", ");
                match mv.display_name() {
                    Some(name) => info!(model = %id, version_id = ?mv.id, %name, %files, "model version found"),
                    None => info!(model = %id, version_id = ?mv.id, %files, "model version found"),
                }
            }
            None => info!(model = %id, "model version found"),
        }

        let request = self
            .client
            .download_request(&id, &token, self.credential_mode)
            .with_output_dir(self.output_dir.clone());
        debug!(tool = self.tool.name(), url = %request.redacted_url(), "starting download");
        self.tool.fetch(&request).await
    }

    fn spinner(&self, id: &ModelId) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Looking up model version {}", id));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
