use thiserror::Error;

/// Every way a fetch can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("model ID must be numeric (got {0:?}).")]
    InvalidInput(String),

    #[error("no token provided. Set the '{env_var}' environment variable or use --token.")]
    MissingCredential { env_var: String },

    #[error("failed to retrieve model metadata for {model_id}: {reason}")]
    MetadataLookupFailed { model_id: String, reason: String },

    #[error("download failed: {0}")]
    DownloadFailed(String),
}
