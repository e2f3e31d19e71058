//! CivitAI REST endpoints: the metadata probe and the download URL.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::DEFAULT_BASE_URL;
use crate::download::{CredentialMode, DownloadRequest};
use crate::model::{ModelId, Token};
use crate::{FetchError, Result};

pub mod types;

pub use types::ModelVersion;

#[derive(Debug, Clone)]
pub struct CivitaiClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CivitaiClient {
    fn default() -> Self { Self::new(DEFAULT_BASE_URL) }
}

impl CivitaiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    pub fn metadata_url(&self, id: &ModelId) -> String {
        format!("{}/api/v1/model-versions/{}", self.base_url, id)
    }

    /// Checks that the model version exists. Only a 200 passes.
    ///
    /// The returned metadata is best effort: a 200 with a body that does not
    /// parse still succeeds, with `None`.
    pub async fn probe(&self, id: &ModelId) -> Result<Option<ModelVersion>> {
        let url = self.metadata_url(id);
        debug!(%url, "probing model metadata");
        let lookup_failed = |reason: String| FetchError::MetadataLookupFailed { model_id: id.to_string(), reason };

        let resp = self.http.get(&url).send().await.map_err(|e| lookup_failed(e.to_string()))?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(lookup_failed(format!("HTTP {}", status)));
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "could not read metadata body");
                return Ok(None);
            }
        };
        match serde_json::from_str::<ModelVersion>(&body) {
            Ok(mv) => Ok(Some(mv)),
            Err(e) => {
                warn!(error = %e, "metadata body is not the expected JSON");
                Ok(None)
            }
        }
    }

    pub fn download_url(&self, id: &ModelId, token: Option<&Token>) -> String {
        let mut url = format!("{}/api/download/models/{}?type=Model&format=SafeTensor", self.base_url, id);
        if let Some(token) = token {
            url.push_str("&token=");
            url.push_str(token.expose());
        }
        url
    }

    pub fn download_request(&self, id: &ModelId, token: &Token, mode: CredentialMode) -> DownloadRequest {
        match mode {
            CredentialMode::Query => DownloadRequest::new(self.download_url(id, Some(token))),
            CredentialMode::Header => DownloadRequest::new(self.download_url(id, None))
                .with_header("Authorization", format!("Bearer {}", token.expose())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn id(s: &str) -> ModelId { ModelId::parse(s).unwrap() }

    fn token(s: &str) -> Token { Token::resolve_from(Some(s), None).unwrap() }

    #[test]
    fn builds_the_fixed_host_urls() {
        let client = CivitaiClient::default();
        assert_eq!(client.metadata_url(&id("4201")), "https://civitai.com/api/v1/model-versions/4201");
        assert_eq!(
            client.download_url(&id("4201"), Some(&token("abc"))),
            "https://civitai.com/api/download/models/4201?type=Model&format=SafeTensor&token=abc"
        );
    }

    #[test]
    fn token_is_interpolated_verbatim() {
        let client = CivitaiClient::new("https://civitai.com/");
        let req = client.download_request(&id("7"), &token("a+b/c=="), CredentialMode::Query);
        assert_eq!(req.url, "https://civitai.com/api/download/models/7?type=Model&format=SafeTensor&token=a+b/c==");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn header_mode_keeps_the_token_out_of_the_url() {
        let client = CivitaiClient::default();
        let req = client.download_request(&id("7"), &token("abc"), CredentialMode::Header);
        assert_eq!(req.url, "https://civitai.com/api/download/models/7?type=Model&format=SafeTensor");
        assert_eq!(req.headers, vec![("Authorization".to_string(), "Bearer abc".to_string())]);
    }

    #[tokio::test]
    async fn probe_succeeds_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/model-versions/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":42,"name":"v2","model":{"name":"Foo"}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let mv = CivitaiClient::new(server.uri()).probe(&id("42")).await.unwrap().unwrap();
        assert_eq!(mv.display_name().as_deref(), Some("Foo / v2"));
    }

    #[tokio::test]
    async fn probe_accepts_unparseable_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/model-versions/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        assert!(CivitaiClient::new(server.uri()).probe(&id("42")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn probe_fails_on_non_200() {
        let server = MockServer::start().await;
        for (model, status) in [("1", 404), ("2", 500), ("3", 204)] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/model-versions/{}", model)))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }

        let client = CivitaiClient::new(server.uri());
        for (model, status) in [("1", "404"), ("2", "500"), ("3", "204")] {
            match client.probe(&id(model)).await {
                Err(FetchError::MetadataLookupFailed { model_id, reason }) => {
                    assert_eq!(model_id, model);
                    assert!(reason.contains(status), "{reason}");
                }
                other => panic!("expected lookup failure, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn probe_fails_when_unreachable() {
        let err = CivitaiClient::new("http://127.0.0.1:1").probe(&id("5")).await.unwrap_err();
        assert!(matches!(err, FetchError::MetadataLookupFailed { .. }));
    }
}
