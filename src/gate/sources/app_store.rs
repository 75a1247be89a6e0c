//! Store catalog lookup source
//!
//! Queries the public app catalog for the newest published version of the
//! app, keyed by its bundle identifier.

use serde::Deserialize;
use tracing::warn;

use crate::gate::error::SourceError;
use crate::gate::semver::SemanticVersion;
use crate::gate::source::MetadataSource;
use crate::gate::sources::http_client;
use crate::gate::types::UpdateMetadata;

/// Default base URL for the store catalog API
const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Response from the catalog lookup API
#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    version: String,
}

/// Source implementation for the public store catalog.
///
/// The catalog only knows the newest published version. It never carries a
/// minimum-required version, so this source contributes no forced-update
/// policy on its own.
pub struct AppStoreSource {
    client: reqwest::Client,
    base_url: String,
    bundle_id: String,
    store_url: Option<String>,
}

impl AppStoreSource {
    /// Creates a new AppStoreSource with a custom base URL.
    ///
    /// `app_id` is the numeric store identifier used to build the store page
    /// URL attached to the fetched metadata; without it no URL is reported.
    pub fn new(base_url: &str, bundle_id: &str, app_id: Option<u64>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bundle_id: bundle_id.to_string(),
            store_url: app_id.map(|id| format!("https://apps.apple.com/app/id{id}")),
        }
    }

    pub fn with_default_base_url(bundle_id: &str, app_id: Option<u64>) -> Self {
        Self::new(DEFAULT_BASE_URL, bundle_id, app_id)
    }
}

#[async_trait::async_trait]
impl MetadataSource for AppStoreSource {
    fn name(&self) -> &'static str {
        "app_store"
    }

    async fn fetch(&self) -> Result<UpdateMetadata, SourceError> {
        let url = format!("{}/lookup", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("bundleId", self.bundle_id.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("store catalog returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse store catalog response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        // An app unknown to the catalog has an empty results array.
        let Some(entry) = lookup.results.first() else {
            return Err(SourceError::NoUpdateInfo);
        };

        let mut metadata = UpdateMetadata::new(
            SemanticVersion::parse(&entry.version),
            SemanticVersion::zero(),
        );
        metadata.store_url = self.store_url.clone();

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn fetch_returns_latest_version_from_first_result() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lookup")
            .match_query(Matcher::UrlEncoded(
                "bundleId".into(),
                "com.example.app".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "resultCount": 1,
                    "results": [
                        { "version": "5.6.22" }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let source = AppStoreSource::new(&server.url(), "com.example.app", Some(1451513467));
        let metadata = source.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(metadata.latest, SemanticVersion::parse("5.6.22"));
        assert!(metadata.min_required.is_zero());
        assert_eq!(
            metadata.store_url.as_deref(),
            Some("https://apps.apple.com/app/id1451513467")
        );
    }

    #[tokio::test]
    async fn fetch_returns_no_update_info_for_empty_results() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lookup")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"resultCount": 0, "results": []}"#)
            .create_async()
            .await;

        let source = AppStoreSource::new(&server.url(), "com.example.unknown", None);
        let result = source.fetch().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::NoUpdateInfo)));
    }

    #[tokio::test]
    async fn fetch_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lookup")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source = AppStoreSource::new(&server.url(), "com.example.app", None);
        let result = source.fetch().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_returns_invalid_response_for_malformed_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/lookup")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let source = AppStoreSource::new(&server.url(), "com.example.app", None);
        let result = source.fetch().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }
}
