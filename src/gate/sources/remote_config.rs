//! Operator-controlled remote config source
//!
//! Fetches the update policy from a backend endpoint the operator controls.
//! Unlike the store catalog, this source can demand a forced update via
//! `minRequiredVersion`.

use serde::Deserialize;
use tracing::warn;

use crate::gate::error::SourceError;
use crate::gate::semver::SemanticVersion;
use crate::gate::source::MetadataSource;
use crate::gate::sources::http_client;
use crate::gate::types::UpdateMetadata;

/// Response from the remote config endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteConfigResponse {
    latest_version: String,
    min_required_version: String,
    #[serde(default)]
    store_url: Option<String>,
}

/// Source implementation for an operator-controlled config endpoint
pub struct RemoteConfigSource {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteConfigSource {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: http_client(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MetadataSource for RemoteConfigSource {
    fn name(&self) -> &'static str {
        "remote_config"
    }

    async fn fetch(&self) -> Result<UpdateMetadata, SourceError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("remote config returned status {}: {}", status, self.endpoint);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let config: RemoteConfigResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse remote config response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        let mut metadata = UpdateMetadata::new(
            SemanticVersion::parse(&config.latest_version),
            SemanticVersion::parse(&config.min_required_version),
        );
        metadata.store_url = config.store_url;

        Ok(metadata)
    }
}
