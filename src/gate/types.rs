//! Update metadata value type

use crate::gate::semver::SemanticVersion;

/// Update policy as fetched from a remote source.
///
/// Built fresh on every fetch, never mutated, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMetadata {
    /// Newest version available to users.
    pub latest: SemanticVersion,
    /// Oldest version still allowed to run.
    pub min_required: SemanticVersion,
    /// Store page to send the user to, when the source knows it.
    pub store_url: Option<String>,
}

impl UpdateMetadata {
    pub fn new(latest: SemanticVersion, min_required: SemanticVersion) -> Self {
        Self {
            latest,
            min_required,
            store_url: None,
        }
    }

    /// Metadata representing "no forced update known".
    pub fn none_known() -> Self {
        Self::new(SemanticVersion::zero(), SemanticVersion::zero())
    }

    pub fn with_store_url(mut self, store_url: impl Into<String>) -> Self {
        self.store_url = Some(store_url.into());
        self
    }

    /// Merge metadata from several sources into a single policy.
    ///
    /// A source may know only part of the policy (the store catalog never
    /// carries a minimum version), so the strictest value wins per field:
    /// the highest `latest`, the highest `min_required`, and the first
    /// available store URL. Returns `None` when no source produced anything.
    pub fn merge(results: impl IntoIterator<Item = UpdateMetadata>) -> Option<UpdateMetadata> {
        results.into_iter().reduce(|mut merged, metadata| {
            if metadata.latest > merged.latest {
                merged.latest = metadata.latest;
            }
            if metadata.min_required > merged.min_required {
                merged.min_required = metadata.min_required;
            }
            if merged.store_url.is_none() {
                merged.store_url = metadata.store_url;
            }
            merged
        })
    }
}
