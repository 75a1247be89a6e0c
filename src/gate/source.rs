//! Source trait for fetching update metadata from remote endpoints

#[cfg(test)]
use mockall::automock;

use crate::gate::error::SourceError;
use crate::gate::types::UpdateMetadata;

/// Trait for fetching update metadata from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short name identifying the source in logs
    fn name(&self) -> &'static str;

    /// Fetches the current update policy from the source
    ///
    /// # Returns
    /// * `Ok(UpdateMetadata)` - The policy as this source knows it
    /// * `Err(SourceError)` - If the fetch fails. The coordinator treats any
    ///   failure as "no update info available" from this source; it is never
    ///   surfaced to the verdict consumer.
    async fn fetch(&self) -> Result<UpdateMetadata, SourceError>;
}
