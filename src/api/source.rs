//! Debug payload source trait

use super::FetchError;
use crate::models::{DebugPayload, ResourceTarget};
use async_trait::async_trait;

/// Something that can produce the debug payload for a resource
#[async_trait]
pub trait DebugSource: Send + Sync {
    /// Fetch the focal resource, its events and its related resources
    async fn fetch_debug(
        &self,
        namespace: &str,
        target: &ResourceTarget,
    ) -> Result<DebugPayload, FetchError>;

    /// Get source type name
    fn source_type(&self) -> &str;
}
