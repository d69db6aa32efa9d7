//! File debug source (for offline inspection and testing)

use super::{DebugSource, FetchError};
use crate::models::{DebugPayload, ResourceTarget};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File debug source
///
/// Reads debug payloads from local JSON files. The path is either a single
/// payload file, which only answers for the resource it describes, or a
/// directory laid out as `<dir>/<type>/<name>.json`.
pub struct FileDebugSource {
    path: PathBuf,
}

impl FileDebugSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        tracing::debug!("Created file debug source: {:?}", path);

        Self { path }
    }

    fn payload_path(&self, target: &ResourceTarget) -> PathBuf {
        if self.path.is_dir() {
            self.path
                .join(target.kind.as_str())
                .join(format!("{}.json", target.name))
        } else {
            self.path.clone()
        }
    }
}

/// Read and decode one payload file
pub async fn read_payload(path: &Path) -> Result<DebugPayload, FetchError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    serde_json::from_str(&content).map_err(|e| FetchError::Decode {
        origin: path.display().to_string(),
        source: e,
    })
}

#[async_trait]
impl DebugSource for FileDebugSource {
    async fn fetch_debug(
        &self,
        _namespace: &str,
        target: &ResourceTarget,
    ) -> Result<DebugPayload, FetchError> {
        let path = self.payload_path(target);
        tracing::debug!("Reading debug payload for {} from {:?}", target, path);

        if !path.exists() {
            return Err(FetchError::NotFound(target.to_string()));
        }

        let payload = read_payload(&path).await?;

        if payload.name != target.name || payload.focal_kind() != Some(target.kind) {
            return Err(FetchError::NotFound(target.to_string()));
        }

        Ok(payload)
    }

    fn source_type(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;

    const SERVICE_PAYLOAD: &str = r#"{
        "type": "Service",
        "name": "svc1",
        "details": {"clusterIP": "10.0.0.1"},
        "related": {"Pods": [{"name": "web-0"}]}
    }"#;

    #[tokio::test]
    async fn test_single_file_answers_for_its_resource() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SERVICE_PAYLOAD).unwrap();
        let source = FileDebugSource::new(file.path());

        let payload = source
            .fetch_debug("default", &ResourceTarget::new(ResourceKind::Service, "svc1"))
            .await
            .unwrap();
        assert_eq!(payload.related.pods.len(), 1);

        let err = source
            .fetch_debug("default", &ResourceTarget::new(ResourceKind::Pod, "web-0"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("service")).unwrap();
        std::fs::write(dir.path().join("service").join("svc1.json"), SERVICE_PAYLOAD).unwrap();
        let source = FileDebugSource::new(dir.path());

        let payload = source
            .fetch_debug("default", &ResourceTarget::new(ResourceKind::Service, "svc1"))
            .await
            .unwrap();
        assert_eq!(payload.name, "svc1");

        let err = source
            .fetch_debug("default", &ResourceTarget::new(ResourceKind::Secret, "nope"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{not json").unwrap();
        let source = FileDebugSource::new(file.path());

        let err = source
            .fetch_debug("default", &ResourceTarget::new(ResourceKind::Service, "svc1"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
