use crate::config::{StateBackend, StateConfig};
use crate::error::{AppError, Result};
use crate::state::{IncidentStore, InMemoryStore, JsonFileStore};
use std::sync::Arc;

/// Create an incident store based on configuration
pub async fn create_store(config: &StateConfig) -> Result<Arc<dyn IncidentStore>> {
    match config.backend {
        StateBackend::JsonFile => {
            let path = config.path.as_ref().ok_or_else(|| {
                AppError::Configuration(
                    "JSON file backend requires 'path' configuration".to_string(),
                )
            })?;

            tracing::info!(path = ?path, "Initializing JSON file storage backend");

            let store = JsonFileStore::new(path.clone());
            // Surface a corrupt store at startup rather than on first request.
            let existing = store.load().await?;
            tracing::info!(incidents = existing.len(), "Incident store opened");

            Ok(Arc::new(store))
        }

        StateBackend::Memory => Ok(create_in_memory_store()),
    }
}

/// Create an in-memory store (for testing and development)
pub fn create_in_memory_store() -> Arc<dyn IncidentStore> {
    tracing::info!("Initializing in-memory storage backend");
    Arc::new(InMemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_json_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = StateConfig {
            backend: StateBackend::JsonFile,
            path: Some(temp_dir.path().join("incidents.json")),
        };

        let store = create_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "json_file");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_in_memory_store() {
        let config = StateConfig {
            backend: StateBackend::Memory,
            path: None,
        };

        let store = create_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_json_file_requires_path() {
        let config = StateConfig {
            backend: StateBackend::JsonFile,
            path: None,
        };

        let result = create_store(&config).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_corrupt_store_fails_at_startup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("incidents.json");
        std::fs::write(&path, "not json").unwrap();

        let config = StateConfig {
            backend: StateBackend::JsonFile,
            path: Some(path),
        };

        let result = create_store(&config).await;
        assert!(matches!(result, Err(AppError::StoreCorrupt { .. })));
    }
}
