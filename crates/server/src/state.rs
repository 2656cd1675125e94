//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use erp_dashboard_core::{AddressCatalog, CatalogError};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Error loading the address dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The address catalog is loaded
/// once and shared read-only; when loading failed the server still starts and
/// address endpoints answer with a generic failure.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Option<AddressCatalog>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `catalog` - Loaded address catalog, or `None` if loading failed
    #[must_use]
    pub fn new(config: ServerConfig, catalog: Option<AddressCatalog>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Build state from configuration, loading the address dataset.
    ///
    /// A dataset that fails to load is logged and reported to Sentry, and the
    /// state is created without a catalog.
    pub async fn load(config: ServerConfig) -> Self {
        let catalog = match load_catalog(config.address_dataset.as_deref()).await {
            Ok(catalog) => {
                tracing::info!(
                    nodes = catalog.len(),
                    provinces = catalog.list_provinces().len(),
                    "Address dataset loaded"
                );
                Some(catalog)
            }
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                tracing::error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Address dataset unavailable"
                );
                None
            }
        };

        Self::new(config, catalog)
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the address catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DataUnavailable` if the dataset failed to load.
    pub fn catalog(&self) -> Result<&AddressCatalog, AppError> {
        self.inner
            .catalog
            .as_ref()
            .ok_or(AppError::DataUnavailable)
    }

    /// Whether the address dataset is loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.catalog.is_some()
    }
}

/// Load the catalog from `path`, or the bundled dataset when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_catalog(path: Option<&Path>) -> Result<AddressCatalog, DatasetLoadError> {
    let Some(path) = path else {
        return Ok(AddressCatalog::embedded()?);
    };

    tracing::info!(path = %path.display(), "Loading address dataset from file");
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetLoadError::Read {
            path: path.display().to_string(),
            source,
        })?;

    Ok(AddressCatalog::from_json(&content)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_bundled_dataset() {
        let state = AppState::load(ServerConfig::default()).await;
        assert!(state.is_ready());
        assert!(!state.catalog().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_leaves_state_unready() {
        let config = ServerConfig {
            address_dataset: Some("/nonexistent/regions.json".into()),
            ..ServerConfig::default()
        };
        let state = AppState::load(config).await;
        assert!(!state.is_ready());
        assert!(matches!(state.catalog(), Err(AppError::DataUnavailable)));
    }

    #[tokio::test]
    async fn test_load_catalog_read_error() {
        let result = load_catalog(Some(Path::new("/nonexistent/regions.json"))).await;
        assert!(matches!(result, Err(DatasetLoadError::Read { .. })));
    }
}
