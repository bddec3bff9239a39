//! Application state shared across handlers.

use std::sync::Arc;

use eternal_roses_core::{CartStore, Catalog, CatalogError};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It only holds read-only data;
/// per-shopper state lives in the session (see [`crate::middleware::SessionCart`]).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Build state from configuration, loading the catalog file if one is set.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the catalog file cannot be read or is invalid.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| StateError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Catalog::from_json(&json)?
            }
            None => Catalog::roses(),
        };
        tracing::info!(products = catalog.len(), "Catalog loaded");

        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// A fresh cart store priced in the catalog's currency.
    #[must_use]
    pub fn empty_cart_store(&self) -> CartStore {
        CartStore::new(self.inner.catalog.currency_code())
    }
}

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eternal_roses_core::CurrencyCode;

    use super::*;

    #[test]
    fn test_default_config_uses_builtin_roses() {
        let state = AppState::from_config(StorefrontConfig::default()).unwrap();
        assert_eq!(state.catalog().len(), 3);
        assert!(state.empty_cart_store().cart().is_empty());
        assert_eq!(state.empty_cart_store().currency_code(), CurrencyCode::USD);
    }

    #[test]
    fn test_missing_catalog_file_names_path() {
        let config = StorefrontConfig {
            catalog_path: Some("does/not/exist.json".into()),
            ..StorefrontConfig::default()
        };
        let err = AppState::from_config(config).err().unwrap();
        assert!(matches!(err, StateError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
