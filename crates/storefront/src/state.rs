//! Application state shared across handlers.

use std::sync::Arc;

use baobab_core::catalog::{Catalog, CatalogError};
use baobab_core::gallery::{self, CarouselError, Slide};

use crate::config::SiteConfig;
use crate::services::CartBook;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("gallery error: {0}")]
    Gallery(#[from] CarouselError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog and gallery are
/// built once here and never mutated. Carts are per-visitor: the session
/// names the visitor and [`CartBook`] holds their saved cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    catalog: Catalog,
    slides: Vec<Slide>,
    carts: CartBook,
}

impl AppState {
    /// Create application state with the house menu and gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the house menu is invalid or the gallery has no
    /// slides.
    pub fn new(config: SiteConfig) -> Result<Self, StateError> {
        Self::with_content(config, Catalog::house_menu()?, gallery::house_slides())
    }

    /// Create application state with explicit content.
    ///
    /// # Errors
    ///
    /// Returns an error if `slides` is empty.
    pub fn with_content(
        config: SiteConfig,
        catalog: Catalog,
        slides: Vec<Slide>,
    ) -> Result<Self, StateError> {
        if slides.is_empty() {
            return Err(CarouselError::NoSlides.into());
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                slides,
                carts: CartBook::new(),
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the visitors' saved carts.
    #[must_use]
    pub fn carts(&self) -> &CartBook {
        &self.inner.carts
    }

    /// Get the gallery slides (never empty).
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.inner.slides
    }
}
