//! Gallery carousel route handler.
//!
//! The carousel fragment is rendered at a given slide index. Its prev/next
//! buttons and dots request neighbouring indices, and an HTMX polling trigger
//! requests the next slide every [`AUTO_ADVANCE_INTERVAL`]. Swapping in a new
//! fragment drops the old trigger, so a manual move restarts the timer.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use baobab_core::gallery::{AUTO_ADVANCE_INTERVAL, Carousel, Slide};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// One slide as rendered.
#[derive(Clone)]
pub struct SlideView {
    pub index: usize,
    pub image: String,
    pub alt: String,
    pub active: bool,
}

/// Carousel display data.
#[derive(Clone)]
pub struct GalleryView {
    pub slides: Vec<SlideView>,
    pub current: usize,
    pub prev: usize,
    pub next: usize,
    pub autoplay_secs: u64,
}

impl GalleryView {
    #[must_use]
    pub fn new(slides: &[Slide], carousel: Carousel) -> Self {
        let current = carousel.current();
        let slides = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                index,
                image: format!("/static/{}", slide.image),
                alt: slide.alt.clone(),
                active: index == current,
            })
            .collect();

        Self {
            slides,
            current,
            prev: carousel.prev().current(),
            next: carousel.next().current(),
            autoplay_secs: AUTO_ADVANCE_INTERVAL.as_secs(),
        }
    }

    /// The view at `index` (wrapped) over `slides`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if `slides` is empty.
    pub fn at(slides: &[Slide], index: usize) -> Result<Self> {
        let carousel =
            Carousel::at(slides.len(), index).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(Self::new(slides, carousel))
    }
}

/// Carousel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/gallery.html")]
pub struct GalleryTemplate {
    pub gallery: GalleryView,
}

/// Render the carousel at slide `index`, wrapping out-of-range values.
///
/// # Errors
///
/// Returns an internal error if the gallery has no slides.
#[allow(clippy::unused_async)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<GalleryTemplate> {
    Ok(GalleryTemplate {
        gallery: GalleryView::at(state.slides(), index)?,
    })
}
