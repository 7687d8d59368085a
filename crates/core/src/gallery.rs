//! Photo gallery slides and the carousel index.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SlideId;

/// How long each slide stays up before the carousel advances on its own.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("a carousel needs at least one slide")]
    NoSlides,
}

/// One gallery photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    /// Path of the photo, relative to the static root.
    pub image: String,
    pub alt: String,
}

/// The house gallery.
#[must_use]
pub fn house_slides() -> Vec<Slide> {
    [
        (1, "img/bao1.jpg", "Baobab Restaurant Interior"),
        (2, "img/bao2.jpg", "Traditional Senegalese Dish"),
        (3, "img/bao3.jpg", "Chef Preparing Food"),
        (4, "img/bao4.jpg", "Dining Experience"),
    ]
    .into_iter()
    .map(|(id, image, alt)| Slide {
        id: SlideId::new(id),
        image: image.to_owned(),
        alt: alt.to_owned(),
    })
    .collect()
}

/// A cyclic position over `len` slides.
///
/// Every movement wraps modulo `len` in both directions, so `current` is
/// always a valid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// A carousel at the first of `len` slides.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoSlides`] when `len` is zero.
    pub const fn new(len: usize) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::NoSlides);
        }
        Ok(Self { len, current: 0 })
    }

    /// A carousel positioned at `index mod len`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoSlides`] when `len` is zero.
    pub const fn at(len: usize, index: usize) -> Result<Self, CarouselError> {
        match Self::new(len) {
            Ok(carousel) => Ok(carousel.go_to(index)),
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; an empty carousel cannot be built.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The following slide, wrapping from the last to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            current: (self.current + 1) % self.len,
            ..self
        }
    }

    /// The preceding slide, wrapping from the first to the last.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self {
            current: (self.current + self.len - 1) % self.len,
            ..self
        }
    }

    /// Jump to `index`, wrapping out-of-range values.
    #[must_use]
    pub const fn go_to(self, index: usize) -> Self {
        Self {
            current: index % self.len,
            ..self
        }
    }
}
