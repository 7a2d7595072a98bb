//! Image source port for handing decoded images to the scoring core.

use std::fmt;

use crate::domain::ImageInfo;

/// An image of the submission that could not be loaded.
#[derive(Debug)]
pub struct ImageLoadError {
    /// Path of the image as given to the source.
    pub path: String,
    /// Underlying failure.
    pub cause: anyhow::Error,
}

impl ImageLoadError {
    /// Creates a load error for the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, cause: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            cause,
        }
    }
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.path, self.cause)
    }
}

impl std::error::Error for ImageLoadError {}

/// Port for loading the images of a submission.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images in submission order.
    ///
    /// # Errors
    ///
    /// Individual items are errors if an image is missing or fails to decode.
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, ImageLoadError>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
