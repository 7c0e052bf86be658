// SPDX-License-Identifier: MPL-2.0
use crate::domain::gesture::SwipeDirection;
use crate::domain::navigation::ItemId;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Viewer(ViewerError),
}

/// Failure to resolve an item into its full image resource.
///
/// Produced by [`crate::application::port::ImageLoader`] implementations and
/// by page sources. Never bubbles past the viewer orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// The item that failed to load.
    pub id: ItemId,
    /// Human-readable cause (network error, 404, decode failure...).
    pub cause: String,
}

impl LoadFailure {
    pub fn new(id: ItemId, cause: impl Into<String>) -> Self {
        Self {
            id,
            cause: cause.into(),
        }
    }

    /// Returns the i18n message key shown to the user for this failure.
    ///
    /// Remote images mostly fail because they were removed upstream, so the
    /// user-facing message says so.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        "notification-load-error-probably-deleted"
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.id, self.cause)
    }
}

impl std::error::Error for LoadFailure {}

/// Error taxonomy of the viewer core.
///
/// None of these are fatal: `ItemNotFound` is recovered by falling back to the
/// first item, `LoadFailure` becomes a notification, and
/// `InvalidGestureContext` is the normal rejected terminal state of a swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The active id does not resolve in the current context.
    ItemNotFound(ItemId),

    /// An image resource failed to resolve.
    LoadFailure(LoadFailure),

    /// A swipe locked onto a direction the container does not accept.
    InvalidGestureContext {
        expected: SwipeDirection,
        actual: SwipeDirection,
    },
}

impl ViewerError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ViewerError::ItemNotFound(_) => "error-viewer-item-not-found",
            ViewerError::LoadFailure(failure) => failure.i18n_key(),
            ViewerError::InvalidGestureContext { .. } => "error-viewer-invalid-gesture",
        }
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::ItemNotFound(id) => write!(f, "Item not found in context: {}", id),
            ViewerError::LoadFailure(failure) => write!(f, "{}", failure),
            ViewerError::InvalidGestureContext { expected, actual } => write!(
                f,
                "Swipe {} not accepted here (expected {})",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ViewerError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Viewer(e) => write!(f, "Viewer Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ViewerError> for Error {
    fn from(err: ViewerError) -> Self {
        Error::Viewer(err)
    }
}

impl From<LoadFailure> for Error {
    fn from(err: LoadFailure) -> Self {
        Error::Viewer(ViewerError::LoadFailure(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
