// SPDX-License-Identifier: MPL-2.0
//! Navigation item types.

use std::fmt;
use std::sync::Arc;

// =============================================================================
// ItemId
// =============================================================================

/// Opaque identifier of a navigable item.
///
/// Backends hand out either numeric primary keys or string hashes; both are
/// normalized to a string so lookups and render keys behave identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// =============================================================================
// ImageResource
// =============================================================================

/// Fully-resolved image payload for an item.
///
/// Shared behind an [`Arc`] so that unloading and reloading the same item can
/// hand back the very same value without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    /// Item this resource belongs to.
    pub id: ItemId,
    /// URL of the full-resolution image.
    pub url: String,
    /// Pixel width of the full-resolution image.
    pub width: u32,
    /// Pixel height of the full-resolution image.
    pub height: u32,
}

impl ImageResource {
    pub fn new(id: ItemId, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            url: url.into(),
            width,
            height,
        }
    }

    /// Returns the aspect ratio (width / height), or `None` for degenerate sizes.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

// =============================================================================
// NavigationContextItem
// =============================================================================

/// One entry of a navigation context.
///
/// `resource == None` means the image is not loaded yet: either no request was
/// issued or one is in flight. The thumbnail is always available and is what
/// the carousel shows meanwhile.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationContextItem {
    /// Unique identifier within a context, also used as render key.
    pub id: ItemId,
    /// Cheap placeholder image.
    pub thumbnail_url: String,
    /// Resolved payload, if loaded.
    pub resource: Option<Arc<ImageResource>>,
}

impl NavigationContextItem {
    /// Creates an unloaded item.
    pub fn new(id: impl Into<ItemId>, thumbnail_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thumbnail_url: thumbnail_url.into(),
            resource: None,
        }
    }

    /// Returns a copy of this item carrying the given resource.
    #[must_use]
    pub fn with_resource(&self, resource: Arc<ImageResource>) -> Self {
        Self {
            id: self.id.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            resource: Some(resource),
        }
    }

    /// Returns a copy of this item with its resource cleared.
    #[must_use]
    pub fn unloaded(&self) -> Self {
        Self {
            id: self.id.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            resource: None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.resource.is_some()
    }
}

// =============================================================================
// Paging
// =============================================================================

/// Opaque cursor returned by a page source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor(pub String);

impl From<&str> for PageCursor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// End of the context a page of items is merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextEdge {
    /// Items precede the current first item.
    Start,
    /// Items follow the current last item.
    End,
}
