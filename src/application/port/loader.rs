// SPDX-License-Identifier: MPL-2.0
//! Image loading and paging ports.

use crate::domain::navigation::{ImageResource, ItemId, NavigationContextItem, PageCursor};
use crate::error::LoadFailure;
use futures_util::future::BoxFuture;

/// Port resolving an item id into its full image resource.
///
/// Calling `load` several times for the same id must be harmless apart from
/// the redundant network cost: the windowing engine may re-request an item
/// that was evicted and became relevant again.
///
/// # Example
///
/// ```
/// use futures_util::future::{self, BoxFuture, FutureExt};
/// use iced_slideshow::application::port::ImageLoader;
/// use iced_slideshow::domain::navigation::{ImageResource, ItemId};
/// use iced_slideshow::error::LoadFailure;
///
/// struct Fixed;
///
/// impl ImageLoader for Fixed {
///     fn load(&self, id: &ItemId) -> BoxFuture<'static, Result<ImageResource, LoadFailure>> {
///         let resource = ImageResource::new(id.clone(), format!("https://cdn/{id}"), 800, 600);
///         future::ready(Ok(resource)).boxed()
///     }
/// }
/// ```
pub trait ImageLoader: Send + Sync {
    /// Starts resolving `id`. The returned future owns everything it needs.
    fn load(&self, id: &ItemId) -> BoxFuture<'static, Result<ImageResource, LoadFailure>>;
}

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Items of the page, in navigation order.
    pub items: Vec<NavigationContextItem>,
    /// Cursor for the following page in the same direction, if any.
    pub next_cursor: Option<PageCursor>,
}

/// Port fetching more items of the listing backing the context.
pub trait PageSource: Send + Sync {
    /// Fetches the page identified by `cursor`.
    ///
    /// Failures reuse [`LoadFailure`] with the cursor text as id.
    fn fetch_page(&self, cursor: PageCursor) -> BoxFuture<'static, Result<Page, LoadFailure>>;
}
