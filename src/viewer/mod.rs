// SPDX-License-Identifier: MPL-2.0
//! Full-screen viewer orchestration.
//!
//! [`Viewer`] owns the navigation context, the prefetch engine and the
//! viewer's gesture host. It is driven by [`Message`]s and
//! answers with [`Effect`]s, in the same update/task split the rest of an
//! iced application uses: `update` never performs I/O itself.
//!
//! [`ViewerRuntime`] executes those effects on a tokio runtime, delivering
//! completions back as messages through a channel. It also samples the
//! gesture animations while one runs, so a committed swipe is torn down only
//! after its exit animation completed.
//!
//! # Example
//!
//! ```
//! use iced_slideshow::domain::navigation::{ItemId, NavigationContextItem};
//! use iced_slideshow::viewer::{Effect, Message, Viewer, ViewerConfig};
//!
//! let mut viewer = Viewer::new(ViewerConfig::default());
//! viewer.update(Message::SetContext(vec![
//!     NavigationContextItem::new("a", "t/a"),
//!     NavigationContextItem::new("b", "t/b"),
//! ]));
//! let effects = viewer.update(Message::ActiveChanged(ItemId::from("b")));
//!
//! assert!(effects.iter().any(|e| matches!(e, Effect::Render(_))));
//! ```

mod orchestrator;
mod runtime;

pub use orchestrator::{PointerInput, Viewer};
pub use runtime::ViewerRuntime;

use crate::animation::AnimationConfig;
use crate::application::port::{Notice, Page};
use crate::config::{DEFAULT_DISMISS_DELAY_MS, DEFAULT_NEAR_END_MARGIN};
use crate::domain::navigation::{ContextEdge, ImageResource, ItemId, NavigationContextItem, PageCursor};
use crate::error::LoadFailure;
use crate::gesture::GestureConfig;
use crate::media::prefetch::{LoadRequest, PrefetchConfig};
use crate::media::window::VisibleWindow;
use std::time::Duration;

/// Viewer tuning, usually built by [`crate::config::Config::viewer_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub prefetch: PrefetchConfig,
    pub gesture: GestureConfig,
    pub animation: AnimationConfig,
    /// Distance from either end of the context at which a page is requested.
    pub near_end_margin: usize,
    /// Extra delay between the end of the exit animation and the dismissal
    /// callback.
    pub dismiss_delay: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            prefetch: PrefetchConfig::default(),
            gesture: GestureConfig::default(),
            animation: AnimationConfig::default(),
            near_end_margin: DEFAULT_NEAR_END_MARGIN,
            dismiss_delay: Duration::from_millis(DEFAULT_DISMISS_DELAY_MS),
        }
    }
}

/// What the viewer is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerStatus {
    /// Browsing normally.
    #[default]
    Ready,
    /// The active item failed to load; the host should offer to close.
    LoadFailed { id: ItemId },
    /// A dismissal was committed and waits for the exit animation and delay.
    Dismissing,
    /// Torn down. Further messages are ignored.
    Dismissed,
}

/// Input to [`Viewer::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Replace the navigation context, typically from a gallery grid that
    /// knows the full browsing order.
    SetContext(Vec<NavigationContextItem>),
    /// Set or clear the cursor of the page beyond `edge`.
    SetPageCursor {
        edge: ContextEdge,
        cursor: Option<PageCursor>,
    },
    /// The carousel moved to another slide.
    ActiveChanged(ItemId),
    /// The carousel settled on a slide.
    SlideCommitted(ItemId),
    /// A load finished.
    ImageLoaded {
        id: ItemId,
        result: Result<ImageResource, LoadFailure>,
    },
    /// A page fetch finished. `generation` is the context generation the
    /// request was made for; pages for a replaced context are dropped.
    PageLoaded {
        edge: ContextEdge,
        generation: u64,
        result: Result<Page, LoadFailure>,
    },
    /// Try loading a failed item again.
    RetryLoad(ItemId),
    /// The user chose to close the viewer.
    Close,
    /// The dismissal delay elapsed.
    DismissDue,
}

/// Work requested by [`Viewer::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start loading an item after the request's delay.
    Load(LoadRequest),
    /// Fetch the page beyond `edge`.
    FetchPage {
        edge: ContextEdge,
        cursor: PageCursor,
        generation: u64,
    },
    /// Re-render the carousel.
    Render(VisibleWindow),
    /// Send [`Message::DismissDue`] once the exit animation started by the
    /// committing swipe has completed (see [`Viewer::take_exit_completion`]),
    /// then `after` more.
    Dismiss { after: Duration },
    /// Tell the user about a failure or a recovery.
    Notify(Notice),
    /// Invoke the host's dismissal callback now.
    Teardown,
}
