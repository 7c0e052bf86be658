// SPDX-License-Identifier: MPL-2.0
//! User notification port.
//!
//! The viewer decides *that* something should be told to the user; toasts,
//! banners and their lifetimes belong to the host.

use crate::domain::navigation::{ContextEdge, ItemId};
use crate::error::LoadFailure;

/// i18n key for a failed page request.
pub const PAGE_FETCH_FAILED_KEY: &str = "notification-page-fetch-failed";

/// Something the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An item failed to load. `active` is set when it is the item on screen.
    LoadFailed { failure: LoadFailure, active: bool },
    /// A page request failed. The cursor is kept, paging can be retried.
    PageFetchFailed {
        edge: ContextEdge,
        failure: LoadFailure,
    },
    /// An item that was reported as failed has loaded after all.
    LoadRecovered { id: ItemId },
}

impl Notice {
    /// i18n key of the message to show, `None` for notices that only clear
    /// earlier messages.
    #[must_use]
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Notice::LoadFailed { failure, .. } => Some(failure.i18n_key()),
            Notice::PageFetchFailed { .. } => Some(PAGE_FETCH_FAILED_KEY),
            Notice::LoadRecovered { .. } => None,
        }
    }
}

/// Host service presenting notices to the user.
pub trait Notifier {
    /// Shows a load failure using `message_key`.
    fn load_failed(&mut self, failure: &LoadFailure, active: bool, message_key: &str);

    /// Shows a paging failure using `message_key`.
    fn page_fetch_failed(&mut self, edge: ContextEdge, failure: &LoadFailure, message_key: &str);

    /// Clears whatever was shown for a failed load of `id`.
    fn load_recovered(&mut self, id: &ItemId);

    /// Routes a notice to the matching method.
    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::LoadFailed { failure, active } => {
                self.load_failed(failure, *active, failure.i18n_key());
            }
            Notice::PageFetchFailed { edge, failure } => {
                self.page_fetch_failed(*edge, failure, PAGE_FETCH_FAILED_KEY);
            }
            Notice::LoadRecovered { id } => self.load_recovered(id),
        }
    }
}
