//! Data-access seam for fetching pages of calls

use crate::{Result, pagination::PageWindow, types::PageResult};
use async_trait::async_trait;

/// Anything that can serve a page of calls
///
/// Implementations return at most `window.limit` records and report the
/// total across all pages in [`PageResult::total_count`]. `Ok(None)` means
/// the request succeeded without data.
///
/// Futures are not required to be `Send` so browser clients can implement
/// this directly.
#[async_trait(?Send)]
pub trait CallsSource {
    /// Fetch the records inside `window`
    async fn fetch_calls_page(&self, window: PageWindow) -> Result<Option<PageResult>>;
}

