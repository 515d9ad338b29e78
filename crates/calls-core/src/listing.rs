//! State of the calls list: paging, day grouping and category filtering
//!
//! [`CallListView`] owns everything the list renders except the data
//! fetch itself. Each load it starts is tagged with a [`RequestToken`]; a
//! result is committed only if its token is the latest one issued, so a
//! slow response for an old page can never overwrite a newer one.

use crate::{
    Result,
    config::DEFAULT_PAGE_SIZE,
    pagination::{PageWindow, PaginationMeta},
    routes,
    source::CallsSource,
    types::{CallRecord, CallType, PageResult},
    utils::{format_in_calendar_date, parse_page_param},
};
use chrono::{FixedOffset, Offset, Utc};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// Identifies one issued load; later loads get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A load the caller must perform against a [`CallsSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// Token to hand back to [`CallListView::complete`]
    pub token: RequestToken,
    /// Records to fetch
    pub window: PageWindow,
}

/// Outcome of the latest load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    /// Waiting for the data source
    Loading,
    /// The data source failed; no detail is shown to the user
    Failed,
    /// The request succeeded without any records
    NotFound,
    /// A page of records is available
    Loaded(PageResult),
}

/// Calls sharing one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    /// Calendar day label
    pub label: String,
    /// Calls of that day in source order
    pub calls: Vec<&'a CallRecord>,
}

/// Bucket calls by calendar day as seen at `utc_offset`
///
/// Buckets appear in the order their first call appears in `calls`, not in
/// date order; each bucket keeps the relative order of its calls.
pub fn group_by_day<'a, I>(calls: I, utc_offset: FixedOffset) -> Vec<DayGroup<'a>>
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut buckets: IndexMap<String, Vec<&'a CallRecord>> = IndexMap::new();
    for call in calls {
        buckets
            .entry(format_in_calendar_date(&call.created_at.with_timezone(&utc_offset)))
            .or_default()
            .push(call);
    }

    buckets
        .into_iter()
        .map(|(label, calls)| DayGroup { label, calls })
        .collect()
}

/// View state of the calls list
#[derive(Debug, Clone)]
pub struct CallListView {
    active_page: u32,
    page_size: u32,
    filter: Option<CallType>,
    filtered_count: Option<usize>,
    state: LoadState,
    reported_total: Option<u64>,
    latest_token: u64,
    utc_offset: FixedOffset,
}

impl Default for CallListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CallListView {
    /// Fresh view on the first page; a page size of 0 is treated as 1
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            active_page: 1,
            page_size: page_size.max(1),
            filter: None,
            filtered_count: None,
            state: LoadState::Idle,
            reported_total: None,
            latest_token: 0,
            utc_offset: Utc.fix(),
        }
    }

    /// Label days and times at `utc_offset` instead of UTC
    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Offset used for day labels and row dates
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Current 1-based page
    #[must_use]
    pub const fn active_page(&self) -> u32 {
        self.active_page
    }

    /// Records per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Active category filter
    #[must_use]
    pub const fn filter(&self) -> Option<CallType> {
        self.filter
    }

    /// Number of loaded records matching the active filter
    #[must_use]
    pub const fn filtered_count(&self) -> Option<usize> {
        self.filtered_count
    }

    /// Outcome of the latest load
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Offset/limit for the current page and page size
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::for_page(self.active_page, self.page_size)
    }

    /// Whether `token` is the most recently issued one
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest_token
    }

    /// Follow the `page` query parameter of the current URL
    ///
    /// Starts a load on first use and whenever the page differs from the
    /// active one. Moving to another page drops the category filter.
    pub fn sync_location(&mut self, page_param: Option<&str>) -> Option<LoadRequest> {
        let page = parse_page_param(page_param);
        if page == self.active_page && self.state != LoadState::Idle {
            return None;
        }

        if page != self.active_page {
            debug!(from = self.active_page, to = page, "calls page changed");
            self.active_page = page;
            self.filter = None;
            self.filtered_count = None;
        }

        Some(self.reload())
    }

    /// Change the page size, keeping the active page
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is 0.
    pub fn change_page_size(&mut self, page_size: u32) -> Result<Option<LoadRequest>> {
        if page_size == 0 {
            return Err(crate::Error::validation(
                "page_size",
                "must be greater than zero",
            ));
        }
        if page_size == self.page_size {
            return Ok(None);
        }

        debug!(from = self.page_size, to = page_size, "calls page size changed");
        self.page_size = page_size;
        Ok(Some(self.reload()))
    }

    /// Start a new load for the current window, superseding any pending one
    pub fn reload(&mut self) -> LoadRequest {
        self.latest_token += 1;
        self.state = LoadState::Loading;

        let request = LoadRequest {
            token: RequestToken(self.latest_token),
            window: self.window(),
        };
        info!(
            offset = request.window.offset,
            limit = request.window.limit,
            token = self.latest_token,
            "loading calls page"
        );
        request
    }

    /// Commit the result of a load
    ///
    /// Returns `false` without touching the view when a newer load has been
    /// started since `token` was issued.
    pub fn complete(&mut self, token: RequestToken, result: Result<Option<PageResult>>) -> bool {
        if !self.is_current(token) {
            debug!(
                token = token.0,
                latest = self.latest_token,
                "discarding superseded calls page"
            );
            return false;
        }

        self.reported_total = match &result {
            Ok(Some(page)) => Some(page.total_count),
            _ => None,
        };
        self.state = match result {
            Ok(Some(page)) if !page.is_empty() => {
                debug!(
                    records = page.nodes.len(),
                    total = page.total_count,
                    "calls page loaded"
                );
                LoadState::Loaded(page)
            }
            Ok(_) => LoadState::NotFound,
            Err(error) => {
                warn!(%error, "failed to load calls page");
                LoadState::Failed
            }
        };
        self.filtered_count = self.filter.map(|category| self.count_matching(category));
        true
    }

    /// Restrict the displayed calls to one category of the loaded page
    ///
    /// `None` clears the filter. Never starts a load.
    pub fn apply_filter(&mut self, category: Option<CallType>) {
        self.filter = category;
        self.filtered_count = category.map(|category| self.count_matching(category));
    }

    /// Apply the raw value of the category select; an empty value clears the filter
    pub fn select_filter(&mut self, selection: &str) {
        self.apply_filter(CallType::from_selection(selection));
    }

    /// Records of the last successful load
    #[must_use]
    pub fn loaded_calls(&self) -> &[CallRecord] {
        match &self.state {
            LoadState::Loaded(page) => &page.nodes,
            _ => &[],
        }
    }

    /// Records currently displayed, after the category filter
    #[must_use]
    pub fn active_calls(&self) -> Vec<&CallRecord> {
        self.loaded_calls()
            .iter()
            .filter(|call| self.filter.is_none_or(|category| call.call_type == category))
            .collect()
    }

    /// Displayed records bucketed by calendar day
    #[must_use]
    pub fn day_groups(&self) -> Vec<DayGroup<'_>> {
        group_by_day(self.active_calls(), self.utc_offset)
    }

    /// Total reported by the last successful response, including an empty page
    fn backend_total(&self) -> Option<u64> {
        match self.state {
            LoadState::Loaded(_) | LoadState::NotFound => self.reported_total,
            _ => None,
        }
    }

    /// Records total shown by the pagination control
    ///
    /// While a filter with at least one match is active this is the filtered
    /// count of the current page rather than the backend total.
    #[must_use]
    pub fn records_total(&self) -> Option<u64> {
        let total = self.backend_total()?;
        Some(
            self.filtered_count
                .filter(|count| *count > 0)
                .map_or(total, |count| count as u64),
        )
    }

    /// Pagination control data; absent until a response reports a non-zero total
    ///
    /// A page past the end still gets the control, so the user can step back.
    #[must_use]
    pub fn pagination(&self) -> Option<PaginationMeta> {
        let total = self.backend_total().filter(|total| *total > 0)?;
        Some(PaginationMeta::new(
            self.active_page,
            self.page_size,
            self.records_total().unwrap_or(total),
        ))
    }

    /// Location to navigate to for another page
    #[must_use]
    pub fn page_href(page: u32) -> String {
        routes::calls_page(page)
    }

    fn count_matching(&self, category: CallType) -> usize {
        self.loaded_calls()
            .iter()
            .filter(|call| call.call_type == category)
            .count()
    }
}

/// Finished load waiting to be applied to the view that issued it
#[derive(Debug)]
pub struct LoadOutcome {
    token: RequestToken,
    result: Result<Option<PageResult>>,
}

impl LoadOutcome {
    /// Commit into `view`; see [`CallListView::complete`]
    pub fn apply(self, view: &mut CallListView) -> bool {
        view.complete(self.token, self.result)
    }
}

/// Fetch `request` from `source` and hand the outcome to `update`
///
/// `update` gives the outcome access to the view, returning `None` when the
/// view no longer exists. Returns whether the result was committed.
pub async fn run_load<S, U>(source: &S, request: LoadRequest, update: U) -> bool
where
    S: CallsSource + ?Sized,
    U: FnOnce(LoadOutcome) -> Option<bool>,
{
    let result = source.fetch_calls_page(request.window).await;
    update(LoadOutcome {
        token: request.token,
        result,
    })
    .unwrap_or(false)
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use crate::fixtures::CallFixtures;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use tokio::sync::oneshot;

    fn loaded_view(page: PageResult) -> CallListView {
        let mut view = CallListView::default();
        let request = view.sync_location(None).unwrap();
        assert!(view.complete(request.token, Ok(Some(page))));
        view
    }

    fn ids(calls: &[&CallRecord]) -> Vec<String> {
        calls.iter().map(|call| call.id.clone()).collect()
    }

    #[test]
    fn test_first_sync_starts_loading_first_page() {
        let mut view = CallListView::default();

        let request = view.sync_location(None).unwrap();

        assert_eq!(request.window, PageWindow { offset: 0, limit: 5 });
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(view.is_current(request.token));
    }

    #[test]
    fn test_invalid_page_param_resolves_to_first_page() {
        let mut view = CallListView::default();
        view.sync_location(Some("abc")).unwrap();
        assert_eq!(view.active_page(), 1);

        let mut view = CallListView::default();
        view.sync_location(None).unwrap();
        assert_eq!(view.active_page(), 1);
    }

    #[test]
    fn test_same_page_does_not_reload() {
        let mut view = loaded_view(CallFixtures::mixed_page());

        assert!(view.sync_location(Some("1")).is_none());
        assert!(view.sync_location(Some("junk")).is_none());
    }

    #[test]
    fn test_page_navigation_drops_filter() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        view.apply_filter(Some(CallType::Missed));

        let request = view.sync_location(Some("3")).unwrap();

        assert_eq!(request.window.offset, 10);
        assert_eq!(view.filter(), None);
        assert_eq!(view.filtered_count(), None);
    }

    #[test]
    fn test_page_size_change_recomputes_offset_at_same_page() {
        let mut view = CallListView::default();
        view.sync_location(Some("3")).unwrap();

        let request = view.change_page_size(10).unwrap().unwrap();

        assert_eq!(view.active_page(), 3);
        assert_eq!(request.window, PageWindow { offset: 20, limit: 10 });
    }

    #[test]
    fn test_page_size_change_validation() {
        let mut view = CallListView::default();
        assert!(view.change_page_size(0).is_err());
        assert!(view.change_page_size(5).unwrap().is_none());
    }

    #[test]
    fn test_filter_survives_page_size_change_and_tracks_new_page() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        view.apply_filter(Some(CallType::Answered));

        let request = view.change_page_size(10).unwrap().unwrap();
        let mut bigger = CallFixtures::mixed_page();
        bigger
            .nodes
            .push(CallFixtures::call("c-6", CallType::Answered, "2024-03-14T10:00:00Z"));
        view.complete(request.token, Ok(Some(bigger)));

        assert_eq!(view.filter(), Some(CallType::Answered));
        assert_eq!(view.filtered_count(), Some(3));
    }

    #[test]
    fn test_missed_filter_scenario() {
        let mut view = loaded_view(CallFixtures::mixed_page());

        view.apply_filter(Some(CallType::Missed));

        assert_eq!(ids(&view.active_calls()), vec!["c-1", "c-4"]);
        assert_eq!(view.filtered_count(), Some(2));

        let groups = view.day_groups();
        let grouped: Vec<&str> = groups
            .iter()
            .flat_map(|group| group.calls.iter().map(|call| call.id.as_str()))
            .collect();
        assert_eq!(grouped, vec!["c-1", "c-4"]);
    }

    #[test]
    fn test_filter_never_starts_a_load() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        let window = view.window();

        view.select_filter("voicemail");

        assert!(matches!(view.state(), LoadState::Loaded(_)));
        assert_eq!(view.window(), window);
        assert_eq!(view.filtered_count(), Some(1));
    }

    #[test]
    fn test_clearing_filter_restores_page() {
        let page = CallFixtures::mixed_page();
        let mut view = loaded_view(page.clone());

        view.select_filter("missed");
        view.select_filter("");

        let expected: Vec<&CallRecord> = page.nodes.iter().collect();
        assert_eq!(view.active_calls(), expected);
        assert_eq!(view.filtered_count(), None);
        assert_eq!(view.records_total(), Some(23));
    }

    #[test]
    fn test_records_total_uses_filtered_count() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        assert_eq!(view.records_total(), Some(23));

        view.apply_filter(Some(CallType::Voicemail));

        assert_eq!(view.records_total(), Some(1));
        let meta = view.pagination().unwrap();
        assert_eq!(meta.total, 1);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_day_groups_follow_first_occurrence() {
        let page = PageResult {
            total_count: 4,
            nodes: vec![
                CallFixtures::call("a", CallType::Missed, "2024-03-15T10:00:00Z"),
                CallFixtures::call("b", CallType::Missed, "2024-03-17T10:00:00Z"),
                CallFixtures::call("c", CallType::Missed, "2024-03-15T09:00:00Z"),
                CallFixtures::call("d", CallType::Missed, "2024-03-16T10:00:00Z"),
            ],
            has_next_page: false,
        };

        let groups = group_by_day(&page.nodes, Utc.fix());

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["March 15, 2024", "March 17, 2024", "March 16, 2024"]);
        assert_eq!(ids(&groups[0].calls), vec!["a", "c"]);
    }

    #[test]
    fn test_failure_shows_no_stale_data() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        let request = view.sync_location(Some("2")).unwrap();

        assert!(view.complete(request.token, Err(crate::Error::transport("connection refused"))));

        assert_eq!(view.state(), &LoadState::Failed);
        assert!(view.active_calls().is_empty());
        assert!(view.pagination().is_none());
    }

    #[test]
    fn test_empty_results_are_not_found() {
        let mut view = CallListView::default();
        let request = view.sync_location(None).unwrap();
        view.complete(request.token, Ok(None));
        assert_eq!(view.state(), &LoadState::NotFound);

        let request = view.reload();
        view.complete(request.token, Ok(Some(PageResult::default())));
        assert_eq!(view.state(), &LoadState::NotFound);
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let mut view = CallListView::default();
        let page_two = view.sync_location(Some("2")).unwrap();
        let page_three = view.sync_location(Some("3")).unwrap();

        assert!(view.complete(page_three.token, Ok(Some(CallFixtures::page_tagged("p3", 5, 20)))));
        assert!(!view.complete(page_two.token, Ok(Some(CallFixtures::page_tagged("p2", 5, 20)))));

        assert_eq!(view.active_page(), 3);
        assert!(view.active_calls().iter().all(|call| call.id.starts_with("p3")));
    }

    #[test]
    fn test_stale_result_arriving_first_is_discarded() {
        let mut view = CallListView::default();
        let page_two = view.sync_location(Some("2")).unwrap();
        let page_three = view.sync_location(Some("3")).unwrap();

        assert!(!view.complete(page_two.token, Ok(Some(CallFixtures::page_tagged("p2", 5, 20)))));
        assert_eq!(view.state(), &LoadState::Loading);

        assert!(view.complete(page_three.token, Ok(Some(CallFixtures::page_tagged("p3", 5, 20)))));
        assert!(view.active_calls().iter().all(|call| call.id.starts_with("p3")));
    }

    #[test]
    fn test_page_past_the_end_keeps_pagination() {
        let mut view = CallListView::default();
        let request = view.sync_location(Some("3")).unwrap();
        view.complete(request.token, Ok(Some(CallFixtures::mixed_page())));

        let request = view.change_page_size(50).unwrap().unwrap();
        assert_eq!(request.window, PageWindow { offset: 100, limit: 50 });
        view.complete(
            request.token,
            Ok(Some(PageResult {
                total_count: 23,
                nodes: Vec::new(),
                has_next_page: false,
            })),
        );

        assert_eq!(view.state(), &LoadState::NotFound);
        let meta = view.pagination().unwrap();
        assert_eq!(meta.total, 23);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.prev_page, Some(2));
        assert_eq!(meta.per_page, 50);
    }

    #[test]
    fn test_missing_data_hides_pagination() {
        let mut view = loaded_view(CallFixtures::mixed_page());
        let request = view.sync_location(Some("2")).unwrap();
        view.complete(request.token, Ok(None));

        assert_eq!(view.state(), &LoadState::NotFound);
        assert!(view.pagination().is_none());
    }

    #[test]
    fn test_filter_without_matches_shows_backend_total() {
        let mut view = loaded_view(CallFixtures::page_tagged("a", 4, 17));

        view.apply_filter(Some(CallType::Missed));

        assert!(view.active_calls().is_empty());
        assert_eq!(view.filtered_count(), Some(0));
        assert_eq!(view.records_total(), Some(17));
        assert_eq!(view.pagination().unwrap().total_pages, 4);
    }

    #[test]
    fn test_day_labels_follow_utc_offset() {
        let page = PageResult {
            total_count: 2,
            nodes: vec![
                CallFixtures::call("late", CallType::Missed, "2024-03-16T02:30:00Z"),
                CallFixtures::call("early", CallType::Missed, "2024-03-15T20:00:00Z"),
            ],
            has_next_page: false,
        };
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        let utc_labels: Vec<String> = group_by_day(&page.nodes, Utc.fix())
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(utc_labels, vec!["March 16, 2024", "March 15, 2024"]);

        let mut view = CallListView::default().with_utc_offset(new_york);
        let request = view.sync_location(None).unwrap();
        view.complete(request.token, Ok(Some(page)));

        let groups = view.day_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "March 15, 2024");
        assert_eq!(ids(&groups[0].calls), vec!["late", "early"]);
    }

    #[test]
    fn test_pagination_hidden_without_total() {
        let view = loaded_view(CallFixtures::page_tagged("x", 2, 0));
        assert!(view.pagination().is_none());
    }

    /// Source whose responses are released by the test through channels
    struct ScriptedSource {
        pending: RefCell<HashMap<u64, oneshot::Receiver<Result<Option<PageResult>>>>>,
    }

    #[async_trait(?Send)]
    impl CallsSource for ScriptedSource {
        async fn fetch_calls_page(&self, window: PageWindow) -> Result<Option<PageResult>> {
            let receiver = self
                .pending
                .borrow_mut()
                .remove(&window.offset)
                .ok_or_else(|| crate::Error::transport("unexpected window"))?;
            receiver
                .await
                .map_err(|_| crate::Error::transport("response dropped"))?
        }
    }

    #[tokio::test]
    async fn test_run_load_keeps_only_latest_page() {
        let (page_two_tx, page_two_rx) = oneshot::channel();
        let (page_three_tx, page_three_rx) = oneshot::channel();
        let source = ScriptedSource {
            pending: RefCell::new(HashMap::from([(5, page_two_rx), (10, page_three_rx)])),
        };
        let view = RefCell::new(CallListView::default());

        let page_two = view.borrow_mut().sync_location(Some("2")).unwrap();
        let first = run_load(&source, page_two, |outcome| {
            Some(outcome.apply(&mut view.borrow_mut()))
        });
        let page_three = view.borrow_mut().sync_location(Some("3")).unwrap();
        let second = run_load(&source, page_three, |outcome| {
            Some(outcome.apply(&mut view.borrow_mut()))
        });

        let release = async {
            page_three_tx
                .send(Ok(Some(CallFixtures::page_tagged("p3", 5, 20))))
                .unwrap();
            tokio::task::yield_now().await;
            page_two_tx
                .send(Ok(Some(CallFixtures::page_tagged("p2", 5, 20))))
                .unwrap();
        };

        let (first_committed, second_committed, ()) = futures::join!(first, second, release);

        assert!(!first_committed);
        assert!(second_committed);
        let view = view.borrow();
        assert_eq!(view.active_page(), 3);
        assert!(view.active_calls().iter().all(|call| call.id.starts_with("p3")));
    }

    #[tokio::test]
    async fn test_run_load_failure_renders_error() {
        let (tx, rx) = oneshot::channel();
        let source = ScriptedSource {
            pending: RefCell::new(HashMap::from([(0, rx)])),
        };
        let view = RefCell::new(CallListView::default());
        let request = view.borrow_mut().sync_location(None).unwrap();

        tx.send(Err(crate::Error::Status { status: 502 })).unwrap();

        let committed = run_load(&source, request, |outcome| {
            Some(outcome.apply(&mut view.borrow_mut()))
        })
        .await;

        assert!(committed);
        assert_eq!(view.borrow().state(), &LoadState::Failed);
    }

    #[tokio::test]
    async fn test_run_load_without_view_commits_nothing() {
        let (tx, rx) = oneshot::channel();
        let source = ScriptedSource {
            pending: RefCell::new(HashMap::from([(0, rx)])),
        };
        let mut view = CallListView::default();
        let request = view.sync_location(None).unwrap();

        tx.send(Ok(Some(CallFixtures::mixed_page()))).unwrap();

        assert!(!run_load(&source, request, |_| None).await);
        assert_eq!(view.state(), &LoadState::Loading);
    }

    fn arb_page() -> impl Strategy<Value = PageResult> {
        prop::collection::vec((0usize..4, 0u32..4, 0u32..86_400), 0..30).prop_map(|specs| {
            let nodes = specs
                .into_iter()
                .enumerate()
                .map(|(i, (kind, day, secs))| {
                    let call_type = [
                        CallType::Missed,
                        CallType::Answered,
                        CallType::Voicemail,
                        CallType::Unknown,
                    ][kind];
                    let mut call = CallFixtures::call(&format!("c-{i}"), call_type, "2024-03-10T00:00:00Z");
                    call.created_at += chrono::Duration::days(i64::from(day))
                        + chrono::Duration::seconds(i64::from(secs));
                    call
                })
                .collect::<Vec<_>>();
            PageResult {
                total_count: nodes.len() as u64 * 3,
                nodes,
                has_next_page: true,
            }
        })
    }

    fn arb_filter() -> impl Strategy<Value = Option<CallType>> {
        prop::option::of(prop::sample::select(CallType::FILTERABLE.to_vec()))
    }

    proptest! {
        #[test]
        fn test_grouping_is_stable(page in arb_page(), filter in arb_filter()) {
            prop_assume!(!page.nodes.is_empty());
            let mut view = loaded_view(page);
            view.apply_filter(filter);

            let active = ids(&view.active_calls());
            let groups = view.day_groups();

            let flattened: usize = groups.iter().map(|g| g.calls.len()).sum();
            prop_assert_eq!(flattened, active.len());

            for group in &groups {
                for call in &group.calls {
                    prop_assert_eq!(&format_in_calendar_date(&call.created_at), &group.label);
                }
                let positions: Vec<usize> = group
                    .calls
                    .iter()
                    .map(|call| active.iter().position(|id| *id == call.id).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }

            let labels: HashSet<&String> = groups.iter().map(|g| &g.label).collect();
            prop_assert_eq!(labels.len(), groups.len());
        }

        #[test]
        fn test_filter_idempotent_and_counted(page in arb_page(), filter in arb_filter()) {
            prop_assume!(!page.nodes.is_empty());
            let mut view = loaded_view(page.clone());

            view.apply_filter(filter);
            let once = ids(&view.active_calls());
            view.apply_filter(filter);
            let twice = ids(&view.active_calls());
            prop_assert_eq!(&once, &twice);

            match filter {
                Some(_) => prop_assert_eq!(view.filtered_count(), Some(once.len())),
                None => prop_assert_eq!(view.filtered_count(), None),
            }

            view.apply_filter(None);
            let restored: Vec<String> = page.nodes.iter().map(|c| c.id.clone()).collect();
            prop_assert_eq!(ids(&view.active_calls()), restored);
        }

        #[test]
        fn test_offset_tracks_page_and_size(
            page in 1u32..500,
            first_size in 1u32..100,
            second_size in 1u32..100,
        ) {
            let mut view = CallListView::new(first_size);
            let request = view.sync_location(Some(&page.to_string())).unwrap();
            prop_assert_eq!(request.window.offset, u64::from(page - 1) * u64::from(first_size));

            if let Some(request) = view.change_page_size(second_size).unwrap() {
                prop_assert_eq!(request.window.offset, u64::from(page - 1) * u64::from(second_size));
                prop_assert_eq!(request.window.limit, second_size);
            }
            prop_assert_eq!(view.window().offset, u64::from(page - 1) * u64::from(second_size));
        }
    }
}
