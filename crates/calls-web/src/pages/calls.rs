//! Calls history page: one fetched page, grouped by day, filterable by category

use crate::{
    api_client::ApiClient,
    components::{
        call_list::{CallList, day_sections},
        category_select::CategorySelect,
        loading::Loading,
        pagination::Pagination,
    },
};
use calls_core::{
    CallListView, LoadRequest, LoadState,
    config::ListingConfig,
    listing::run_load,
    routes::PAGE_PARAM,
    utils::local_utc_offset,
};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_query_map;
use tracing::{debug, warn};

/// Issue `request` and commit its outcome, unless a newer request superseded it
fn spawn_load(client: StoredValue<ApiClient>, state: RwSignal<CallListView>, request: LoadRequest) {
    let client = client.get_value();
    spawn_local(async move {
        // `try_update` yields `None` once the page has been unmounted.
        let committed =
            run_load(&client, request, |outcome| state.try_update(|view| outcome.apply(view)))
                .await;
        if !committed {
            debug!("calls page result not committed");
        }
    });
}

/// Calls list page component
///
/// Waits for the listing settings the app fetches at startup.
#[component]
pub fn CallsListPage() -> impl IntoView {
    let listing = expect_context::<RwSignal<Option<ListingConfig>>>();

    move || match listing.get() {
        Some(listing) => view! { <CallsListing listing /> }.into_any(),
        None => view! { <Loading /> }.into_any(),
    }
}

/// The list itself, driven by the `page` query parameter
#[component]
fn CallsListing(listing: ListingConfig) -> impl IntoView {
    let client = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(
        CallListView::new(listing.default_page_size).with_utc_offset(local_utc_offset()),
    );
    let query = use_query_map();

    // The location owns the active page: every change re-synchronizes the view.
    Effect::new(move |_| {
        let page = query.with(|params| params.get(PAGE_PARAM).map(|value| value.to_string()));
        if let Some(Some(request)) = state.try_update(|view| view.sync_location(page.as_deref())) {
            spawn_load(client, state, request);
        }
    });

    let on_filter_change = Callback::new(move |selection: String| {
        state.update(|view| view.select_filter(&selection));
    });

    let on_page_size_change = Callback::new(move |size: u32| {
        match state.try_update(|view| view.change_page_size(size)) {
            Some(Ok(Some(request))) => spawn_load(client, state, request),
            Some(Err(e)) => warn!("Rejected page size {}: {}", size, e),
            _ => {}
        }
    });

    let filter = Signal::derive(move || state.with(CallListView::filter));

    let body = move || {
        state.with(|view| match view.state() {
            LoadState::Idle | LoadState::Loading => view! { <Loading /> }.into_any(),
            LoadState::Failed => view! {
                <p class="calls-error">"Could not load calls."</p>
            }
            .into_any(),
            LoadState::NotFound => view! {
                <p class="calls-not-found">"No calls found."</p>
            }
            .into_any(),
            LoadState::Loaded(_) => {
                let sections = day_sections(view);
                view! { <CallList sections /> }.into_any()
            }
        })
    };

    let page_size_options = listing.page_size_options;
    let pagination = move || {
        state.with(CallListView::pagination).map(|meta| {
            view! {
                <Pagination
                    meta
                    page_size_options=page_size_options.clone()
                    on_page_size_change
                />
            }
        })
    };

    view! {
        <div class="calls-page">
            <div class="calls-header">
                <h2>"Calls History"</h2>
                <CategorySelect selected=filter on_change=on_filter_change />
            </div>
            {body}
            {pagination}
        </div>
    }
}
