//! Pagination component for navigating through data

use calls_core::{CallListView, pagination::PaginationMeta};
use leptos::prelude::*;
use leptos_router::components::A;

/// Pagination component
///
/// Previous/next are plain links to the page URL, so the location stays the
/// source of truth for the active page.
#[component]
pub fn Pagination(
    /// Page position and totals
    meta: PaginationMeta,
    /// Page sizes offered in the selector
    page_size_options: Vec<u32>,
    /// Callback when the page size changes
    on_page_size_change: Callback<u32>,
) -> impl IntoView {
    let prev = meta.prev_page.map(|page| {
        view! {
            <span class="pagination-btn">
                <A href=CallListView::page_href(page)>"Previous"</A>
            </span>
        }
    });
    let next = meta.next_page.map(|page| {
        view! {
            <span class="pagination-btn">
                <A href=CallListView::page_href(page)>"Next"</A>
            </span>
        }
    });
    let current = meta.per_page;

    view! {
        <div class="pagination">
            {prev}

            <span class="pagination-info">
                "Page " {meta.page} " of " {meta.total_pages}
            </span>

            {next}

            <span class="pagination-total">{meta.total} " records"</span>

            <label class="page-size">
                "Rows per page "
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }>
                    {page_size_options
                        .into_iter()
                        .map(|size| {
                            view! {
                                <option value=size.to_string() selected=size == current>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}
