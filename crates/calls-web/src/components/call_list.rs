//! Call list grouped by calendar day

use calls_core::{CallListView, display::CallRow};
use leptos::prelude::*;
use leptos_router::components::A;

/// Rows of one calendar day, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    /// Heading, e.g. "March 15, 2024"
    pub label: String,
    /// Rows in page order
    pub rows: Vec<CallRow>,
}

/// Day sections for the calls the view currently shows
#[must_use]
pub fn day_sections(view: &CallListView) -> Vec<DaySection> {
    let utc_offset = view.utc_offset();
    view.day_groups()
        .into_iter()
        .map(|group| DaySection {
            label: group.label,
            rows: group
                .calls
                .into_iter()
                .map(|call| CallRow::at_offset(call, utc_offset))
                .collect(),
        })
        .collect()
}

/// Call list component
#[component]
pub fn CallList(
    /// Day sections to display
    sections: Vec<DaySection>,
) -> impl IntoView {
    view! {
        <div class="call-list">
            {sections.into_iter().map(|section| {
                view! {
                    <section class="call-day">
                        <h3 class="call-day-label">{section.label}</h3>
                        {section.rows.into_iter().map(|row| view! { <CallItem row /> }).collect_view()}
                    </section>
                }
            }).collect_view()}
        </div>
    }
}

/// Individual call row, linking to the call's detail page
#[component]
fn CallItem(row: CallRow) -> impl IntoView {
    let notes = row.notes.map(|notes| view! { <p class="call-notes">{notes}</p> });

    view! {
        <A href=row.href>
            <div class="call-row" data-call-id=row.id>
                <span class="call-icon" title=row.icon.label()>{row.icon.glyph()}</span>
                <div class="call-main">
                    <p class="call-title">{row.title}</p>
                    <p class="call-subtitle">{row.subtitle}</p>
                </div>
                <div class="call-meta">
                    <p class="call-duration">{row.duration}</p>
                    <p class="call-date">{row.date}</p>
                </div>
            </div>
            {notes}
        </A>
    }
}
