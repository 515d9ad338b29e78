//! Call category filter

use calls_core::CallType;
use leptos::prelude::*;

/// Dropdown narrowing the current page to one call category
#[component]
pub fn CategorySelect(
    /// Category currently applied, `None` when showing every call
    #[prop(into)]
    selected: Signal<Option<CallType>>,
    /// Receives the raw option value; empty means "all calls"
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="category-select">
            "Type "
            <select
                prop:value=move || selected.get().map_or("", CallType::as_str)
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"All calls"</option>
                {CallType::FILTERABLE
                    .into_iter()
                    .map(|category| {
                        view! { <option value=category.as_str()>{category.label()}</option> }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
